use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Environment;

pub const COOKIE_NAME: &str = "token";
pub const TOKEN_TTL_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs session tokens and renders the cookies that carry them.
///
/// Tokens are only ever issued and cleared; no route checks them.
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    environment: Environment,
}

impl SessionService {
    pub fn new(secret: &str, environment: Environment) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            environment,
        }
    }

    pub fn issue(&self, email: String) -> jsonwebtoken::errors::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            email,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn decode(&self, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        let validation = Validation::default();
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    pub fn session_cookie(&self, token: &str) -> String {
        format!("{COOKIE_NAME}={token}; Path=/; {}", self.cookie_attributes())
    }

    pub fn cleared_cookie(&self) -> String {
        format!(
            "{COOKIE_NAME}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; {}",
            self.cookie_attributes()
        )
    }

    // cross-site frontends need `SameSite=None`, which browsers only accept with `Secure`
    fn cookie_attributes(&self) -> &'static str {
        if self.environment.is_production() {
            "HttpOnly; Secure; SameSite=None"
        } else {
            "HttpOnly; SameSite=Strict"
        }
    }
}
