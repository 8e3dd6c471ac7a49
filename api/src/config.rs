use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} env var must be set")]
    Missing(&'static str),

    #[error("{key} env var has an invalid value: `{value}`")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "development" => Ok(Environment::Development),
            _ => Err(()),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

impl fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the database url carries credentials
        match self {
            StoreBackend::Postgres {
                max_connections, ..
            } => f
                .debug_struct("Postgres")
                .field("max_connections", max_connections)
                .finish_non_exhaustive(),
            StoreBackend::Memory => f.write_str("Memory"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub token_secret: String,
    pub environment: Environment,
    pub store_backend: StoreBackend,
    pub cors_origins: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("store_backend", &self.store_backend)
            .field("cors_origins", &self.cors_origins)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if present.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let token_secret = required("ACCESS_TOKEN_SECRET")?;
        let environment = parse_or(&lookup, "APP_ENV", Environment::default())?;

        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres {
                database_url: required("DATABASE_URL")?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: other.to_owned(),
                });
            }
        };

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_owned())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        // credentialed CORS cannot be combined with a wildcard origin
        if let Some(wildcard) = cors_origins.iter().find(|origin| *origin == "*") {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: wildcard.clone(),
            });
        }

        Ok(Config {
            port,
            token_secret,
            environment,
            store_backend,
            cors_origins,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_postgres_in_development() {
        let config = config_from(&[
            ("ACCESS_TOKEN_SECRET", "secret"),
            ("DATABASE_URL", "postgres://localhost/food"),
        ])
        .unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(
            config.store_backend,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/food".to_owned(),
                max_connections: 20,
            }
        );
        assert_eq!(
            config.cors_origins,
            ["http://localhost:5173", "http://localhost:5174"]
        );
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let config = config_from(&[
            ("ACCESS_TOKEN_SECRET", "secret"),
            ("STORE_BACKEND", "memory"),
            ("APP_ENV", "production"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.environment.is_production());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = config_from(&[("STORE_BACKEND", "memory")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ACCESS_TOKEN_SECRET")));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = config_from(&[
            ("ACCESS_TOKEN_SECRET", "secret"),
            ("STORE_BACKEND", "memory"),
            ("PORT", "eighty"),
        ])
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn wildcard_cors_origin_is_an_error() {
        let err = config_from(&[
            ("ACCESS_TOKEN_SECRET", "secret"),
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", "https://food.example, *"),
        ])
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "CORS_ORIGINS", .. }));
    }

    #[test]
    fn cors_origins_are_trimmed_and_split() {
        let config = config_from(&[
            ("ACCESS_TOKEN_SECRET", "secret"),
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", " https://a.example ,,https://b.example"),
        ])
        .unwrap();

        assert_eq!(config.cors_origins, ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = config_from(&[
            ("ACCESS_TOKEN_SECRET", "hunter2"),
            ("DATABASE_URL", "postgres://user:pass@db/food"),
        ])
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("pass@db"));
    }
}
