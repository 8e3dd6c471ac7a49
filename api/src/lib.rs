pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use food_store::{ListingStore, RequestStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::session::SessionService;

#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<dyn ListingStore>,
    pub requests: Arc<dyn RequestStore>,
    pub sessions: SessionService,
}

impl AppState {
    pub fn new(
        config: &Config,
        listings: Arc<dyn ListingStore>,
        requests: Arc<dyn RequestStore>,
    ) -> Self {
        Self {
            listings,
            requests,
            sessions: SessionService::new(&config.token_secret, config.environment),
        }
    }
}

/// The full application: every route plus CORS and request tracing.
pub fn app(config: &Config, state: AppState) -> Router {
    routes::app_routes()
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            // tower-http panics on a wildcard when credentials are allowed
            Ok(_) if origin == "*" => {
                tracing::warn!("ignoring wildcard CORS origin");
                None
            }
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin `{origin}`");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}
