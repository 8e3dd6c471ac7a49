use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use food_store::{InvalidDocumentId, StoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Something went wrong: {0}")]
    ServerError(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    InvalidId(#[from] InvalidDocumentId),

    #[error("Failed to sign session token: {0}")]
    SessionToken(#[from] jsonwebtoken::errors::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
    status: u16,
    #[serde(rename = "statusText")]
    status_text: String,
}

#[derive(Serialize)]
struct SessionErrorBody {
    success: bool,
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let code = self.error_code();

        if let AppError::SessionToken(err) = &self {
            tracing::error!("error generating session token: {err}");
            let body = Json(SessionErrorBody {
                success: false,
                message: "Internal server error",
            });
            return (code, body).into_response();
        }

        if code.is_server_error() {
            tracing::error!("{self}");
        }

        let body = Json(ErrorBody {
            ok: false,
            error: self.to_string(),
            status: code.as_u16(),
            status_text: code.canonical_reason().unwrap_or_default().to_string(),
        });

        (code, body).into_response()
    }
}

impl AppError {
    fn error_code(&self) -> StatusCode {
        match self {
            AppError::ServerError(_) | AppError::SessionToken(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::ServerError(err.to_string())
    }
}
