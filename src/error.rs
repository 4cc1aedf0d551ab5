use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // The identity provider only looks at the status here; the body
            // stays empty and no further validation runs.
            AppError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}
