use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use simpletodo_core::cache::CacheError;
use simpletodo_core::http_mapping::{cache_error_to_status_code, repository_error_to_status_code};
use simpletodo_core::storage::RepositoryError;

use crate::storage::cached::CoordinatorError;

/// Handler error that wraps `anyhow::Error`.
///
/// The status is picked by downcasting to the core error types; anything
/// unrecognised is a 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(err) = self.0.downcast_ref::<CoordinatorError>() {
            match err {
                CoordinatorError::Repository(e) => repository_error_to_status_code(e),
                CoordinatorError::Cache(e) => cache_error_to_status_code(e),
            }
        } else if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(err)
        } else if let Some(err) = self.0.downcast_ref::<CacheError>() {
            cache_error_to_status_code(err)
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self.0, "Request rejected");
        }

        (status, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
