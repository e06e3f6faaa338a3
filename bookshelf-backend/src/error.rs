use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Top-level API error shared by all route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database error: {0}")]
    Db(#[from] bookshelf_db::DbError),
    #[error("cache error: {0}")]
    Cache(#[from] bookshelf_cache::CacheError),
    #[error("job queue error: {0}")]
    JobQueue(#[from] bookshelf_job_queue::JobQueueError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation error")]
    Validation(serde_json::Value),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::JobQueue(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::SerdeJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = match self {
            ApiError::Validation(v) => v.clone(),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(payload)).into_response()
    }
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}
