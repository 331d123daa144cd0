use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// API 错误。存储层的具体原因只写日志，不返回给调用方
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Word is required")]
    WordRequired,

    #[error("{0}")]
    InvalidBody(String),

    #[error("Failed to fetch words")]
    FetchWords(#[source] StoreError),

    #[error("Failed to add word")]
    AddWord(#[source] StoreError),

    #[error("Server is busy")]
    Overloaded,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::WordRequired | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::FetchWords(_) | ApiError::AddWord(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Overloaded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::FetchWords(e) => tracing::error!("Error fetching words: {:?}", e),
            ApiError::AddWord(e) => tracing::error!("Error adding word: {:?}", e),
            ApiError::Overloaded => tracing::warn!("Request rejected: queue is full"),
            ApiError::WordRequired | ApiError::InvalidBody(_) => {
                tracing::debug!("Rejected request: {}", self)
            }
        }

        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
