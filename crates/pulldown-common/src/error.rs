use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PulldownError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column in dataset: {0}")]
    MissingColumn(String),

    #[error("Missing identifier in {0:?}")]
    MissingIdentifier(String),

    #[error("Invalid p-value {value:?} for {identifier}")]
    InvalidPValue { identifier: String, value: String },

    #[error("Invalid log-fold-change {value:?} for {identifier}")]
    InvalidLfc { identifier: String, value: String },

    #[error("Unknown tissue: {0}")]
    UnknownTissue(String),
}

pub type Result<T> = std::result::Result<T, PulldownError>;

/// Error returned from JSON handlers. Rendered as `{ "error": "..." }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_)   => StatusCode::NOT_FOUND,
            ApiError::Internal(_)   => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref msg) = self {
            tracing::error!("internal error: {}", msg);
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<PulldownError> for ApiError {
    fn from(err: PulldownError) -> Self {
        match err {
            PulldownError::UnknownTissue(t) => ApiError::NotFound(format!("Unknown tissue: {}", t)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
