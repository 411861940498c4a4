use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("STRING-db returned HTTP {0}")]
    Status(u16),

    #[error("STRING-db returned an empty response")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, LookupError>;
