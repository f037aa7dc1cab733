use terrain::{FetchError, TerrainError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("missing required parameter '{0}'")]
    Config(&'static str),

    #[error("invalid parameter: {0}")]
    Invalid(String),

    #[error("{0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Fetch(#[source] FetchError),

    #[error("{message} (status {status})")]
    Status { status: u16, message: &'static str },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Terrain(#[from] TerrainError),
}
