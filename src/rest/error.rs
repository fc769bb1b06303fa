use thiserror::Error;

#[derive(Debug, Error)]
pub enum FtxRestError {
    #[error("Api secret is empty, request can not be signed")]
    EmptyApiSecret,

    #[error("Request path must be non-empty and start with '/': {0:?}")]
    InvalidPath(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error(transparent)]
    Http(#[from] http::Error),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    SystemTime(#[from] std::time::SystemTimeError),
}

impl FtxRestError {
    /// True when no valid signed request could be produced.
    pub fn is_signing_error(&self) -> bool {
        matches!(self, FtxRestError::EmptyApiSecret | FtxRestError::SystemTime(_))
    }
}
