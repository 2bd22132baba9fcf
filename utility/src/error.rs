use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Custom(String),
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    Parse(#[from] url::ParseError),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    ///a named secret could not be read from any of the known locations
    #[error("unable to read secret: {name}, error: {reason}")]
    Secret { name: String, reason: String },
    #[error("timed out {0}")]
    Timeout(String),
}

pub type Result<T> = std::result::Result<T, crate::Error>;
