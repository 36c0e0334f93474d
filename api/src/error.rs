use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server replied {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
