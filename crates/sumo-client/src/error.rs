use sumo_core::{ExecutorError, SignalError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid url '{0}'")]
    InvalidUrl(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ClientError {
    /// Turn a non-2xx response into [`ClientError::Status`], keeping the body for the logs.
    pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, Self> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl From<ClientError> for ExecutorError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Status { status, body } => ExecutorError::Status { status, body },
            ClientError::InvalidResponse(msg) => ExecutorError::InvalidResponse(msg),
            other => ExecutorError::Transport(other.to_string()),
        }
    }
}

impl From<ClientError> for SignalError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Status { status, body } => SignalError::Rejected { status, body },
            ClientError::Encode(msg) => SignalError::Encode(msg),
            other => SignalError::Transport(other.to_string()),
        }
    }
}

impl From<ClientError> for StoreError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Status { status: 404, body } => StoreError::NotFound(body),
            ClientError::InvalidResponse(msg) => StoreError::Decode(msg),
            other => StoreError::Transport(other.to_string()),
        }
    }
}
