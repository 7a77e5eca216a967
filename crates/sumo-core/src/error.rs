use sumo_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid timestamp '{value}' (expected RFC 3339 or epoch seconds)")]
    InvalidTimestamp { value: String },

    #[error("malformed query: {reason}")]
    MalformedQuery { reason: String },

    #[error("failed to send {phase} event: {source}")]
    SignalEmission {
        phase: &'static str,
        #[source]
        source: SignalError,
    },

    #[error("no handler registered for task: {0}")]
    NoHandler(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl CoreError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CoreError::MalformedQuery {
            reason: reason.into(),
        }
    }

    /// True for failures caused by the incoming event itself rather than by this service.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, CoreError::NoHandler(_) | CoreError::Model(_))
    }
}

/// Failure of a single metrics query; the lifecycle does not look inside.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("query returned no data points: {0}")]
    EmptyResult(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource request failed: {0}")]
    Transport(String),

    #[error("invalid resource content: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<ModelError> for StoreError {
    fn from(e: ModelError) -> Self {
        StoreError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(e.to_string())
        } else {
            StoreError::Io(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("failed to encode event: {0}")]
    Encode(String),

    #[error("event broker unreachable: {0}")]
    Transport(String),

    #[error("event broker rejected event with {status}: {body}")]
    Rejected { status: u16, body: String },
}
