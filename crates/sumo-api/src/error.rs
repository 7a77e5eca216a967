use sumo_core::CoreError;
use sumo_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid cloudevent: {0}")]
    InvalidEvent(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    /// True when the sender is at fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            ApiError::InvalidEvent(_) | ApiError::Model(_) => true,
            ApiError::Core(e) => e.is_bad_request(),
        }
    }
}

#[cfg(feature = "http")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::{Json, http::StatusCode};

        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "event processing failed");
        } else {
            tracing::warn!(error = %self, "event rejected");
        }

        let body = serde_json::json!({"status": "ERROR", "error": self.to_string()});
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_input_is_client_error() {
        assert!(ApiError::InvalidEvent("x".into()).is_client_error());
        assert!(ApiError::Model(ModelError::UnhandledEvent("t".into())).is_client_error());
        assert!(ApiError::Core(CoreError::NoHandler("get-sli".into())).is_client_error());
    }

    #[test]
    fn task_failure_is_server_error() {
        let err = ApiError::Core(CoreError::InvalidTimestamp {
            value: "abc".into(),
        });
        assert!(!err.is_client_error());
    }
}
