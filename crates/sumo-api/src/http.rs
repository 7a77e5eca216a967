use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;

use crate::{cloudevent::decode_event, error::ApiError, handler::ApiHandler};

/// HTTP receiver for bus events plus the probe endpoints.
pub struct EventApi<H> {
    handler: Arc<H>,
    path: String,
}

impl<H> EventApi<H>
where
    H: ApiHandler,
{
    /// Receiver accepting events on `path`.
    pub fn new(handler: Arc<H>, path: impl Into<String>) -> Self {
        Self {
            handler,
            path: path.into(),
        }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST {path} - Receive a CloudEvent
    /// - GET /health, GET /ready - Probes
    ///
    /// Anything else answers 404.
    pub fn router(self) -> Router {
        Router::new()
            .route(&self.path, post(receive_event::<H>))
            .route("/health", get(status_ok))
            .route("/ready", get(status_ok))
            .fallback(not_found)
            .method_not_allowed_fallback(not_found)
            .with_state(self.handler)
    }
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: &'static str,
}

/// POST {path}
async fn receive_event<H>(
    State(handler): State<Arc<H>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let event = decode_event(&headers, &body)?;
    handler.receive(event).await?;

    Ok(StatusCode::ACCEPTED)
}

async fn status_ok() -> impl IntoResponse {
    Json(StatusBody { status: "OK" })
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(StatusBody {
            status: "NOT FOUND",
        }),
    )
}
