//! CloudEvents HTTP protocol binding: structured and binary content modes.

use axum::http::{HeaderMap, header::CONTENT_TYPE};
use sumo_model::{CloudEvent, ModelError, SPEC_VERSION};

use crate::error::ApiError;

const STRUCTURED: &str = "application/cloudevents+json";

/// Read a CloudEvent from an HTTP request.
///
/// A `application/cloudevents+json` body is a whole event; otherwise the
/// attributes come from `ce-*` headers and the body is the data.
pub(crate) fn decode_event(headers: &HeaderMap, body: &[u8]) -> Result<CloudEvent, ApiError> {
    let content_type = header(headers, CONTENT_TYPE.as_str());

    if content_type.is_some_and(|ct| ct.starts_with(STRUCTURED)) {
        return serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidEvent(format!("malformed structured event: {e}")));
    }
    if header(headers, "ce-specversion").is_none() {
        return Err(ApiError::InvalidEvent(
            "neither a structured event nor ce-* headers".to_string(),
        ));
    }

    let data = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidEvent(format!("event data is not json: {e}")))?
    };

    Ok(CloudEvent {
        specversion: header(headers, "ce-specversion")
            .unwrap_or(SPEC_VERSION)
            .to_string(),
        id: required(headers, "ce-id")?,
        source: required(headers, "ce-source")?,
        event_type: required(headers, "ce-type")?,
        datacontenttype: content_type.map(str::to_string),
        time: optional(headers, "ce-time"),
        shkeptncontext: optional(headers, "ce-shkeptncontext"),
        triggeredid: optional(headers, "ce-triggeredid"),
        shkeptnspecversion: optional(headers, "ce-shkeptnspecversion"),
        data,
    })
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn optional(headers: &HeaderMap, name: &str) -> Option<String> {
    header(headers, name).map(str::to_string)
}

fn required(headers: &HeaderMap, name: &'static str) -> Result<String, ModelError> {
    optional(headers, name).ok_or(ModelError::MissingAttribute(name))
}
