use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unhandled event type: {0}")]
    UnhandledEvent(String),

    #[error("failed to decode {event_type} payload: {source}")]
    Decode {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid sli configuration: {0}")]
    SliConfig(#[from] serde_yaml::Error),

    #[error("missing cloudevent attribute: {0}")]
    MissingAttribute(&'static str),
}
