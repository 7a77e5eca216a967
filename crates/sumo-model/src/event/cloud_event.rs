use serde::{Deserialize, Serialize};

/// CloudEvents specification version spoken on the bus.
pub const SPEC_VERSION: &str = "1.0";

/// Keptn event-payload specification version put on outgoing events.
pub const KEPTN_SPEC_VERSION: &str = "0.2.4";

/// Structured-mode CloudEvent with the Keptn extension attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudEvent {
    #[serde(default = "default_spec_version")]
    pub specversion: String,
    pub id: String,
    pub source: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacontenttype: Option<String>,
    /// RFC 3339 timestamp of emission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Keptn context id shared by every event of one sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shkeptncontext: Option<String>,
    /// Id of the `.triggered` event a `.started`/`.finished` event answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggeredid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shkeptnspecversion: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

fn default_spec_version() -> String {
    SPEC_VERSION.to_string()
}

impl CloudEvent {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        event_type: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            specversion: SPEC_VERSION.to_string(),
            id: id.into(),
            source: source.into(),
            event_type: event_type.into(),
            datacontenttype: Some("application/json".to_string()),
            time: None,
            shkeptncontext: None,
            triggeredid: None,
            shkeptnspecversion: None,
            data,
        }
    }

    pub fn with_keptn_context(mut self, context: Option<String>) -> Self {
        self.shkeptncontext = context;
        self
    }

    pub fn with_triggered_id(mut self, id: impl Into<String>) -> Self {
        self.triggeredid = Some(id.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_keptn_spec_version(mut self, version: impl Into<String>) -> Self {
        self.shkeptnspecversion = Some(version.into());
        self
    }
}
