use serde::{Deserialize, Serialize};

/// Payload of `sh.keptn.event.configure-monitoring.triggered`.
///
/// Only decoded so the event can be acknowledged in the logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureMonitoringData {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub service: String,
    #[serde(default, rename = "configureMonitoring")]
    pub configure_monitoring: Option<MonitoringType>,
    /// Legacy events put the type at the top level.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub legacy_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringType {
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl ConfigureMonitoringData {
    /// Monitoring provider named by the event, from either payload generation.
    pub fn monitoring_type(&self) -> Option<&str> {
        self.configure_monitoring
            .as_ref()
            .map(|m| m.kind.as_str())
            .or(self.legacy_type.as_deref())
            .filter(|t| !t.is_empty())
    }
}
