use serde::{Deserialize, Serialize};

use crate::Labels;

/// Payload of `sh.keptn.event.get-sli.triggered` as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSliTriggeredData {
    pub project: String,
    pub stage: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(rename = "get-sli")]
    pub get_sli: GetSli,
}

/// The `get-sli` section of a triggered event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSli {
    /// Which SLI provider should answer; anything but [`crate::SLI_PROVIDER`] is ignored.
    pub sli_provider: String,
    /// RFC 3339 date-time or integer epoch seconds.
    pub start: String,
    /// RFC 3339 date-time or integer epoch seconds.
    pub end: String,
    #[serde(default)]
    pub indicators: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_filters: Vec<SliFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliFilter {
    pub key: String,
    pub value: String,
}

/// A get-sli task as seen by the lifecycle.
///
/// Built once from the triggered payload and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRequest {
    pub provider: String,
    pub project: String,
    pub stage: String,
    pub service: String,
    /// Requested indicator names, in the order results must be reported.
    pub indicators: Vec<String>,
    pub start: String,
    pub end: String,
    pub labels: Option<Labels>,
}

impl TaskRequest {
    /// Labels to echo back, empty when the trigger carried none.
    pub fn labels_or_default(&self) -> Labels {
        self.labels.clone().unwrap_or_default()
    }
}

impl From<GetSliTriggeredData> for TaskRequest {
    fn from(data: GetSliTriggeredData) -> Self {
        Self {
            provider: data.get_sli.sli_provider,
            project: data.project,
            stage: data.stage,
            service: data.service,
            indicators: data.get_sli.indicators,
            start: data.get_sli.start,
            end: data.get_sli.end,
            labels: data.labels,
        }
    }
}
