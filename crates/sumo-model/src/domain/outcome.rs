use serde::{Deserialize, Serialize};

use crate::{Labels, ResultType, StatusType, TaskRequest};

/// One successfully fetched indicator value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliResult {
    pub metric: String,
    pub value: f64,
    /// Always `true`: failed indicators are left out of the list instead.
    pub success: bool,
}

impl SliResult {
    pub fn new(metric: impl Into<String>, value: f64) -> Self {
        Self {
            metric: metric.into(),
            value,
            success: true,
        }
    }
}

/// Aggregate result of one get-sli task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    pub status: StatusType,
    pub result: ResultType,
    /// Values in request order; failed indicators are absent.
    pub indicator_values: Vec<SliResult>,
    /// Window bounds exactly as they arrived in the trigger.
    pub start: String,
    pub end: String,
    pub labels: Labels,
}

impl TaskOutcome {
    /// Starting point for a task: succeeded/pass, no values yet.
    pub fn pending(req: &TaskRequest) -> Self {
        Self {
            status: StatusType::Succeeded,
            result: ResultType::Pass,
            indicator_values: Vec::new(),
            start: req.start.clone(),
            end: req.end.clone(),
            labels: req.labels_or_default(),
        }
    }

    /// Terminal outcome for a task that could not even start querying.
    pub fn errored(req: &TaskRequest) -> Self {
        let mut outcome = Self::pending(req);
        outcome.mark_failed();
        outcome
    }

    pub fn mark_failed(&mut self) {
        self.status = StatusType::Errored;
        self.result = ResultType::Failed;
    }

    pub fn push(&mut self, value: SliResult) {
        self.indicator_values.push(value);
    }

    pub fn is_errored(&self) -> bool {
        self.status == StatusType::Errored
    }
}

/// Payload of `sh.keptn.event.get-sli.started`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedData {
    pub project: String,
    pub stage: String,
    pub service: String,
    #[serde(default)]
    pub labels: Labels,
    pub status: StatusType,
}

impl StartedData {
    pub fn for_request(req: &TaskRequest) -> Self {
        Self {
            project: req.project.clone(),
            stage: req.stage.clone(),
            service: req.service.clone(),
            labels: req.labels_or_default(),
            status: StatusType::Succeeded,
        }
    }
}

/// Payload of `sh.keptn.event.get-sli.finished`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSliFinishedData {
    pub project: String,
    pub stage: String,
    pub service: String,
    #[serde(default)]
    pub labels: Labels,
    pub status: StatusType,
    pub result: ResultType,
    #[serde(rename = "get-sli")]
    pub get_sli: GetSliFinished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSliFinished {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub indicator_values: Vec<SliResult>,
}

impl GetSliFinishedData {
    pub fn new(req: &TaskRequest, outcome: &TaskOutcome) -> Self {
        Self {
            project: req.project.clone(),
            stage: req.stage.clone(),
            service: req.service.clone(),
            labels: outcome.labels.clone(),
            status: outcome.status,
            result: outcome.result,
            get_sli: GetSliFinished {
                start: outcome.start.clone(),
                end: outcome.end.clone(),
                indicator_values: outcome.indicator_values.clone(),
            },
        }
    }
}
