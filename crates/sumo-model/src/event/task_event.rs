use serde::de::DeserializeOwned;

use crate::{
    CONFIGURE_MONITORING_TASK, CloudEvent, ConfigureMonitoringData, GET_SLI_TASK,
    GetSliTriggeredData, ModelError, TaskRequest, normalize_type, triggered_type,
};

/// Every task event this service understands, decoded once at the bus boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    GetSliTriggered(TaskRequest),
    ConfigureMonitoringTriggered(ConfigureMonitoringData),
}

impl TaskEvent {
    /// Decode the payload of `event` according to its (normalized) type.
    pub fn decode(event: &CloudEvent) -> Result<Self, ModelError> {
        let event_type = normalize_type(&event.event_type);

        if event_type == triggered_type(GET_SLI_TASK) {
            let data: GetSliTriggeredData = payload(&event_type, event)?;
            Ok(TaskEvent::GetSliTriggered(data.into()))
        } else if event_type == triggered_type(CONFIGURE_MONITORING_TASK) {
            let data: ConfigureMonitoringData = payload(&event_type, event)?;
            Ok(TaskEvent::ConfigureMonitoringTriggered(data))
        } else {
            Err(ModelError::UnhandledEvent(event.event_type.clone()))
        }
    }

    /// Task name of the variant, as used in event types.
    pub fn task(&self) -> &'static str {
        match self {
            TaskEvent::GetSliTriggered(_) => GET_SLI_TASK,
            TaskEvent::ConfigureMonitoringTriggered(_) => CONFIGURE_MONITORING_TASK,
        }
    }
}

fn payload<T: DeserializeOwned>(event_type: &str, event: &CloudEvent) -> Result<T, ModelError> {
    serde_json::from_value(event.data.clone()).map_err(|source| ModelError::Decode {
        event_type: event_type.to_string(),
        source,
    })
}
