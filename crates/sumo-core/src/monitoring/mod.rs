use async_trait::async_trait;
use sumo_model::{EventContext, TaskEvent};
use tracing::info;

use crate::{error::CoreError, router::EventHandler};

/// Acknowledges `configure-monitoring` requests.
///
/// Sumo Logic needs no per-service setup, so the request is only logged.
#[derive(Debug, Default)]
pub struct ConfigureMonitoringHandler;

#[async_trait]
impl EventHandler for ConfigureMonitoringHandler {
    fn name(&self) -> &'static str {
        "configure-monitoring"
    }

    fn supports(&self, event: &TaskEvent) -> bool {
        matches!(event, TaskEvent::ConfigureMonitoringTriggered(_))
    }

    async fn handle(&self, ctx: &EventContext, event: TaskEvent) -> Result<(), CoreError> {
        match event {
            TaskEvent::ConfigureMonitoringTriggered(data) => {
                info!(
                    project = %data.project,
                    service = %data.service,
                    monitoring = data.monitoring_type().unwrap_or("-"),
                    keptn_context = %ctx.keptn_context_or_dash(),
                    "configure-monitoring received, nothing to set up"
                );
                Ok(())
            }
            other => Err(CoreError::NoHandler(other.task().to_string())),
        }
    }
}
