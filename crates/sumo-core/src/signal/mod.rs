use async_trait::async_trait;
use sumo_model::{EventContext, TaskOutcome, TaskRequest};

use crate::error::SignalError;

/// Outbound side of the bus: the `started` and `finished` replies to a trigger.
#[async_trait]
pub trait SignalSink: Send + Sync + 'static {
    async fn send_started(&self, ctx: &EventContext, req: &TaskRequest)
    -> Result<(), SignalError>;

    async fn send_finished(
        &self,
        ctx: &EventContext,
        req: &TaskRequest,
        outcome: &TaskOutcome,
    ) -> Result<(), SignalError>;
}
