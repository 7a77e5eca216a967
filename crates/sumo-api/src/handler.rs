use async_trait::async_trait;
use sumo_model::CloudEvent;

use crate::error::ApiError;

/// Backend of the event receiver.
///
/// `receive` resolves once the event is fully processed; the HTTP layer only
/// translates the result into a status code.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    async fn receive(&self, event: CloudEvent) -> Result<(), ApiError>;
}
