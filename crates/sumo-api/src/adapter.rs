use std::sync::Arc;

use async_trait::async_trait;
use sumo_core::EventRouter;
use sumo_model::CloudEvent;
use tracing::info;

use crate::{error::ApiError, handler::ApiHandler};

/// [`ApiHandler`] that hands every event to an [`EventRouter`].
pub struct EventRouterAdapter {
    router: Arc<EventRouter>,
}

impl EventRouterAdapter {
    pub fn new(router: Arc<EventRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl ApiHandler for EventRouterAdapter {
    async fn receive(&self, event: CloudEvent) -> Result<(), ApiError> {
        info!(
            id = %event.id,
            kind = %event.event_type,
            keptn_context = event.shkeptncontext.as_deref().unwrap_or("-"),
            "event received"
        );
        self.router.dispatch(&event).await.map_err(ApiError::from)
    }
}
