use std::sync::Arc;

use async_trait::async_trait;
use sumo_model::{CloudEvent, EventContext, TaskEvent};
use tracing::{debug, instrument};

use crate::error::CoreError;

/// Handler for one or more [`TaskEvent`] variants.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn supports(&self, event: &TaskEvent) -> bool;

    async fn handle(&self, ctx: &EventContext, event: TaskEvent) -> Result<(), CoreError>;
}

/// Decodes incoming CloudEvents and hands them to the first handler that supports them.
#[derive(Default)]
pub struct EventRouter {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventRouter {
    #[inline]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    #[inline]
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    #[inline]
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.register(handler);
        self
    }

    pub fn pick(&self, event: &TaskEvent) -> Option<&Arc<dyn EventHandler>> {
        self.handlers.iter().find(|h| h.supports(event))
    }

    #[instrument(level = "debug", skip(self, event), fields(id = %event.id, kind = %event.event_type))]
    pub async fn dispatch(&self, event: &CloudEvent) -> Result<(), CoreError> {
        let task = TaskEvent::decode(event)?;
        let handler = self
            .pick(&task)
            .ok_or_else(|| CoreError::NoHandler(task.task().to_string()))?;

        debug!(handler = handler.name(), "dispatching task event");
        handler.handle(&EventContext::from(event), task).await
    }
}
