use crate::CloudEvent;

/// Identity of the triggering event, carried into the signals sent in reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    pub event_id: String,
    pub event_type: String,
    pub source: String,
    pub keptn_context: Option<String>,
}

impl From<&CloudEvent> for EventContext {
    fn from(ev: &CloudEvent) -> Self {
        Self {
            event_id: ev.id.clone(),
            event_type: ev.event_type.clone(),
            source: ev.source.clone(),
            keptn_context: ev.shkeptncontext.clone(),
        }
    }
}

impl EventContext {
    /// Keptn context for log fields; `-` when the trigger had none.
    pub fn keptn_context_or_dash(&self) -> &str {
        self.keptn_context.as_deref().unwrap_or("-")
    }
}
