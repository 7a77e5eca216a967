mod cloud_event;
pub use cloud_event::{CloudEvent, KEPTN_SPEC_VERSION, SPEC_VERSION};

mod context;
pub use context::EventContext;

mod task_event;
pub use task_event::TaskEvent;

mod types;
pub use types::{
    CONFIGURE_MONITORING_TASK, GET_SLI_TASK, LEGACY_CONFIGURE_MONITORING, finished_type,
    normalize_type, started_type, triggered_type,
};
