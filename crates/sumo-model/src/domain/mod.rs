mod status;
pub use status::{ResultType, StatusType};

mod request;
pub use request::{GetSli, GetSliTriggeredData, SliFilter, TaskRequest};

mod outcome;
pub use outcome::{GetSliFinished, GetSliFinishedData, SliResult, StartedData, TaskOutcome};

mod sli_config;
pub use sli_config::{SLI_RESOURCE_PATH, SliConfig};

mod monitoring;
pub use monitoring::{ConfigureMonitoringData, MonitoringType};

/// Free-form labels attached to a task and echoed back on completion.
///
/// Ordered so that serialized events are stable.
pub type Labels = std::collections::BTreeMap<String, String>;

/// Identity this service answers to in `get-sli.sliProvider`.
pub const SLI_PROVIDER: &str = "sumologic";

/// Name used as the CloudEvent `source` of everything this service emits.
pub const SERVICE_NAME: &str = "sumologic-service";
