//! HTTP adapters for the three core seams: the Sumo Logic metrics API, the Keptn
//! event broker and the Keptn configuration service (or the local filesystem).

mod error;
pub use error::ClientError;

mod config;
pub use config::{DEFAULT_REGION, SumoConfig, endpoint_for_region};

pub mod metrics;
pub use metrics::SumoMetricsClient;

mod sender;
pub use sender::KeptnEventSender;

pub mod resource;
pub use resource::{ConfigServiceStore, LocalResourceStore};
