//! Process-wide settings the lifecycle needs; built once at start and shared read-only.

use std::time::Duration;

use sumo_model::{SLI_PROVIDER, SLI_RESOURCE_PATH};
use tracing::info;

/// Floor for the configured wait before each backend query.
pub const MIN_CONSISTENCY_DELAY: Duration = Duration::from_secs(30);

/// Unconditional extra wait before each backend query, on top of the configured delay.
pub const SETTLE_DELAY: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// `sliProvider` value this handler answers to.
    pub provider: String,
    /// Resource holding the indicator definitions.
    pub resource_path: String,
    /// Wait before each query so that freshly ingested data is visible.
    pub consistency_delay: Duration,
}

impl HandlerConfig {
    pub fn new(consistency_delay: Duration) -> Self {
        Self {
            provider: SLI_PROVIDER.to_string(),
            resource_path: SLI_RESOURCE_PATH.to_string(),
            consistency_delay: consistency_delay.max(MIN_CONSISTENCY_DELAY),
        }
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::new(MIN_CONSISTENCY_DELAY)
    }
}

/// Interpret a raw seconds value; missing, unparsable or below the floor yields the floor.
pub fn consistency_delay(raw: Option<&str>) -> Duration {
    let parsed = raw.and_then(|v| v.trim().parse::<i64>().ok());
    match parsed {
        Some(secs) if secs >= MIN_CONSISTENCY_DELAY.as_secs() as i64 => {
            Duration::from_secs(secs as u64)
        }
        _ => {
            info!(
                value = raw.unwrap_or(""),
                default_secs = MIN_CONSISTENCY_DELAY.as_secs(),
                "consistency delay missing or below the minimum, using the minimum"
            );
            MIN_CONSISTENCY_DELAY
        }
    }
}
