//! get-sli task lifecycle and the query pipeline behind it.
//!
//! The lifecycle talks to the outside world only through three seams:
//! [`MetricsExecutor`] (the metrics backend), [`SignalSink`] (the bus) and
//! [`SliConfigStore`] (the per-service indicator definitions).

pub mod config;
pub use config::{HandlerConfig, MIN_CONSISTENCY_DELAY, SETTLE_DELAY, consistency_delay};

mod error;
pub use error::{CoreError, ExecutorError, SignalError, StoreError};

pub mod timestamp;
pub use timestamp::{ResolvedWindow, resolve_timestamp};

pub mod template;
pub use template::render_query;

pub mod quantize;
pub use quantize::{ParsedQuery, QuantizeSpec, Rollup, parse_query};

pub mod executor;
pub use executor::{DEFAULT_ROW_ID, MetricsExecutor, MetricsQuery};

pub mod signal;
pub use signal::SignalSink;

pub mod store;
pub use store::{ResourceKey, SliConfigStore};

pub mod lifecycle;
pub use lifecycle::GetSliHandler;

pub mod monitoring;
pub use monitoring::ConfigureMonitoringHandler;

pub mod router;
pub use router::{EventHandler, EventRouter};
