//! Logging setup for the sumologic service.
//!
//! Everything emits through `tracing`; this crate only decides where the events go.

mod logger;
pub use logger::*;
