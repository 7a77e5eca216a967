//! Wire and domain types shared by the sumologic service crates.
//!
//! - [`event`]: the CloudEvent envelope and the closed set of task events decoded from it.
//! - [`domain`]: get-sli requests, outcomes, status/result and the SLI configuration document.

mod error;
pub use error::ModelError;

pub mod domain;
pub use domain::*;

pub mod event;
pub use event::*;
