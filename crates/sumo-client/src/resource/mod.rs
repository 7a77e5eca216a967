//! Where `sli.yaml` comes from: the Keptn configuration service, or a local directory.

mod local;
pub use local::LocalResourceStore;

mod service;
pub use service::ConfigServiceStore;
