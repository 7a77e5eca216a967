use std::sync::Arc;

use sumo_client::{ConfigServiceStore, KeptnEventSender, LocalResourceStore, SumoMetricsClient};
use sumo_core::{
    ConfigureMonitoringHandler, EventRouter, GetSliHandler, HandlerConfig, SliConfigStore,
};

use crate::config::{EnvConfig, ResourceSource};

/// Wire the production adapters into an [`EventRouter`].
pub fn build_router(cfg: &EnvConfig) -> EventRouter {
    let store: Arc<dyn SliConfigStore> = match &cfg.resources {
        ResourceSource::Local(dir) => Arc::new(LocalResourceStore::new(dir.clone())),
        ResourceSource::ConfigurationService(url) => Arc::new(ConfigServiceStore::new(url.clone())),
    };

    let get_sli = GetSliHandler::new(
        Arc::new(SumoMetricsClient::new(cfg.sumo.clone())),
        Arc::new(KeptnEventSender::new(cfg.event_broker.clone())),
        store,
        HandlerConfig::new(cfg.consistency_delay),
    );

    EventRouter::new()
        .with_handler(Arc::new(get_sli))
        .with_handler(Arc::new(ConfigureMonitoringHandler))
}
