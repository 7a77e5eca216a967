use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use sumo_core::{SignalError, SignalSink};
use sumo_model::{
    CloudEvent, EventContext, GET_SLI_TASK, GetSliFinishedData, KEPTN_SPEC_VERSION, SERVICE_NAME,
    StartedData, TaskOutcome, TaskRequest, finished_type, started_type,
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;

const CLOUDEVENTS_JSON: &str = "application/cloudevents+json";

/// Publishes get-sli replies to the Keptn event broker as structured CloudEvents.
pub struct KeptnEventSender {
    http: reqwest::Client,
    broker_url: String,
}

impl KeptnEventSender {
    pub fn new(broker_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), broker_url)
    }

    pub fn with_client(http: reqwest::Client, broker_url: impl Into<String>) -> Self {
        Self {
            http,
            broker_url: broker_url.into(),
        }
    }

    /// Reply envelope for the trigger described by `ctx`.
    fn envelope<T: Serialize>(
        ctx: &EventContext,
        event_type: String,
        data: &T,
    ) -> Result<CloudEvent, ClientError> {
        let data = serde_json::to_value(data).map_err(|e| ClientError::Encode(e.to_string()))?;
        let time = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| ClientError::Encode(e.to_string()))?;

        Ok(
            CloudEvent::new(Uuid::new_v4().to_string(), SERVICE_NAME, event_type, data)
                .with_keptn_context(ctx.keptn_context.clone())
                .with_triggered_id(ctx.event_id.as_str())
                .with_time(time)
                .with_keptn_spec_version(KEPTN_SPEC_VERSION),
        )
    }

    async fn publish(&self, event: &CloudEvent) -> Result<(), ClientError> {
        let body = serde_json::to_vec(event).map_err(|e| ClientError::Encode(e.to_string()))?;
        let response = self
            .http
            .post(&self.broker_url)
            .header(CONTENT_TYPE, CLOUDEVENTS_JSON)
            .body(body)
            .send()
            .await?;
        ClientError::check(response).await?;

        debug!(id = %event.id, kind = %event.event_type, "event published");
        Ok(())
    }
}

#[async_trait]
impl SignalSink for KeptnEventSender {
    async fn send_started(&self, ctx: &EventContext, req: &TaskRequest) -> Result<(), SignalError> {
        let event = Self::envelope(
            ctx,
            started_type(GET_SLI_TASK),
            &StartedData::for_request(req),
        )?;
        Ok(self.publish(&event).await?)
    }

    async fn send_finished(
        &self,
        ctx: &EventContext,
        req: &TaskRequest,
        outcome: &TaskOutcome,
    ) -> Result<(), SignalError> {
        let event = Self::envelope(
            ctx,
            finished_type(GET_SLI_TASK),
            &GetSliFinishedData::new(req, outcome),
        )?;
        Ok(self.publish(&event).await?)
    }
}
