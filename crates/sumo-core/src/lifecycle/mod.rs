use std::sync::Arc;

use async_trait::async_trait;
use sumo_model::{EventContext, SliResult, TaskEvent, TaskOutcome, TaskRequest};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{HandlerConfig, SETTLE_DELAY},
    error::CoreError,
    executor::{MetricsExecutor, MetricsQuery},
    quantize::parse_query,
    router::EventHandler,
    signal::SignalSink,
    store::{ResourceKey, SliConfigStore},
    template::render_query,
    timestamp::ResolvedWindow,
};

/// Runs get-sli tasks: started, one query per indicator, finished.
pub struct GetSliHandler {
    executor: Arc<dyn MetricsExecutor>,
    sink: Arc<dyn SignalSink>,
    store: Arc<dyn SliConfigStore>,
    cfg: HandlerConfig,
}

impl GetSliHandler {
    pub fn new(
        executor: Arc<dyn MetricsExecutor>,
        sink: Arc<dyn SignalSink>,
        store: Arc<dyn SliConfigStore>,
        cfg: HandlerConfig,
    ) -> Self {
        Self {
            executor,
            sink,
            store,
            cfg,
        }
    }

    /// Run one task to completion.
    ///
    /// Returns early without any signal when the task names another provider.
    /// An invalid window or query aborts the task without a `finished` signal;
    /// a failing indicator only degrades the outcome.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            project = %req.project,
            stage = %req.stage,
            service = %req.service,
            keptn_context = %ctx.keptn_context_or_dash(),
        )
    )]
    pub async fn run(&self, ctx: &EventContext, req: &TaskRequest) -> Result<(), CoreError> {
        if req.provider != self.cfg.provider {
            debug!(provider = %req.provider, "task addressed to another sli provider, ignoring");
            return Ok(());
        }

        self.sink
            .send_started(ctx, req)
            .await
            .map_err(|source| CoreError::SignalEmission {
                phase: "started",
                source,
            })?;

        let window = ResolvedWindow::resolve(&req.start, &req.end)?;

        let key = ResourceKey::for_request(req, &self.cfg.resource_path);
        let config = match self.store.fetch(&key).await {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %key.path, "failed to load sli configuration");
                return self.finish(ctx, req, &TaskOutcome::errored(req)).await;
            }
        };

        let mut outcome = TaskOutcome::pending(req);
        for indicator in &req.indicators {
            let template = config.query(indicator).unwrap_or_default();
            if template.is_empty() {
                warn!(%indicator, "no query defined for indicator");
            }

            let parsed = parse_query(&render_query(template, req, &window))?;
            let query = MetricsQuery::new(
                parsed.query,
                parsed.quantize.interval_millis,
                parsed.quantize.rollup,
                window,
            );

            sleep(self.cfg.consistency_delay).await;
            sleep(SETTLE_DELAY).await;

            match self.executor.run_query(&query).await {
                Ok(value) => {
                    info!(%indicator, value, "indicator retrieved");
                    outcome.push(SliResult::new(indicator.clone(), value));
                }
                Err(e) => {
                    warn!(%indicator, error = %e, "indicator query failed");
                    outcome.mark_failed();
                }
            }
        }

        self.finish(ctx, req, &outcome).await
    }

    async fn finish(
        &self,
        ctx: &EventContext,
        req: &TaskRequest,
        outcome: &TaskOutcome,
    ) -> Result<(), CoreError> {
        self.sink
            .send_finished(ctx, req, outcome)
            .await
            .map_err(|source| CoreError::SignalEmission {
                phase: "finished",
                source,
            })?;
        info!(
            status = ?outcome.status,
            result = ?outcome.result,
            values = outcome.indicator_values.len(),
            "get-sli task finished"
        );
        Ok(())
    }
}

#[async_trait]
impl EventHandler for GetSliHandler {
    fn name(&self) -> &'static str {
        "get-sli"
    }

    fn supports(&self, event: &TaskEvent) -> bool {
        matches!(event, TaskEvent::GetSliTriggered(_))
    }

    async fn handle(&self, ctx: &EventContext, event: TaskEvent) -> Result<(), CoreError> {
        match event {
            TaskEvent::GetSliTriggered(req) => self.run(ctx, &req).await,
            other => Err(CoreError::NoHandler(other.task().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::Mutex,
        time::Duration,
    };

    use sumo_model::{Labels, ResultType, SliConfig, StatusType};
    use tokio::time::Instant;

    use super::*;
    use crate::{
        error::{ExecutorError, SignalError, StoreError},
        quantize::Rollup,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Signal {
        Started,
        Finished(TaskOutcome),
    }

    #[derive(Default)]
    struct RecordingSink {
        signals: Mutex<Vec<Signal>>,
        fail_started: bool,
        fail_finished: bool,
    }

    impl RecordingSink {
        fn signals(&self) -> Vec<Signal> {
            self.signals.lock().unwrap().clone()
        }

        fn finished(&self) -> TaskOutcome {
            match self.signals().pop() {
                Some(Signal::Finished(outcome)) => outcome,
                other => panic!("last signal is not finished: {other:?}"),
            }
        }
    }

    #[async_trait]
    impl SignalSink for RecordingSink {
        async fn send_started(&self, _: &EventContext, _: &TaskRequest) -> Result<(), SignalError> {
            if self.fail_started {
                return Err(SignalError::Transport("broker down".into()));
            }
            self.signals.lock().unwrap().push(Signal::Started);
            Ok(())
        }

        async fn send_finished(
            &self,
            _: &EventContext,
            _: &TaskRequest,
            outcome: &TaskOutcome,
        ) -> Result<(), SignalError> {
            if self.fail_finished {
                return Err(SignalError::Rejected {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            self.signals
                .lock()
                .unwrap()
                .push(Signal::Finished(outcome.clone()));
            Ok(())
        }
    }

    /// Answers by query text; unknown queries fail.
    #[derive(Default)]
    struct ScriptedExecutor {
        answers: HashMap<String, f64>,
        seen: Mutex<Vec<(MetricsQuery, Instant)>>,
    }

    impl ScriptedExecutor {
        fn answering(pairs: &[(&str, f64)]) -> Self {
            Self {
                answers: pairs.iter().map(|(q, v)| (q.to_string(), *v)).collect(),
                seen: Mutex::default(),
            }
        }

        fn seen(&self) -> Vec<(MetricsQuery, Instant)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MetricsExecutor for ScriptedExecutor {
        async fn run_query(&self, query: &MetricsQuery) -> Result<f64, ExecutorError> {
            self.seen
                .lock()
                .unwrap()
                .push((query.clone(), Instant::now()));
            self.answers
                .get(&query.query)
                .copied()
                .ok_or_else(|| ExecutorError::Status {
                    status: 400,
                    body: "bad query".into(),
                })
        }
    }

    struct StaticStore(Result<SliConfig, ()>);

    #[async_trait]
    impl SliConfigStore for StaticStore {
        async fn fetch(&self, key: &ResourceKey) -> Result<SliConfig, StoreError> {
            assert_eq!(key.path, "sumologic-service/sli.yaml");
            self.0
                .clone()
                .map_err(|_| StoreError::NotFound(key.path.clone()))
        }
    }

    fn sli_config() -> SliConfig {
        [
            (
                "throughput".to_string(),
                "metric=requests service=$SERVICE window=$DURATION | quantize to 1m using sum".to_string(),
            ),
            (
                "errorrate".to_string(),
                "metric=errors project=$project | quantize to 30s using avg".to_string(),
            ),
            (
                "broken".to_string(),
                "metric=latency | quantize to 5 using avg".to_string(),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn request(indicators: &[&str]) -> TaskRequest {
        TaskRequest {
            provider: "sumologic".into(),
            project: "sockshop".into(),
            stage: "staging".into(),
            service: "carts".into(),
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
            start: "2021-01-02T15:04:05Z".into(),
            end: "2021-01-02T15:09:05Z".into(),
            labels: None,
        }
    }

    fn ctx() -> EventContext {
        EventContext {
            event_id: "trigger-1".into(),
            event_type: "sh.keptn.event.get-sli.triggered".into(),
            source: "lighthouse-service".into(),
            keptn_context: Some("ctx-1".into()),
        }
    }

    struct Harness {
        handler: GetSliHandler,
        sink: Arc<RecordingSink>,
        executor: Arc<ScriptedExecutor>,
    }

    fn harness(sink: RecordingSink, executor: ScriptedExecutor, store: StaticStore) -> Harness {
        harness_with(sink, executor, store, HandlerConfig::default())
    }

    fn harness_with(
        sink: RecordingSink,
        executor: ScriptedExecutor,
        store: StaticStore,
        cfg: HandlerConfig,
    ) -> Harness {
        let sink = Arc::new(sink);
        let executor = Arc::new(executor);
        let handler = GetSliHandler::new(executor.clone(), sink.clone(), Arc::new(store), cfg);
        Harness {
            handler,
            sink,
            executor,
        }
    }

    fn default_harness() -> Harness {
        harness(
            RecordingSink::default(),
            ScriptedExecutor::answering(&[("metric=requests service=carts window=300", 42.0)]),
            StaticStore(Ok(sli_config())),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn failing_indicator_degrades_outcome_and_is_omitted() {
        let h = default_harness();

        h.handler
            .run(&ctx(), &request(&["throughput", "errorrate"]))
            .await
            .unwrap();

        let signals = h.sink.signals();
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0], Signal::Started);

        let outcome = h.sink.finished();
        assert_eq!(outcome.status, StatusType::Errored);
        assert_eq!(outcome.result, ResultType::Failed);
        assert_eq!(outcome.indicator_values, vec![SliResult::new("throughput", 42.0)]);
        assert_eq!(outcome.start, "2021-01-02T15:04:05Z");
        assert_eq!(outcome.end, "2021-01-02T15:09:05Z");
    }

    #[tokio::test(start_paused = true)]
    async fn all_indicators_succeed() {
        let h = harness(
            RecordingSink::default(),
            ScriptedExecutor::answering(&[
                ("metric=requests service=carts window=300", 42.0),
                ("metric=errors project=sockshop", 0.5),
            ]),
            StaticStore(Ok(sli_config())),
        );

        h.handler
            .run(&ctx(), &request(&["errorrate", "throughput"]))
            .await
            .unwrap();

        let outcome = h.sink.finished();
        assert_eq!(outcome.status, StatusType::Succeeded);
        assert_eq!(outcome.result, ResultType::Pass);
        assert_eq!(
            outcome.indicator_values,
            vec![
                SliResult::new("errorrate", 0.5),
                SliResult::new("throughput", 42.0)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn executor_receives_rewritten_query_and_window() {
        let h = default_harness();

        h.handler
            .run(&ctx(), &request(&["throughput"]))
            .await
            .unwrap();

        let seen = h.executor.seen();
        assert_eq!(seen.len(), 1);
        let query = &seen[0].0;
        assert_eq!(query.query, "metric=requests service=carts window=300");
        assert_eq!(query.row_id, "A");
        assert_eq!(query.quantization_millis, 60_000);
        assert_eq!(query.rollup, Rollup::Sum);
        assert_eq!(query.window.start_millis(), 1_609_599_845_000);
        assert_eq!(query.window.end_millis(), 1_609_600_145_000);
    }

    #[tokio::test(start_paused = true)]
    async fn each_query_waits_for_both_delays() {
        let h = default_harness();
        let begin = Instant::now();

        h.handler
            .run(&ctx(), &request(&["throughput", "errorrate"]))
            .await
            .unwrap();

        let seen = h.executor.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1 - begin, Duration::from_secs(60));
        assert_eq!(seen[1].1 - seen[0].1, Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn configured_delay_is_waited_before_each_query() {
        let h = harness_with(
            RecordingSink::default(),
            ScriptedExecutor::answering(&[("metric=requests service=carts window=300", 42.0)]),
            StaticStore(Ok(sli_config())),
            HandlerConfig::new(Duration::from_secs(90)),
        );
        let begin = Instant::now();

        h.handler
            .run(&ctx(), &request(&["throughput", "errorrate", "throughput"]))
            .await
            .unwrap();

        let seen = h.executor.seen();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].1 - begin, Duration::from_secs(120));
        assert_eq!(seen[1].1 - seen[0].1, Duration::from_secs(120));
        assert_eq!(seen[2].1 - seen[1].1, Duration::from_secs(120));
        assert_eq!(Instant::now() - seen[2].1, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn other_provider_is_ignored() {
        let h = default_harness();
        let mut req = request(&["throughput"]);
        req.provider = "prometheus".into();

        h.handler.run(&ctx(), &req).await.unwrap();

        assert!(h.sink.signals().is_empty());
        assert!(h.executor.seen().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn config_failure_finishes_errored_with_labels() {
        let h = harness(
            RecordingSink::default(),
            ScriptedExecutor::default(),
            StaticStore(Err(())),
        );
        let mut req = request(&["throughput"]);
        let labels: Labels = [("buildId".to_string(), "42".to_string())].into();
        req.labels = Some(labels.clone());

        h.handler.run(&ctx(), &req).await.unwrap();

        let outcome = h.sink.finished();
        assert_eq!(outcome.status, StatusType::Errored);
        assert_eq!(outcome.result, ResultType::Failed);
        assert!(outcome.indicator_values.is_empty());
        assert_eq!(outcome.labels, labels);
        assert!(h.executor.seen().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn config_failure_without_labels_echoes_empty_map() {
        let h = harness(
            RecordingSink::default(),
            ScriptedExecutor::default(),
            StaticStore(Err(())),
        );

        h.handler
            .run(&ctx(), &request(&["throughput"]))
            .await
            .unwrap();

        assert!(h.sink.finished().labels.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_timestamp_aborts_without_finished() {
        let h = default_harness();
        let mut req = request(&["throughput"]);
        req.start = "abc".into();

        let err = h.handler.run(&ctx(), &req).await.unwrap_err();

        assert!(matches!(err, CoreError::InvalidTimestamp { ref value } if value == "abc"));
        assert_eq!(h.sink.signals(), vec![Signal::Started]);
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_query_aborts_without_finished() {
        let h = default_harness();

        let err = h
            .handler
            .run(&ctx(), &request(&["throughput", "broken"]))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::MalformedQuery { .. }));
        assert_eq!(h.sink.signals(), vec![Signal::Started]);
        assert_eq!(h.executor.seen().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn undefined_indicator_aborts_as_malformed() {
        let h = default_harness();

        let err = h
            .handler
            .run(&ctx(), &request(&["latency"]))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::MalformedQuery { .. }));
        assert_eq!(h.sink.signals(), vec![Signal::Started]);
    }

    #[tokio::test(start_paused = true)]
    async fn started_failure_stops_all_work() {
        let h = harness(
            RecordingSink {
                fail_started: true,
                ..Default::default()
            },
            ScriptedExecutor::default(),
            StaticStore(Ok(sli_config())),
        );

        let err = h
            .handler
            .run(&ctx(), &request(&["throughput"]))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::SignalEmission { phase: "started", .. }));
        assert!(h.executor.seen().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn finished_failure_is_propagated() {
        let h = harness(
            RecordingSink {
                fail_finished: true,
                ..Default::default()
            },
            ScriptedExecutor::answering(&[("metric=requests service=carts window=300", 1.0)]),
            StaticStore(Ok(sli_config())),
        );

        let err = h
            .handler
            .run(&ctx(), &request(&["throughput"]))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::SignalEmission { phase: "finished", .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn no_indicators_finishes_with_pass() {
        let h = default_harness();

        h.handler.run(&ctx(), &request(&[])).await.unwrap();

        let outcome = h.sink.finished();
        assert_eq!(outcome.status, StatusType::Succeeded);
        assert!(outcome.indicator_values.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn handles_only_get_sli_events() {
        let h = default_harness();
        let get_sli = TaskEvent::GetSliTriggered(request(&[]));
        let monitoring = TaskEvent::ConfigureMonitoringTriggered(Default::default());

        assert!(h.handler.supports(&get_sli));
        assert!(!h.handler.supports(&monitoring));

        h.handler.handle(&ctx(), get_sli).await.unwrap();
        let err = h.handler.handle(&ctx(), monitoring).await.unwrap_err();
        assert!(matches!(err, CoreError::NoHandler(_)));
    }
}
