// File: crates/elevation-core/tests/pipeline.rs
// Purpose: Orchestration against an in-memory activity source.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use elevation_core::{
    ActivitySource, ActivitySummary, FetchError, FetchStage, Pipeline, PipelineConfig,
    PipelineError, RenderError, TimeWindow,
};

struct MemorySource {
    summaries: Vec<ActivitySummary>,
    streams: HashMap<i64, Vec<f64>>,
    failing: Option<i64>,
    /// Stream delay per activity, to shuffle completion order.
    delays_ms: HashMap<i64, u64>,
    seen_window: Mutex<Option<TimeWindow>>,
}

impl MemorySource {
    fn new(summaries: Vec<ActivitySummary>, streams: &[(i64, Vec<f64>)]) -> Self {
        Self {
            summaries,
            streams: streams.iter().cloned().collect(),
            failing: None,
            delays_ms: HashMap::new(),
            seen_window: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ActivitySource for MemorySource {
    async fn list_activities(
        &self,
        _athlete_id: i64,
        window: TimeWindow,
    ) -> Result<Vec<ActivitySummary>, FetchError> {
        *self.seen_window.lock().unwrap() = Some(window);
        Ok(self.summaries.clone())
    }

    async fn fetch_elevation(&self, activity_id: i64) -> Result<Vec<f64>, FetchError> {
        if let Some(ms) = self.delays_ms.get(&activity_id) {
            tokio::time::sleep(StdDuration::from_millis(*ms)).await;
        }
        if self.failing == Some(activity_id) {
            return Err(FetchError::Status { status: 500, body: "boom".into() });
        }
        Ok(self.streams.get(&activity_id).cloned().unwrap_or_default())
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap()
}

fn summary(id: i64, days_ago: i64) -> ActivitySummary {
    ActivitySummary::new(id, format!("activity {id}"), now() - Duration::days(days_ago))
}

fn config(name: &str) -> PipelineConfig {
    let mut cfg = PipelineConfig::new(491188);
    cfg.output_path = PathBuf::from(format!("target/test_out/pipeline_{name}.png"));
    let _ = std::fs::remove_file(&cfg.output_path);
    cfg
}

#[tokio::test]
async fn newest_first_listing_is_merged_oldest_first() {
    // listed newest first, the way the service usually answers
    let summaries = vec![summary(3, 1), summary(2, 4), summary(1, 9)];
    let mut source = MemorySource::new(
        summaries,
        &[(1, vec![1.0, 2.0]), (2, vec![5.0, 6.0, 7.0]), (3, vec![9.0, 8.0, 7.5, 7.0])],
    );
    // oldest stream arrives last
    source.delays_ms.insert(1, 40);
    let pipeline = Pipeline::new(Arc::new(source), config("order"));

    let records = pipeline.fetch_records(now()).await.expect("fetch");
    let ids: Vec<i64> = records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(records[0].elevation(), &[1.0, 2.0]);

    let merged = pipeline.merge(&records);
    let starts: Vec<usize> = merged.tags.iter().map(|t| t.start_index).collect();
    assert_eq!(starts, vec![0, 2, 5]);
    assert_eq!(merged.tags[0].source_name, "activity 1");
}

#[tokio::test]
async fn run_writes_png_and_reports() {
    let source = MemorySource::new(
        vec![summary(2, 2), summary(1, 3)],
        &[(1, vec![100.0, 140.0, 120.0]), (2, vec![300.0, 250.0, 310.0, 305.0])],
    );
    let cfg = config("run");
    let out = cfg.output_path.clone();
    let source = Arc::new(source);
    let pipeline = Pipeline::new(source.clone(), cfg);

    let report = pipeline.run_at(now()).await.expect("run");
    assert_eq!(report.activities, 2);
    assert_eq!(report.samples, 7);
    assert_eq!(report.output_path, out);
    assert!(out.exists());

    let window = (*source.seen_window.lock().unwrap()).expect("window recorded");
    assert_eq!(window.before, now());
    assert_eq!(window.after, now() - Duration::days(14));
}

#[tokio::test]
async fn stream_failure_aborts_without_output() {
    let mut source = MemorySource::new(
        vec![summary(1, 3), summary(2, 2)],
        &[(1, vec![1.0, 2.0]), (2, vec![3.0, 4.0])],
    );
    source.failing = Some(2);
    let cfg = config("fail");
    let out = cfg.output_path.clone();
    let pipeline = Pipeline::new(Arc::new(source), cfg);

    let err = pipeline.run_at(now()).await.unwrap_err();
    match err {
        PipelineError::Fetch { stage, source } => {
            assert_eq!(stage, FetchStage::Elevation { activity_id: 2 });
            assert!(source.is_transient());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.exists());
}

#[tokio::test]
async fn no_activities_is_a_render_precondition() {
    let source = MemorySource::new(Vec::new(), &[]);
    let cfg = config("empty");
    let out = cfg.output_path.clone();
    let pipeline = Pipeline::new(Arc::new(source), cfg);

    let err = pipeline.run_at(now()).await.unwrap_err();
    assert!(matches!(err, PipelineError::Render(RenderError::TooFewSamples(0))));
    assert!(!out.exists());
}

#[tokio::test]
async fn pipeline_accepts_trait_objects() {
    let source: Arc<dyn ActivitySource> = Arc::new(MemorySource::new(
        vec![summary(1, 1)],
        &[(1, vec![10.0, 20.0, 15.0])],
    ));
    let pipeline = Pipeline::new(source, config("dyn"));
    let records = pipeline.fetch_records(now()).await.expect("fetch");
    assert_eq!(records.len(), 1);
}
