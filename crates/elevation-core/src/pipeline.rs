// File: crates/elevation-core/src/pipeline.rs
// Summary: Orchestrates fetch -> merge -> render for one run.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use crate::activity::ActivityRecord;
use crate::error::{FetchStage, PipelineError};
use crate::merge::{MergedStream, OneWayPolicy, StreamMerger};
use crate::render::{ProfileChart, RenderOptions};
use crate::source::{ActivitySource, TimeWindow};
use crate::types::{DEFAULT_FETCH_CONCURRENCY, DEFAULT_OUTPUT, DEFAULT_WINDOW_DAYS, ONE_WAY_FRACTION};

/// Everything one run needs; built by the caller, nothing is read from the environment.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub athlete_id: i64,
    pub window_days: i64,
    pub fetch_concurrency: usize,
    pub one_way_policy: OneWayPolicy,
    pub one_way_fraction: f64,
    pub render: RenderOptions,
    pub output_path: PathBuf,
}

impl PipelineConfig {
    pub fn new(athlete_id: i64) -> Self {
        Self {
            athlete_id,
            window_days: DEFAULT_WINDOW_DAYS,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            one_way_policy: OneWayPolicy::default(),
            one_way_fraction: ONE_WAY_FRACTION,
            render: RenderOptions::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    fn merger(&self) -> StreamMerger {
        StreamMerger { policy: self.one_way_policy, fraction: self.one_way_fraction }
    }
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub activities: usize,
    pub samples: usize,
    pub one_way: usize,
    pub output_path: PathBuf,
}

pub struct Pipeline<S: ?Sized> {
    source: Arc<S>,
    config: PipelineConfig,
}

impl<S: ActivitySource + ?Sized> Pipeline<S> {
    pub fn new(source: Arc<S>, config: PipelineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PipelineConfig { &self.config }

    /// Full run over the trailing window ending now.
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        self.run_at(Utc::now()).await
    }

    /// Full run over the window ending at `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunReport, PipelineError> {
        let records = self.fetch_records(now).await?;
        let merged = self.merge(&records);
        for (tag, samples) in merged.segments() {
            debug!(activity = %tag.source_name, samples = samples.len(), one_way = tag.is_one_way, "segment");
        }
        ProfileChart::new(&merged).render_to_png(&self.config.render, &self.config.output_path)?;

        let report = RunReport {
            activities: records.len(),
            samples: merged.len(),
            one_way: merged.one_way_count(),
            output_path: self.config.output_path.clone(),
        };
        info!(
            activities = report.activities,
            samples = report.samples,
            one_way = report.one_way,
            "wrote {}",
            report.output_path.display()
        );
        Ok(report)
    }

    /// Fetch summaries and their elevation streams, oldest activity first.
    pub async fn fetch_records(&self, now: DateTime<Utc>) -> Result<Vec<ActivityRecord>, PipelineError> {
        let window = TimeWindow::trailing_days(now, self.config.window_days);
        let mut summaries = self
            .source
            .list_activities(self.config.athlete_id, window)
            .await
            .map_err(|source| PipelineError::Fetch { stage: FetchStage::Summaries, source })?;
        info!(
            athlete = self.config.athlete_id,
            count = summaries.len(),
            "listed activities since {}",
            window.after.format("%Y-%m-%d")
        );

        for s in &summaries {
            if let Some(owner) = s.athlete_id.filter(|&a| a != self.config.athlete_id) {
                warn!(activity = s.id, owner, "activity belongs to a different athlete than configured");
            }
        }
        // The service's listing order is not relied upon.
        summaries.sort_by_key(|s| s.start_date);

        // `buffered` yields in input order regardless of completion order.
        let source = &self.source;
        stream::iter(summaries)
            .map(|summary| async move {
                let activity_id = summary.id;
                ActivityRecord::fetch(source.as_ref(), summary)
                    .await
                    .map_err(|source| PipelineError::Fetch {
                        stage: FetchStage::Elevation { activity_id },
                        source,
                    })
            })
            .buffered(self.config.fetch_concurrency.max(1))
            .try_collect()
            .await
    }

    pub fn merge(&self, records: &[ActivityRecord]) -> MergedStream {
        self.config.merger().merge(records)
    }
}
