// File: crates/elevation-core/src/source.rs
// Summary: Fetch seam between the pipeline and the remote activity service.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::activity::{ActivityRecord, ActivitySummary};
use crate::error::FetchError;

/// Half-open time range `[after, before)` used to list activities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    pub after: DateTime<Utc>,
    pub before: DateTime<Utc>,
}

impl TimeWindow {
    /// The `days` days leading up to `now`.
    pub fn trailing_days(now: DateTime<Utc>, days: i64) -> Self {
        Self { after: now - Duration::days(days), before: now }
    }
}

#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// List activities of `athlete_id` that started inside `window`.
    /// No ordering is assumed by callers.
    async fn list_activities(
        &self,
        athlete_id: i64,
        window: TimeWindow,
    ) -> Result<Vec<ActivitySummary>, FetchError>;

    /// Low-resolution, distance-indexed altitude samples of one activity.
    /// An activity without altitude data yields an empty vector.
    async fn fetch_elevation(&self, activity_id: i64) -> Result<Vec<f64>, FetchError>;
}

impl ActivityRecord {
    /// Fetch the altitude stream for `summary` and pair the two.
    pub async fn fetch<S: ActivitySource + ?Sized>(
        source: &S,
        summary: ActivitySummary,
    ) -> Result<Self, FetchError> {
        let elevation = source.fetch_elevation(summary.id).await?;
        Ok(Self::new(summary, elevation))
    }
}
