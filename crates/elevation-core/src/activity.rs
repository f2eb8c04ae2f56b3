// File: crates/elevation-core/src/activity.rs
// Summary: Activity record model (summary + elevation samples) and derived elevation stats.

use chrono::{DateTime, Utc};

/// Metadata of one activity as listed by the remote service.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivitySummary {
    pub id: i64,
    pub name: String,
    pub start_date: DateTime<Utc>,
    /// Owning athlete, when the service reports it.
    pub athlete_id: Option<i64>,
}

impl ActivitySummary {
    pub fn new(id: i64, name: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self { id, name: name.into(), start_date, athlete_id: None }
    }

    pub fn with_athlete(mut self, athlete_id: i64) -> Self {
        self.athlete_id = Some(athlete_id);
        self
    }
}

/// Elevation extremes and endpoints of one activity, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivityStats {
    pub max: f64,
    pub min: f64,
    pub start: f64,
    pub end: f64,
}

impl ActivityStats {
    /// Single pass over `samples`. `None` when there is nothing to measure.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let (&start, &end) = (samples.first()?, samples.last()?);
        let mut max = start;
        let mut min = start;
        for &v in samples {
            if v > max { max = v; }
            if v < min { min = v; }
        }
        Some(Self { max, min, start, end })
    }
}

/// A fetched activity: its summary plus the low-resolution altitude samples.
/// Immutable once built; merging reads it and produces new data.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityRecord {
    summary: ActivitySummary,
    elevation: Vec<f64>,
}

impl ActivityRecord {
    pub fn new(summary: ActivitySummary, elevation: Vec<f64>) -> Self {
        Self { summary, elevation }
    }

    pub fn summary(&self) -> &ActivitySummary { &self.summary }

    pub fn id(&self) -> i64 { self.summary.id }

    pub fn name(&self) -> &str { &self.summary.name }

    pub fn elevation(&self) -> &[f64] { &self.elevation }

    pub fn len(&self) -> usize { self.elevation.len() }

    pub fn is_empty(&self) -> bool { self.elevation.is_empty() }

    /// Recomputed on every call; `None` for a record without samples.
    pub fn stats(&self) -> Option<ActivityStats> {
        ActivityStats::from_samples(&self.elevation)
    }
}
