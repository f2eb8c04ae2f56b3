// File: crates/elevation-core/src/merge.rs
// Summary: Stitches per-activity elevation traces into one continuous profile with boundary tags.
// Notes:
// - Each activity's absolute elevation origin drifts independently (GPS/baro), so every
//   segment is shifted to continue from the last merged sample.
// - One-way activities (pure climbs or descents) are anchored at their last sample instead
//   of their first.

use tracing::debug;

use crate::activity::{ActivityRecord, ActivityStats};
use crate::types::ONE_WAY_FRACTION;

/// How "one-way" is decided from an activity's stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OneWayPolicy {
    /// `|start - end| > fraction * max - min`. Long-standing behavior; note that
    /// `min` is not scaled, so high-altitude activities rarely qualify.
    #[default]
    Literal,
    /// `|start - end| > fraction * (max - min)`.
    RangeFraction,
}

impl OneWayPolicy {
    pub fn threshold(&self, stats: &ActivityStats, fraction: f64) -> f64 {
        match self {
            OneWayPolicy::Literal => fraction * stats.max - stats.min,
            OneWayPolicy::RangeFraction => fraction * (stats.max - stats.min),
        }
    }

    pub fn is_one_way(&self, stats: &ActivityStats, fraction: f64) -> bool {
        (stats.start - stats.end).abs() > self.threshold(stats, fraction)
    }
}

/// Marks where one activity's samples begin inside a [`MergedStream`].
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryTag {
    pub source_name: String,
    pub start_index: usize,
    pub is_one_way: bool,
}

/// Concatenated, offset-corrected elevation profile.
/// Contract: tags are in merge order, `tags[0].start_index == 0`, start indices are
/// non-decreasing and never exceed `data.len()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedStream {
    pub data: Vec<f64>,
    pub tags: Vec<BoundaryTag>,
}

impl MergedStream {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Last merged elevation, or 0 before anything was merged.
    pub fn last_elevation(&self) -> f64 {
        self.data.last().copied().unwrap_or(0.0)
    }

    pub fn one_way_count(&self) -> usize {
        self.tags.iter().filter(|t| t.is_one_way).count()
    }

    /// Each tag with the slice of samples it contributed (possibly empty).
    pub fn segments(&self) -> impl Iterator<Item = (&BoundaryTag, &[f64])> + '_ {
        self.tags.iter().enumerate().map(move |(k, tag)| {
            let end = self.tags.get(k + 1).map_or(self.data.len(), |next| next.start_index);
            (tag, &self.data[tag.start_index..end])
        })
    }
}

/// Merges activities in the order given, which must be chronological (oldest first).
#[derive(Clone, Copy, Debug)]
pub struct StreamMerger {
    pub policy: OneWayPolicy,
    pub fraction: f64,
}

impl Default for StreamMerger {
    fn default() -> Self {
        Self { policy: OneWayPolicy::default(), fraction: ONE_WAY_FRACTION }
    }
}

impl StreamMerger {
    pub fn new(policy: OneWayPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    pub fn merge<'a, I>(&self, records: I) -> MergedStream
    where
        I: IntoIterator<Item = &'a ActivityRecord>,
    {
        let mut merged = MergedStream::new();
        for record in records {
            self.append(&mut merged, record);
        }
        merged
    }

    /// Appends one record's samples, shifted to continue from the current end.
    pub fn append(&self, merged: &mut MergedStream, record: &ActivityRecord) {
        let start_index = merged.data.len();
        let Some(stats) = record.stats() else {
            debug!(activity = record.id(), name = record.name(), "no elevation samples; zero-length segment");
            merged.tags.push(BoundaryTag {
                source_name: record.name().to_string(),
                start_index,
                is_one_way: false,
            });
            return;
        };

        let is_one_way = self.policy.is_one_way(&stats, self.fraction);
        let (anchor_index, anchor) = if is_one_way {
            (record.len() - 1, stats.end)
        } else {
            (0, stats.start)
        };
        let last = merged.last_elevation();
        let offset = anchor - last;
        debug!(
            activity = record.id(),
            name = record.name(),
            samples = record.len(),
            is_one_way,
            offset,
            "merging segment"
        );

        merged.tags.push(BoundaryTag {
            source_name: record.name().to_string(),
            start_index,
            is_one_way,
        });
        merged.data.extend(record.elevation().iter().map(|v| v - offset));
        // `a - (a - b)` can be off by an ulp; pin the join to the previous end.
        merged.data[start_index + anchor_index] = last;
    }
}

/// Merge with the default policy.
pub fn merge_records(records: &[ActivityRecord]) -> MergedStream {
    StreamMerger::default().merge(records)
}
