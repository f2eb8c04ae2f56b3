// File: crates/elevation-core/src/lib.rs
// Summary: Core library entry point; exports activity model, stream merging, rendering and pipeline.

pub mod activity;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod render;
pub mod scale;
pub mod source;
pub mod theme;
pub mod types;

pub use activity::{ActivityRecord, ActivityStats, ActivitySummary};
pub use error::{FetchError, FetchStage, PipelineError, RenderError};
pub use merge::{merge_records, BoundaryTag, MergedStream, OneWayPolicy, StreamMerger};
pub use pipeline::{Pipeline, PipelineConfig, RunReport};
pub use render::{ProfileChart, RenderOptions};
pub use scale::ProfileScale;
pub use source::{ActivitySource, TimeWindow};
pub use theme::Theme;
pub use types::CanvasSize;
