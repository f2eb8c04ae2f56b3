// File: crates/elevation-core/src/error.rs
// Summary: Error taxonomy for fetching, rendering and the end-to-end pipeline.

use thiserror::Error;

/// Failure while talking to the activity source.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("access token rejected (HTTP {status})")]
    Unauthorized { status: u16 },
    #[error("rate limited by remote service")]
    RateLimited,
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether a retry has a reasonable chance of succeeding.
    /// Rate limits span minutes, so a quick retry only burns quota.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Transport(_) => true,
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::RateLimited | FetchError::Unauthorized { .. } | FetchError::Decode(_) => false,
        }
    }
}

/// Render preconditions and backend failures.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("profile needs at least 2 samples to draw a line, got {0}")]
    TooFewSamples(usize),
    #[error("profile is flat at {0} m; vertical range is zero")]
    FlatProfile(f64),
    #[error("sample {0} is not a finite number")]
    NonFiniteSample(usize),
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: i32, height: i32 },
    #[error("failed to create raster surface")]
    Surface,
    #[error("encode PNG failed")]
    Encode,
    #[error("writing image: {0}")]
    Io(#[from] std::io::Error),
}

/// Which fetch step failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchStage {
    Summaries,
    Elevation { activity_id: i64 },
}

impl std::fmt::Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStage::Summaries => write!(f, "activity summaries"),
            FetchStage::Elevation { activity_id } => {
                write!(f, "elevation stream for activity {activity_id}")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("error retrieving {stage}")]
    Fetch {
        stage: FetchStage,
        #[source]
        source: FetchError,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}
