// File: crates/drawstrava/src/settings.rs
// Summary: Layered run settings (defaults < TOML file < DRAWSTRAVA_* env < flags) and token resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use elevation_core::types::{
    DEFAULT_FETCH_CONCURRENCY, DEFAULT_OUTPUT, DEFAULT_WINDOW_DAYS, HEIGHT, LINE_WIDTH, ONE_WAY_FRACTION, WIDTH,
};
use elevation_core::{theme, CanvasSize, PipelineConfig, RenderOptions, Theme};
use elevation_strava::{RetryPolicy, StravaConfig, DEFAULT_BASE_URL};
use serde::Deserialize;
use tracing::warn;

use crate::cli::{Cli, PolicyOpt};

pub const TOKEN_ENV: &str = "STRAVATOKEN";
pub const DEFAULT_ATHLETE: i64 = 491188;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    pub athlete: i64,
    pub token: Option<String>,
    pub output: PathBuf,
    pub days: i64,
    pub width: i32,
    pub height: i32,
    pub line_width: f32,
    pub theme: String,
    pub one_way_policy: PolicyOpt,
    pub one_way_fraction: f64,
    pub fetch_concurrency: usize,
    pub strava: StravaSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            athlete: DEFAULT_ATHLETE,
            token: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            days: DEFAULT_WINDOW_DAYS,
            width: WIDTH,
            height: HEIGHT,
            line_width: LINE_WIDTH,
            theme: "print".to_string(),
            one_way_policy: PolicyOpt::default(),
            one_way_fraction: ONE_WAY_FRACTION,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            strava: StravaSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StravaSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for StravaSettings {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_attempts: retry.max_attempts,
            backoff_ms: retry.base_delay.as_millis() as u64,
        }
    }
}

/// Read the optional settings file and `DRAWSTRAVA_*` environment overrides
/// (`DRAWSTRAVA_STRAVA__TIMEOUT_SECS=10` for nested keys).
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    let settings = builder
        .add_source(
            config::Environment::with_prefix("DRAWSTRAVA")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| match path {
            Some(p) => format!("loading settings from {}", p.display()),
            None => "loading settings from environment".to_string(),
        })?;
    Ok(settings.try_deserialize()?)
}

/// Flags win over the file/env layers.
pub fn apply_cli(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(a) = cli.athlete { settings.athlete = a; }
    if let Some(o) = &cli.output { settings.output = o.clone(); }
    if let Some(d) = cli.days { settings.days = d; }
    if let Some(w) = cli.width { settings.width = w; }
    if let Some(h) = cli.height { settings.height = h; }
    if let Some(p) = cli.one_way_policy { settings.one_way_policy = p; }
    settings
}

/// First non-blank of: the `--token` flag, the environment variable, the settings file.
pub fn resolve_token(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> Option<String> {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.days <= 0 {
            bail!("days must be positive, got {}", self.days);
        }
        if !CanvasSize::new(self.width, self.height).is_valid() {
            bail!("canvas must be positive, got {}x{}", self.width, self.height);
        }
        if self.fetch_concurrency == 0 {
            bail!("fetch_concurrency must be at least 1");
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            bail!("line_width must be a positive number, got {}", self.line_width);
        }
        if !(self.one_way_fraction.is_finite() && self.one_way_fraction >= 0.0) {
            bail!("one_way_fraction must be a non-negative number, got {}", self.one_way_fraction);
        }
        if self.strava.timeout_secs == 0 {
            bail!("strava.timeout_secs must be at least 1");
        }
        if self.strava.max_attempts == 0 {
            bail!("strava.max_attempts must be at least 1");
        }
        Ok(())
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut cfg = PipelineConfig::new(self.athlete);
        cfg.window_days = self.days;
        cfg.fetch_concurrency = self.fetch_concurrency;
        cfg.one_way_policy = self.one_way_policy.into();
        cfg.one_way_fraction = self.one_way_fraction;
        cfg.render = RenderOptions {
            size: CanvasSize::new(self.width, self.height),
            line_width: self.line_width,
            theme: theme::find(&self.theme).unwrap_or_else(|| {
                warn!(theme = %self.theme, "unknown theme, using print");
                Theme::default()
            }),
        };
        cfg.output_path = self.output.clone();
        cfg
    }

    pub fn strava_config(&self, token: String) -> StravaConfig {
        let mut cfg = StravaConfig::new(token);
        cfg.base_url = self.strava.base_url.clone();
        cfg.timeout = Duration::from_secs(self.strava.timeout_secs);
        cfg.retry = RetryPolicy {
            max_attempts: self.strava.max_attempts,
            base_delay: Duration::from_millis(self.strava.backoff_ms),
            ..RetryPolicy::default()
        };
        cfg
    }
}
