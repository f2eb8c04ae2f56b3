// File: crates/drawstrava/src/cli.rs
// Summary: Command-line flags, including the legacy single-dash spellings.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use elevation_core::OneWayPolicy;
use serde::Deserialize;

/// Long flags that used to be spelled with a single dash (`-token abc`).
const LEGACY_LONG_FLAGS: &[&str] = &["activity", "athlete", "token"];

#[derive(Parser, Debug)]
#[command(
    name = "drawstrava",
    version,
    about = "Draw the last weeks of Strava elevation as one continuous profile",
    long_about = None
)]
pub struct Cli {
    /// Strava activity id (accepted for compatibility; not used)
    #[arg(long, default_value_t = 1121238188)]
    pub activity: i64,

    /// Strava athlete id
    #[arg(long)]
    pub athlete: Option<i64>,

    /// Access token; falls back to the STRAVATOKEN environment variable.
    /// One can be found at https://www.strava.com/settings/api
    #[arg(long)]
    pub token: Option<String>,

    /// Output PNG path
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Trailing window in days
    #[arg(long)]
    pub days: Option<i64>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<i32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<i32>,

    /// How one-way (climb-only / descent-only) activities are detected
    #[arg(long, value_enum)]
    pub one_way_policy: Option<PolicyOpt>,

    /// Optional TOML settings file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyOpt {
    /// |start - end| > 0.25 * max - min
    #[default]
    Literal,
    /// |start - end| > 0.25 * (max - min)
    RangeFraction,
}

impl From<PolicyOpt> for OneWayPolicy {
    fn from(p: PolicyOpt) -> Self {
        match p {
            PolicyOpt::Literal => OneWayPolicy::Literal,
            PolicyOpt::RangeFraction => OneWayPolicy::RangeFraction,
        }
    }
}

/// Rewrite `-token x` / `-athlete=5` into their `--` forms so old invocations keep working.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(s) = arg.to_str() else { return arg };
            let Some(rest) = s.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split('=').next().unwrap_or(rest);
            if LEGACY_LONG_FLAGS.contains(&name) {
                OsString::from(format!("--{rest}"))
            } else {
                arg
            }
        })
        .collect()
}
