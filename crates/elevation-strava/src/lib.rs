// File: crates/elevation-strava/src/lib.rs
// Summary: reqwest-backed Strava client: activity listing and low-resolution altitude streams.

mod model;
mod retry;

use std::time::Duration;

use async_trait::async_trait;
use elevation_core::{ActivitySource, ActivitySummary, FetchError, TimeWindow};
use serde::de::DeserializeOwned;
use tracing::debug;

pub use retry::RetryPolicy;

use model::{StreamSet, SummaryActivity};

pub const DEFAULT_BASE_URL: &str = "https://www.strava.com/api/v3";
/// Largest page Strava serves; the window is fetched as a single page.
pub const PAGE_SIZE: u32 = 200;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct StravaConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl StravaConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    retry: RetryPolicy,
}

impl StravaClient {
    pub fn new(config: StravaConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.access_token,
            retry: config.retry,
        })
    }

    fn activities_url(&self) -> String {
        format!("{}/athlete/activities", self.base_url)
    }

    fn altitude_stream_url(&self, activity_id: i64) -> String {
        format!("{}/activities/{}/streams/altitude", self.base_url, activity_id)
    }

    /// One GET with bearer auth, decoded as JSON. Retries transient failures.
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        self.retry
            .run(url, || async move {
                let response = self
                    .http
                    .get(url)
                    .bearer_auth(&self.token)
                    .header("Accept", "application/json")
                    .query(query)
                    .send()
                    .await
                    .map_err(map_transport)?;

                let status = response.status();
                let body = response.text().await.map_err(map_transport)?;
                if !status.is_success() {
                    return Err(status_error(status.as_u16(), body));
                }
                serde_json::from_str::<T>(&body).map_err(|e| FetchError::Decode(e.to_string()))
            })
            .await
    }
}

fn map_transport(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}

fn status_error(status: u16, body: String) -> FetchError {
    match status {
        401 | 403 => FetchError::Unauthorized { status },
        429 => FetchError::RateLimited,
        _ => FetchError::Status { status, body },
    }
}

#[async_trait]
impl ActivitySource for StravaClient {
    /// Strava scopes `/athlete/activities` to the token's owner; `athlete_id`
    /// is checked by the caller against what comes back.
    async fn list_activities(
        &self,
        athlete_id: i64,
        window: TimeWindow,
    ) -> Result<Vec<ActivitySummary>, FetchError> {
        debug!(athlete = athlete_id, after = %window.after, before = %window.before, "listing activities");
        let query = [
            ("before", window.before.timestamp().to_string()),
            ("after", window.after.timestamp().to_string()),
            ("per_page", PAGE_SIZE.to_string()),
        ];
        let listing: Vec<SummaryActivity> = self.get_json(&self.activities_url(), &query).await?;
        Ok(listing.into_iter().map(Into::into).collect())
    }

    async fn fetch_elevation(&self, activity_id: i64) -> Result<Vec<f64>, FetchError> {
        let query = [
            ("resolution", "low".to_string()),
            ("series_type", "distance".to_string()),
            ("key_by_type", "true".to_string()),
        ];
        let set: StreamSet = self.get_json(&self.altitude_stream_url(activity_id), &query).await?;
        if let Some(alt) = &set.altitude {
            debug!(
                activity = activity_id,
                samples = alt.data.len(),
                series_type = alt.series_type.as_deref().unwrap_or("?"),
                resolution = alt.resolution.as_deref().unwrap_or("?"),
                "altitude stream"
            );
        } else {
            debug!(activity = activity_id, "activity has no altitude stream");
        }
        Ok(set.into_elevation())
    }
}
