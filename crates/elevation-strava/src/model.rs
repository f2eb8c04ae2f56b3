// File: crates/elevation-strava/src/model.rs
// Summary: Wire shapes of the Strava v3 responses this client reads.

use chrono::{DateTime, Utc};
use elevation_core::ActivitySummary;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryActivity {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub athlete: Option<MetaAthlete>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetaAthlete {
    pub id: i64,
}

impl From<SummaryActivity> for ActivitySummary {
    fn from(a: SummaryActivity) -> Self {
        let summary = ActivitySummary::new(a.id, a.name, a.start_date);
        match a.athlete {
            Some(athlete) => summary.with_athlete(athlete.id),
            None => summary,
        }
    }
}

/// `streams/...?key_by_type=true` answer. Strava adds a `distance` stream
/// alongside the requested one; only altitude is read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StreamSet {
    #[serde(default)]
    pub altitude: Option<AltitudeStream>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AltitudeStream {
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default)]
    pub series_type: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

impl StreamSet {
    pub fn into_elevation(self) -> Vec<f64> {
        self.altitude.map(|s| s.data).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_activity_listing() {
        let body = r#"[
            {"resource_state":2,"athlete":{"id":491188,"resource_state":1},
             "name":"Evening Ride","distance":24931.4,"type":"Ride",
             "id":154504250376,"start_date":"2024-06-14T17:12:09Z",
             "start_date_local":"2024-06-14T18:12:09Z","total_elevation_gain":310.0},
            {"id":154504250377,"name":"Lunch Walk","start_date":"2024-06-13T11:00:00Z"}
        ]"#;
        let parsed: Vec<SummaryActivity> = serde_json::from_str(body).unwrap();
        let summaries: Vec<ActivitySummary> = parsed.into_iter().map(Into::into).collect();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Evening Ride");
        assert_eq!(summaries[0].athlete_id, Some(491188));
        assert_eq!(summaries[0].start_date.to_rfc3339(), "2024-06-14T17:12:09+00:00");
        assert_eq!(summaries[1].athlete_id, None);
    }

    #[test]
    fn parses_altitude_stream() {
        let body = r#"{
            "distance":{"data":[0.0,12.5,25.1],"series_type":"distance","original_size":900,"resolution":"low"},
            "altitude":{"data":[101.2,101.8,103.0],"series_type":"distance","original_size":900,"resolution":"low"}
        }"#;
        let set: StreamSet = serde_json::from_str(body).unwrap();
        let alt = set.altitude.as_ref().unwrap();
        assert_eq!(alt.series_type.as_deref(), Some("distance"));
        assert_eq!(alt.resolution.as_deref(), Some("low"));
        assert_eq!(set.into_elevation(), vec![101.2, 101.8, 103.0]);
    }

    #[test]
    fn missing_altitude_is_empty() {
        let set: StreamSet = serde_json::from_str(r#"{"distance":{"data":[0.0]}}"#).unwrap();
        assert!(set.into_elevation().is_empty());
    }
}
