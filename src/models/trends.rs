//! Interest-over-time payloads and the normalized series built from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top level of the widget data body: `{ "default": { "timelineData": [...] } }`
#[derive(Debug, Clone, Deserialize)]
pub struct TrendsEnvelope {
    pub default: Option<TimelinePayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePayload {
    #[serde(default)]
    pub timeline_data: Vec<TimelineEntry>,
}

/// One entry of `timelineData`, passed back to clients as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_axis_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_data: Option<Vec<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_partial: Option<bool>,
}

/// A single observation of a series
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp: Option<DateTime<Utc>>,
    pub values: Vec<f64>,
}

impl TimeSeriesPoint {
    pub fn new(values: Vec<f64>) -> Self {
        Self { timestamp: None, values }
    }

    /// Primary value: the first dimension, 0 when the point has none
    pub fn value(&self) -> f64 {
        self.values.first().copied().unwrap_or(0.0)
    }
}

impl From<&TimelineEntry> for TimeSeriesPoint {
    fn from(entry: &TimelineEntry) -> Self {
        let timestamp = entry
            .time
            .as_deref()
            .and_then(|t| t.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

        Self {
            timestamp,
            values: entry.value.clone().unwrap_or_default(),
        }
    }
}

/// Chronologically ordered points for one keyword
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// A line needs two endpoints
    pub const MIN_CHARTABLE_POINTS: usize = 2;

    pub fn from_points(points: Vec<TimeSeriesPoint>) -> Self {
        Self { points }
    }

    pub fn from_entries(entries: &[TimelineEntry]) -> Self {
        Self::from_points(entries.iter().map(TimeSeriesPoint::from).collect())
    }

    /// Shorthand for single-dimension series
    pub fn from_values(values: &[f64]) -> Self {
        Self::from_points(values.iter().map(|v| TimeSeriesPoint::new(vec![*v])).collect())
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(TimeSeriesPoint::value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_chartable(&self) -> bool {
        self.points.len() >= Self::MIN_CHARTABLE_POINTS
    }
}
