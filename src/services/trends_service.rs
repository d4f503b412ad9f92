use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::api::google_trends::{TrendsProvider, TrendsQuery};
use crate::models::{TimeSeries, TimelineEntry, TrendsEnvelope};
use crate::utils::errors::{body_snippet, MalformedPayload, TrendsError};

/// Fetches interest-over-time data for one keyword per call
pub struct TrendsFetcher {
    provider: Arc<dyn TrendsProvider>,
    deadline: Duration,
}

impl TrendsFetcher {
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

    pub fn new(provider: Arc<dyn TrendsProvider>, deadline: Duration) -> Self {
        Self { provider, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Raw timeline entries for the query, possibly empty.
    ///
    /// Makes exactly one provider call, and none at all for a blank keyword.
    pub async fn fetch_timeline(&self, query: &TrendsQuery) -> Result<Vec<TimelineEntry>, TrendsError> {
        if query.keyword.trim().is_empty() {
            warn!("Rejecting trends query with an empty keyword");
            return Err(TrendsError::MissingInput);
        }

        debug!(
            "Fetching interest over time for '{}' (geo: '{}', start: {})",
            query.keyword,
            query.geo_or_worldwide(),
            query.start_time
        );

        let body = match tokio::time::timeout(self.deadline, self.provider.interest_over_time(query)).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                error!("Failed to fetch Google Trends data for '{}': {}", query.keyword, e);
                return Err(e.into());
            }
            Err(_) => {
                error!(
                    "Google Trends did not answer for '{}' within {} ms",
                    query.keyword,
                    self.deadline.as_millis()
                );
                return Err(TrendsError::UpstreamUnavailable(format!(
                    "no response within {} ms",
                    self.deadline.as_millis()
                )));
            }
        };

        parse_timeline(&body).map_err(|e| {
            error!("Failed to parse Google Trends response for '{}': {}", query.keyword, e);
            error!("Response snippet: {}", body_snippet(&body, 200));
            e
        })
    }

    /// Normalized series for the query; rejects anything that cannot be charted
    pub async fn fetch_series(&self, query: &TrendsQuery) -> Result<TimeSeries, TrendsError> {
        let entries = self.fetch_timeline(query).await?;
        let series = TimeSeries::from_entries(&entries);

        if !series.is_chartable() {
            warn!("Only {} trend point(s) for '{}'", series.len(), query.keyword);
            return Err(TrendsError::InsufficientData { points: series.len() });
        }

        Ok(series)
    }
}

/// Parse a widget data body into its timeline entries
///
/// Markup is rejected before any JSON parsing. A missing `timelineData` array
/// is an empty timeline; a missing `default` object is malformed.
pub fn parse_timeline(body: &str) -> Result<Vec<TimelineEntry>, TrendsError> {
    let trimmed = body.trim_start();

    if trimmed.starts_with('<') {
        return Err(TrendsError::UpstreamMalformed(MalformedPayload::Markup));
    }

    let envelope: TrendsEnvelope = serde_json::from_str(trimmed)
        .map_err(|e| TrendsError::UpstreamMalformed(MalformedPayload::Unparsable(e.to_string())))?;

    let payload = envelope
        .default
        .ok_or(TrendsError::UpstreamMalformed(MalformedPayload::MissingField("default")))?;

    Ok(payload.timeline_data)
}
