use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// First day Google Trends has data for
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2004, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parameters of an "interest over time" request
#[derive(Debug, Clone, PartialEq)]
pub struct TrendsQuery {
    pub keyword: String,
    pub start_time: NaiveDate,
    /// `None` means "until today"
    pub end_time: Option<NaiveDate>,
    /// `None` or an empty string means worldwide
    pub geo: Option<String>,
}

impl TrendsQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            start_time: default_start_date(),
            end_time: None,
            geo: None,
        }
    }

    pub fn with_geo(mut self, geo: Option<String>) -> Self {
        self.geo = geo.filter(|g| !g.trim().is_empty());
        self
    }

    pub fn with_end_time(mut self, end_time: NaiveDate) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn geo_or_worldwide(&self) -> &str {
        self.geo.as_deref().unwrap_or("")
    }

    /// Format the window the way the explore endpoint expects it: "YYYY-MM-DD YYYY-MM-DD"
    pub fn time_range(&self, today: NaiveDate) -> String {
        let end = self.end_time.unwrap_or(today);
        format!("{} {}", self.start_time.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
    }
}

/// `req` payload of the explore call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreRequest<'a> {
    pub comparison_item: Vec<ComparisonItem<'a>>,
    pub category: u32,
    pub property: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonItem<'a> {
    pub keyword: &'a str,
    pub geo: &'a str,
    pub time: String,
}

impl<'a> ExploreRequest<'a> {
    pub fn for_query(query: &'a TrendsQuery, today: NaiveDate) -> Self {
        Self {
            comparison_item: vec![ComparisonItem {
                keyword: &query.keyword,
                geo: query.geo_or_worldwide(),
                time: query.time_range(today),
            }],
            category: 0,
            property: "",
        }
    }
}

/// Explore response, reduced to the widgets list
#[derive(Debug, Clone, Deserialize)]
pub struct ExploreResponse {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Widget {
    #[serde(default)]
    pub id: String,
    pub token: Option<String>,
    pub request: Option<serde_json::Value>,
}

impl ExploreResponse {
    pub const TIMESERIES_WIDGET: &'static str = "TIMESERIES";

    /// The interest-over-time widget, or the first one if none is labelled
    pub fn timeseries_widget(&self) -> Option<&Widget> {
        self.widgets
            .iter()
            .find(|w| w.id == Self::TIMESERIES_WIDGET)
            .or_else(|| self.widgets.first())
    }
}

/// Drop the `)]}'` anti-JSON-hijacking line Google puts in front of API bodies
pub fn strip_xssi_prefix(body: &str) -> &str {
    let trimmed = body.trim_start();
    if !trimmed.starts_with(")]}'") {
        return body;
    }
    match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed[4..].trim_start_matches(','),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_defaults_to_today() {
        let query = TrendsQuery::new("rust");
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(query.time_range(today), "2004-01-01 2024-05-01");

        let bounded = query.with_end_time(NaiveDate::from_ymd_opt(2010, 12, 31).unwrap());
        assert_eq!(bounded.time_range(today), "2004-01-01 2010-12-31");
    }

    #[test]
    fn test_blank_geo_is_worldwide() {
        let query = TrendsQuery::new("rust").with_geo(Some("  ".to_string()));
        assert_eq!(query.geo, None);
        assert_eq!(query.geo_or_worldwide(), "");

        let query = TrendsQuery::new("rust").with_geo(Some("US".to_string()));
        assert_eq!(query.geo_or_worldwide(), "US");
    }

    #[test]
    fn test_explore_request_shape() {
        let query = TrendsQuery::new("pizza");
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let json = serde_json::to_value(ExploreRequest::for_query(&query, today)).unwrap();
        assert_eq!(json["comparisonItem"][0]["keyword"], "pizza");
        assert_eq!(json["comparisonItem"][0]["geo"], "");
        assert_eq!(json["comparisonItem"][0]["time"], "2004-01-01 2024-01-01");
        assert_eq!(json["category"], 0);
        assert_eq!(json["property"], "");
    }

    #[test]
    fn test_strip_xssi_prefix() {
        assert_eq!(strip_xssi_prefix(")]}'\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi_prefix(")]}',\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi_prefix("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi_prefix("<html>"), "<html>");
    }

    #[test]
    fn test_timeseries_widget_lookup() {
        let response: ExploreResponse = serde_json::from_str(
            r#"{"widgets":[{"id":"GEO_MAP","token":"a"},{"id":"TIMESERIES","token":"b","request":{}}]}"#,
        )
        .unwrap();
        assert_eq!(response.timeseries_widget().unwrap().token.as_deref(), Some("b"));

        let empty: ExploreResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.timeseries_widget().is_none());
    }
}
