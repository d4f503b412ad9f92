use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, warn};

use super::models::{strip_xssi_prefix, ExploreRequest, ExploreResponse, TrendsQuery};
use super::provider::TrendsProvider;
use crate::api::ApiError;

/// Google Trends client for the interest-over-time widget
pub struct GoogleTrendsClient {
    http_client: HttpClient,
    base_url: String,
    hl: String,
    tz: i32,
}

/// Token and request body handed out by the explore call
struct TimeseriesWidget {
    token: String,
    request: serde_json::Value,
}

impl GoogleTrendsClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://trends.google.com";

    /// Create a new client against the public Google Trends host
    pub fn new(hl: String, tz: i32) -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string(), hl, tz)
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String, hl: String, tz: i32) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            hl,
            tz,
        }
    }

    /// Grab a session cookie from the landing page.
    ///
    /// Google answers explore calls without one with 429.
    async fn fetch_cookie(&self) -> Result<Option<String>, ApiError> {
        let response = self
            .http_client
            .get(format!("{}/", self.base_url))
            .query(&[("geo", "US")])
            .send()
            .await?;

        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(|pair| pair.trim().to_string())
            .find(|pair| !pair.is_empty());

        debug!("Google Trends session cookie acquired: {}", cookie.is_some());
        Ok(cookie)
    }

    async fn send_explore(
        &self,
        req_json: &str,
        cookie: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let tz = self.tz.to_string();
        let mut request = self
            .http_client
            .get(format!("{}/trends/api/explore", self.base_url))
            .query(&[("hl", self.hl.as_str()), ("tz", tz.as_str()), ("req", req_json)]);

        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        Ok(request.send().await?)
    }

    /// GET /trends/api/explore
    ///
    /// Resolves the widget token needed for the data call. Returns the cookie
    /// that was used, if the first attempt was rate limited.
    async fn explore(
        &self,
        query: &TrendsQuery,
    ) -> Result<(TimeseriesWidget, Option<String>), ApiError> {
        let today = chrono::Utc::now().date_naive();
        let req_json = serde_json::to_string(&ExploreRequest::for_query(query, today))
            .map_err(|e| ApiError::RequestError(format!("Failed to encode explore request: {}", e)))?;

        let mut cookie = None;
        let mut response = self.send_explore(&req_json, None).await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            warn!("Explore call rate limited, retrying with a session cookie");
            cookie = self.fetch_cookie().await?;
            response = self.send_explore(&req_json, cookie.as_deref()).await?;
        }

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let body = response.text().await?;
        let payload = strip_xssi_prefix(&body);
        let explore: ExploreResponse = serde_json::from_str(payload)
            .map_err(|e| ApiError::unparsable("explore response", payload, e))?;

        let widget = explore
            .timeseries_widget()
            .ok_or_else(|| ApiError::DeserializationError("Explore response has no widgets".to_string()))?;

        let token = widget
            .token
            .clone()
            .ok_or_else(|| ApiError::DeserializationError("Timeseries widget has no token".to_string()))?;
        let request = widget
            .request
            .clone()
            .ok_or_else(|| ApiError::DeserializationError("Timeseries widget has no request".to_string()))?;

        Ok((TimeseriesWidget { token, request }, cookie))
    }

    /// GET /trends/api/widgetdata/multiline
    async fn multiline(
        &self,
        widget: &TimeseriesWidget,
        cookie: Option<&str>,
    ) -> Result<String, ApiError> {
        let tz = self.tz.to_string();
        let req_json = widget.request.to_string();

        let mut request = self
            .http_client
            .get(format!("{}/trends/api/widgetdata/multiline", self.base_url))
            .query(&[
                ("hl", self.hl.as_str()),
                ("tz", tz.as_str()),
                ("req", req_json.as_str()),
                ("token", widget.token.as_str()),
            ]);

        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let body = response.text().await?;
        Ok(strip_xssi_prefix(&body).to_string())
    }
}

#[async_trait]
impl TrendsProvider for GoogleTrendsClient {
    async fn interest_over_time(&self, query: &TrendsQuery) -> Result<String, ApiError> {
        let (widget, cookie) = self.explore(query).await?;
        self.multiline(&widget, cookie.as_deref()).await
    }
}
