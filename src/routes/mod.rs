//! HTTP routes
//!
//! Every handler is infallible: failures are turned into `{ "error": ... }`
//! bodies with the right status before they leave the handler.

pub mod chart;
pub mod food;
pub mod trends;
pub mod words;

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::api::google_trends::GoogleTrendsClient;
use crate::api::open_food_facts::OpenFoodFactsClient;
use crate::config::AppConfig;
use crate::services::chart_service::ChartRenderer;
use crate::services::trends_service::TrendsFetcher;

/// Read-only dependencies shared by all requests
pub struct AppState {
    pub fetcher: TrendsFetcher,
    pub renderer: ChartRenderer,
    pub food_client: OpenFoodFactsClient,
    pub words_path: PathBuf,
    pub products_path: PathBuf,
    pub trends_geo: Option<String>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let provider = GoogleTrendsClient::with_base_url(
            config.trends_base_url.clone(),
            config.trends_hl.clone(),
            config.trends_tz,
        );

        Self {
            fetcher: TrendsFetcher::new(Arc::new(provider), config.upstream_timeout),
            renderer: ChartRenderer::default(),
            food_client: OpenFoodFactsClient::with_base_url(config.food_base_url.clone()),
            words_path: config.words_path.clone(),
            products_path: config.products_path.clone(),
            trends_geo: config.trends_geo.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// JSON error reply: `{ "error": message }`
pub fn error_reply(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status).into_response()
}

pub fn with_state(state: Arc<AppState>) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn health() -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({ "status": "ok" })).into_response())
}

/// All endpoints, with rejections recovered into JSON errors
pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    trends::routes(state.clone())
        .or(chart::routes(state.clone()))
        .unify()
        .or(words::routes(state.clone()))
        .unify()
        .or(food::routes(state))
        .unify()
        .or(health())
        .unify()
        .recover(handle_rejection)
        .unify()
        .with(warp::trace::request())
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "Not found"));
    }
    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"));
    }
    if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        warn!("Rejected oversized request body");
        return Ok(error_reply(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large"));
    }

    error!("Unhandled rejection: {:?}", err);
    Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "An unknown error occurred"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::api::google_trends::provider::MockTrendsProvider;

    /// State wired to a mocked trends provider; other clients point at a closed port
    pub fn state_with(provider: MockTrendsProvider) -> Arc<AppState> {
        let config = AppConfig {
            food_base_url: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        };
        Arc::new(AppState {
            fetcher: TrendsFetcher::new(Arc::new(provider), TrendsFetcher::DEFAULT_DEADLINE),
            ..AppState::from_config(&config)
        })
    }

    pub fn idle_state() -> Arc<AppState> {
        let mut provider = MockTrendsProvider::new();
        provider.expect_interest_over_time().never();
        state_with(provider)
    }

    pub fn json_body(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).expect("response body is not JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let api = routes(idle_state());
        let res = warp::test::request().path("/health").reply(&api).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res.body())["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let api = routes(idle_state());
        let res = warp::test::request().path("/nope").reply(&api).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(res.body())["error"], "Not found");
    }
}
