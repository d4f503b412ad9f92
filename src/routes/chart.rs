use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use tracing::{info, info_span, Instrument};
use uuid::Uuid;
use warp::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use super::{error_reply, with_state, AppState};
use crate::api::google_trends::TrendsQuery;

/// GET /api/trends/svg?keyword=...
pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("api" / "trends" / "svg")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_state(state))
        .and_then(|params: HashMap<String, String>, state: Arc<AppState>| {
            let span = info_span!("chart", request_id = %Uuid::new_v4());
            render_chart(params, state).instrument(span)
        })
}

async fn render_chart(params: HashMap<String, String>, state: Arc<AppState>) -> Result<Response, Infallible> {
    let keyword = match params.get("keyword").map(|k| k.trim()) {
        Some(k) if !k.is_empty() => k.to_string(),
        _ => return Ok(error_reply(StatusCode::BAD_REQUEST, "Missing 'keyword' query parameter")),
    };

    info!("Chart requested for '{}'", keyword);

    let query = TrendsQuery::new(keyword).with_geo(state.trends_geo.clone());
    let rendered = state
        .fetcher
        .fetch_series(&query)
        .await
        .and_then(|series| state.renderer.render_svg(&series));

    match rendered {
        Ok(svg) => Ok(svg_reply(svg)),
        Err(e) => Ok(error_reply(e.status_code(), e.public_message())),
    }
}

fn svg_reply(svg: String) -> Response {
    let reply = warp::reply::with_header(svg, CONTENT_TYPE, "image/svg+xml; charset=utf-8");
    warp::reply::with_header(reply, CACHE_CONTROL, "no-store").into_response()
}

#[cfg(test)]
mod tests {
    use super::super::routes;
    use super::super::test_support::*;
    use crate::api::google_trends::provider::MockTrendsProvider;
    use crate::api::google_trends::TrendsQuery;
    use crate::api::ApiError;
    use warp::http::StatusCode;

    fn provider_answering(body: &'static str) -> MockTrendsProvider {
        let mut provider = MockTrendsProvider::new();
        provider
            .expect_interest_over_time()
            .times(1)
            .returning(move |_| Ok(body.to_string()));
        provider
    }

    #[tokio::test]
    async fn test_renders_svg() {
        let mut provider = MockTrendsProvider::new();
        provider
            .expect_interest_over_time()
            .withf(|q: &TrendsQuery| q.keyword == "ice cream")
            .times(1)
            .returning(|_| {
                Ok(r#"{"default":{"timelineData":[{"value":[10]},{"value":[20]},{"value":[10]}]}}"#.to_string())
            });
        let api = routes(state_with(provider));

        let res = warp::test::request()
            .path("/api/trends/svg?keyword=ice%20cream")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "image/svg+xml; charset=utf-8");
        assert_eq!(res.headers()["cache-control"], "no-store");
        let body = std::str::from_utf8(res.body()).unwrap();
        assert!(body.contains("<svg"));
        assert!(body.contains("20,380 400,20 780,380"));
    }

    #[tokio::test]
    async fn test_missing_keyword_is_400() {
        let api = routes(idle_state());

        for path in ["/api/trends/svg", "/api/trends/svg?keyword=", "/api/trends/svg?other=1"] {
            let res = warp::test::request().path(path).reply(&api).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "path {}", path);
            assert_eq!(json_body(res.body())["error"], "Missing 'keyword' query parameter");
        }
    }

    #[tokio::test]
    async fn test_single_point_is_400_not_an_image() {
        let api = routes(state_with(provider_answering(
            r#"{"default":{"timelineData":[{"value":[10]}]}}"#,
        )));

        let res = warp::test::request().path("/api/trends/svg?keyword=rare").reply(&api).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(res.body())["error"],
            "Insufficient trend data available for this keyword."
        );
    }

    #[tokio::test]
    async fn test_block_page_is_500() {
        let api = routes(state_with(provider_answering("<html><body>unusual traffic</body></html>")));

        let res = warp::test::request().path("/api/trends/svg?keyword=pizza").reply(&api).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(res.body())["error"],
            "Google returned HTML instead of JSON (possibly blocked or captcha)"
        );
    }

    #[tokio::test]
    async fn test_garbage_payload_is_500() {
        let api = routes(state_with(provider_answering("{\"default\": [")));

        let res = warp::test::request().path("/api/trends/svg?keyword=pizza").reply(&api).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(res.body())["error"],
            "Invalid/malformed response from Google Trends API"
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let mut provider = MockTrendsProvider::new();
        provider
            .expect_interest_over_time()
            .times(1)
            .returning(|_| Err(ApiError::RequestError("connection reset".to_string())));
        let api = routes(state_with(provider));

        let res = warp::test::request().path("/api/trends/svg?keyword=pizza").reply(&api).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(res.body())["error"], "Error fetching data from Google Trends API");
    }
}
