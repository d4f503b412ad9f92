use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use super::{error_reply, with_state, AppState};
use crate::api::google_trends::TrendsQuery;
use crate::models::TimelineEntry;

const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Debug, Deserialize)]
struct TrendsRequest {
    keyword: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendsResponse {
    timeline_data: Vec<TimelineEntry>,
}

/// POST /api/trends
pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("api" / "trends")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_state(state))
        .and_then(|body: Bytes, state: Arc<AppState>| {
            let span = info_span!("trends", request_id = %Uuid::new_v4());
            fetch_timeline(body, state).instrument(span)
        })
}

async fn fetch_timeline(body: Bytes, state: Arc<AppState>) -> Result<Response, Infallible> {
    let request: TrendsRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            warn!("Unreadable trends request body: {}", e);
            return Ok(error_reply(StatusCode::BAD_REQUEST, "Invalid request body"));
        }
    };

    let keyword = match request.keyword.as_deref().map(str::trim) {
        Some(k) if !k.is_empty() => k.to_string(),
        _ => return Ok(error_reply(StatusCode::BAD_REQUEST, "Missing keyword")),
    };

    info!("Timeline requested for '{}'", keyword);

    let query = TrendsQuery::new(keyword).with_geo(state.trends_geo.clone());
    match state.fetcher.fetch_timeline(&query).await {
        Ok(timeline_data) => {
            info!("Returning {} timeline entries", timeline_data.len());
            Ok(warp::reply::json(&TrendsResponse { timeline_data }).into_response())
        }
        Err(e) => Ok(error_reply(e.status_code(), e.public_message())),
    }
}
