use std::convert::Infallible;
use std::sync::Arc;

use serde::Serialize;
use tracing::error;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use super::{error_reply, with_state, AppState};
use crate::services::{game_service, words_service};

#[derive(Debug, Serialize)]
struct WordsResponse {
    words: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundResponse {
    options: [String; 2],
    chart_url: String,
}

/// GET /api/words and GET /api/trends/round
pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let words_route = warp::path!("api" / "words")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(list_words);

    let round_route = warp::path!("api" / "trends" / "round")
        .and(warp::get())
        .and(with_state(state))
        .and_then(new_round);

    words_route.or(round_route).unify()
}

async fn list_words(state: Arc<AppState>) -> Result<Response, Infallible> {
    match words_service::load_words(&state.words_path).await {
        Ok(words) => Ok(warp::reply::json(&WordsResponse { words }).into_response()),
        Err(_) => Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Word list unavailable")),
    }
}

async fn new_round(state: Arc<AppState>) -> Result<Response, Infallible> {
    let words = match words_service::load_words(&state.words_path).await {
        Ok(words) => words,
        Err(_) => return Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Word list unavailable")),
    };

    let round = {
        let mut rng = rand::thread_rng();
        game_service::new_trends_round(&words, &mut rng)
    };

    let round = match round {
        Ok(round) => round,
        Err(e) => {
            error!("Cannot start a trends round: {}", e);
            return Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Need at least two words to play"));
        }
    };

    match chart_url(&round.correct) {
        Some(chart_url) => Ok(warp::reply::json(&RoundResponse {
            options: round.options,
            chart_url,
        })
        .into_response()),
        None => Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "An unknown error occurred")),
    }
}

/// Relative URL of the chart endpoint for `keyword`, query-encoded
fn chart_url(keyword: &str) -> Option<String> {
    let mut url = reqwest::Url::parse("http://localhost/api/trends/svg").ok()?;
    url.query_pairs_mut().append_pair("keyword", keyword);
    Some(format!("{}?{}", url.path(), url.query()?))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::AppState;
    use super::*;
    use std::io::Write;

    fn state_with_words(contents: &str) -> (tempfile::NamedTempFile, Arc<AppState>) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();

        let base = Arc::try_unwrap(idle_state()).ok().unwrap();
        let state = Arc::new(AppState {
            words_path: file.path().to_path_buf(),
            ..base
        });
        (file, state)
    }

    #[test]
    fn test_chart_url_is_encoded() {
        assert_eq!(chart_url("ice cream").unwrap(), "/api/trends/svg?keyword=ice+cream");
        assert_eq!(chart_url("a&b").unwrap(), "/api/trends/svg?keyword=a%26b");
    }

    #[tokio::test]
    async fn test_lists_words() {
        let (_file, state) = state_with_words("pizza\n\ntaco\n");
        let api = super::super::routes(state);

        let res = warp::test::request().path("/api/words").reply(&api).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res.body())["words"], serde_json::json!(["pizza", "taco"]));
    }

    #[tokio::test]
    async fn test_round_offers_both_words() {
        let (_file, state) = state_with_words("pizza\ntaco\n");
        let api = super::super::routes(state);

        let res = warp::test::request().path("/api/trends/round").reply(&api).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = json_body(res.body());
        let mut options: Vec<String> = serde_json::from_value(body["options"].clone()).unwrap();
        options.sort();
        assert_eq!(options, vec!["pizza", "taco"]);

        let chart_url = body["chartUrl"].as_str().unwrap();
        assert!(chart_url == "/api/trends/svg?keyword=pizza" || chart_url == "/api/trends/svg?keyword=taco");
    }

    #[tokio::test]
    async fn test_round_needs_two_words() {
        let (_file, state) = state_with_words("lonely\n");
        let api = super::super::routes(state);

        let res = warp::test::request().path("/api/trends/round").reply(&api).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_missing_word_file_is_500() {
        let base = Arc::try_unwrap(idle_state()).ok().unwrap();
        let state = Arc::new(AppState {
            words_path: "/definitely/not/here.txt".into(),
            ..base
        });
        let api = super::super::routes(state);
        let res = warp::test::request().path("/api/words").reply(&api).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(res.body())["error"], "Word list unavailable");
    }
}
