use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use super::{error_reply, with_state, AppState};
use crate::services::{food_service, game_service};

const DEFAULT_USER_ID: &str = "anonymous";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EcoScoreResponse {
    barcode: String,
    eco_score: f64,
}

fn user_id(params: &HashMap<String, String>) -> &str {
    params
        .get("userId")
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_USER_ID)
}

/// GET /api/food/ecoscore/{barcode} and GET /api/food/round
pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let score_route = warp::path!("api" / "food" / "ecoscore" / String)
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_state(state.clone()))
        .and_then(eco_score);

    let round_route = warp::path!("api" / "food" / "round")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_state(state))
        .and_then(new_round);

    score_route.or(round_route).unify()
}

async fn eco_score(
    barcode: String,
    params: HashMap<String, String>,
    state: Arc<AppState>,
) -> Result<Response, Infallible> {
    if !food_service::is_valid_barcode(&barcode) {
        return Ok(error_reply(StatusCode::BAD_REQUEST, "Invalid barcode"));
    }

    let eco_score = food_service::fetch_eco_score(&state.food_client, &barcode, user_id(&params)).await;
    Ok(warp::reply::json(&EcoScoreResponse { barcode, eco_score }).into_response())
}

async fn new_round(params: HashMap<String, String>, state: Arc<AppState>) -> Result<Response, Infallible> {
    let products = match food_service::load_products(&state.products_path).await {
        Ok(products) => products,
        Err(_) => return Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Product list unavailable")),
    };

    let pair = {
        let mut rng = rand::thread_rng();
        game_service::pick_food_pair(&products, &mut rng)
    };

    let pair = match pair {
        Ok(pair) => pair,
        Err(e) => {
            error!("Cannot start a food round: {}", e);
            return Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Need at least two products to play"));
        }
    };

    info!("Food round: {} vs {}", pair[0].barcode, pair[1].barcode);
    let round = game_service::resolve_food_round(&state.food_client, pair, user_id(&params)).await;
    Ok(warp::reply::json(&round).into_response())
}
