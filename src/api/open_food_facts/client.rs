use reqwest::header::USER_AGENT;
use reqwest::Client as HttpClient;

use super::models::ProductResponse;
use crate::api::ApiError;

/// Open Food Facts product lookup client
pub struct OpenFoodFactsClient {
    http_client: HttpClient,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://us.openfoodfacts.org";

    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// User agent Open Food Facts asks API consumers to identify with
    pub fn user_agent(user_id: &str) -> String {
        format!("Food Guessing Game - Web - {} - games2play.vercel.app", user_id)
    }

    /// GET /api/v0/product/{barcode}
    pub async fn get_product(
        &self,
        barcode: &str,
        user_id: &str,
    ) -> Result<ProductResponse, ApiError> {
        let url = format!("{}/api/v0/product/{}", self.base_url, barcode);

        let response = self
            .http_client
            .get(&url)
            .header(USER_AGENT, Self::user_agent(user_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        response
            .json::<ProductResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

impl Default for OpenFoodFactsClient {
    fn default() -> Self {
        Self::new()
    }
}
