use std::path::Path;

use tracing::{debug, error, warn};

use crate::api::open_food_facts::OpenFoodFactsClient;
use crate::models::{Product, ProductInfo};
use crate::utils::errors::GameError;

/// Score used whenever a product cannot be scored
pub const FALLBACK_ECO_SCORE: f64 = 50.0;

/// Clamp a raw score into 0..=100, falling back when there is none
pub fn normalize_eco_score(raw: Option<f64>) -> f64 {
    raw.map(|s| s.clamp(0.0, 100.0)).unwrap_or(FALLBACK_ECO_SCORE)
}

/// Barcodes go into a URL path, so only plain alphanumerics are accepted
pub fn is_valid_barcode(barcode: &str) -> bool {
    !barcode.is_empty() && barcode.len() <= 32 && barcode.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Look up the EcoScore of a product. Never fails; see [`FALLBACK_ECO_SCORE`].
pub async fn fetch_eco_score(client: &OpenFoodFactsClient, barcode: &str, user_id: &str) -> f64 {
    if !is_valid_barcode(barcode) {
        warn!("Refusing to look up invalid barcode '{}'", barcode);
        return FALLBACK_ECO_SCORE;
    }

    match client.get_product(barcode, user_id).await {
        Ok(response) => {
            let score = normalize_eco_score(response.score());
            debug!("EcoScore for {}: {}", barcode, score);
            score
        }
        Err(e) => {
            error!("Error fetching EcoScore for {}: {}", barcode, e);
            FALLBACK_ECO_SCORE
        }
    }
}

pub async fn resolve_product(client: &OpenFoodFactsClient, product: Product, user_id: &str) -> ProductInfo {
    let eco_score = fetch_eco_score(client, &product.barcode, user_id).await;
    ProductInfo { product, eco_score }
}

/// Read the product catalog (a JSON array of `{barcode, name, imageUrl}`)
pub async fn load_products(path: &Path) -> Result<Vec<Product>, GameError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Failed to read product catalog {}: {}", path.display(), e);
        GameError::DataUnavailable(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&text).map_err(|e| {
        error!("Failed to parse product catalog {}: {}", path.display(), e);
        GameError::DataUnavailable(format!("Failed to parse {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_eco_score() {
        assert_eq!(normalize_eco_score(Some(42.0)), 42.0);
        assert_eq!(normalize_eco_score(Some(-8.0)), 0.0);
        assert_eq!(normalize_eco_score(Some(140.0)), 100.0);
        assert_eq!(normalize_eco_score(None), FALLBACK_ECO_SCORE);
    }

    #[test]
    fn test_barcode_validation() {
        assert!(is_valid_barcode("3017620422003"));
        assert!(!is_valid_barcode(""));
        assert!(!is_valid_barcode("../admin"));
        assert!(!is_valid_barcode("123 456"));
    }

    #[tokio::test]
    async fn test_unreachable_lookup_falls_back() {
        let client = OpenFoodFactsClient::with_base_url("http://127.0.0.1:9".to_string());
        assert_eq!(fetch_eco_score(&client, "3017620422003", "user-1").await, FALLBACK_ECO_SCORE);
        assert_eq!(fetch_eco_score(&client, "not/valid", "user-1").await, FALLBACK_ECO_SCORE);
    }

    #[tokio::test]
    async fn test_load_products() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"barcode":"123","name":"Oats","imageUrl":"https://img/oats.png"}}]"#
        )
        .unwrap();

        let products = load_products(file.path()).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].image_url, "https://img/oats.png");
    }

    #[tokio::test]
    async fn test_default_catalog_is_playable() {
        let path = crate::config::AppConfig::default().products_path;
        let products = load_products(&path).await.unwrap();

        assert!(products.len() >= 2, "catalog has {} product(s)", products.len());
        for product in &products {
            assert!(is_valid_barcode(&product.barcode), "bad barcode {}", product.barcode);
            assert!(!product.name.is_empty());
        }
    }

    #[tokio::test]
    async fn test_load_products_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not a list").unwrap();
        assert!(matches!(
            load_products(file.path()).await,
            Err(GameError::DataUnavailable(_))
        ));
    }
}
