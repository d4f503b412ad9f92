use serde::Deserialize;

/// Response from GET /api/v0/product/{barcode}
#[derive(Debug, Clone, Deserialize)]
pub struct ProductResponse {
    /// 1 when the product was found
    pub status: Option<i64>,
    pub product: Option<ProductDetails>,
}

/// The subset of product fields the food game reads
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDetails {
    /// Kept loose: the field is missing, null or a string for some products
    pub nutriscore_score: Option<serde_json::Value>,
}

impl ProductResponse {
    /// Raw score of a found product, if it carries a usable number
    pub fn score(&self) -> Option<f64> {
        if self.status != Some(1) {
            return None;
        }
        self.product
            .as_ref()?
            .nutriscore_score
            .as_ref()?
            .as_f64()
            .filter(|s| !s.is_nan())
    }
}
