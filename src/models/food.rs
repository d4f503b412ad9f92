use serde::{Deserialize, Serialize};

/// A product record from the local catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub image_url: String,
}

/// A product with its EcoScore resolved. Higher is healthier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    #[serde(flatten)]
    pub product: Product,
    pub eco_score: f64,
}
