pub mod client;
pub mod models;

pub use client::OpenFoodFactsClient;
pub use models::ProductResponse;
