pub mod client;
pub mod models;
pub mod provider;

pub use client::GoogleTrendsClient;
pub use models::TrendsQuery;
pub use provider::TrendsProvider;
