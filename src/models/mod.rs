//! Data models shared by the services and the HTTP routes
//!
//! Each model is either an upstream payload reduced to the fields we read,
//! or a value computed for a single request.

pub mod chart;
pub mod food;
pub mod game;
pub mod trends;

// Re-export commonly used types for convenience
pub use chart::ChartGeometry;
pub use food::{Product, ProductInfo};
pub use game::{FoodRound, GameKind, TrendsRound};
pub use trends::{TimeSeries, TimeSeriesPoint, TimelineEntry, TrendsEnvelope};
