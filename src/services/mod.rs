pub mod chart_service;
pub mod food_service;
pub mod game_service;
pub mod trends_service;
pub mod words_service;

pub use chart_service::ChartRenderer;
pub use trends_service::TrendsFetcher;
