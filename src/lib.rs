//! games2play: the backend of two small guessing games.
//!
//! The trends game shows a Google Trends interest-over-time line for a secret
//! word and asks which of two words it belongs to. The food game asks which
//! of two products is healthier, using Open Food Facts scores.

pub mod api;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
