pub mod error;
pub mod google_trends;
pub mod open_food_facts;

pub use error::ApiError;
