pub mod errors;
pub mod score_store;

pub use errors::{body_snippet, GameError, MalformedPayload, TrendsError};
pub use score_store::{MemoryScoreStore, ScoreStore};
