//! Persisted player state behind an injectable accessor
//!
//! The server is stateless and never touches this. Embedding clients plug
//! their own storage in through [`ScoreStore`]; [`MemoryScoreStore`] covers
//! tests and short-lived sessions.

use std::collections::HashMap;

use rand::Rng;

use crate::models::GameKind;

/// Where high scores and the anonymous player id live
pub trait ScoreStore {
    fn high_score(&self, kind: GameKind) -> u32;
    fn set_high_score(&mut self, kind: GameKind, score: u32);
    fn anonymous_id(&self) -> Option<String>;
    fn set_anonymous_id(&mut self, id: String);
}

/// Storage key of the anonymous player id
pub const ANONYMOUS_ID_KEY: &str = "foodGuessUserId";

/// Key/value store kept in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    entries: HashMap<String, String>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ScoreStore for MemoryScoreStore {
    /// Unparsable stored values read as 0
    fn high_score(&self, kind: GameKind) -> u32 {
        self.get(kind.high_score_key())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    fn set_high_score(&mut self, kind: GameKind, score: u32) {
        self.entries.insert(kind.high_score_key().to_string(), score.to_string());
    }

    fn anonymous_id(&self) -> Option<String> {
        self.get(ANONYMOUS_ID_KEY).map(str::to_string)
    }

    fn set_anonymous_id(&mut self, id: String) {
        self.entries.insert(ANONYMOUS_ID_KEY.to_string(), id);
    }
}

/// Return the stored player id, creating `user-<n>` first if there is none
pub fn ensure_anonymous_id<S: ScoreStore, R: Rng>(store: &mut S, rng: &mut R) -> String {
    if let Some(id) = store.anonymous_id() {
        return id;
    }
    let id = format!("user-{}", rng.gen_range(0..1_000_000));
    store.set_anonymous_id(id.clone());
    id
}
