use std::path::Path;

use tracing::{debug, error};

use crate::utils::errors::GameError;

/// Split a line-delimited word list, dropping blank lines and surrounding whitespace
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the word list used by the trends game
pub async fn load_words(path: &Path) -> Result<Vec<String>, GameError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Failed to read word list {}: {}", path.display(), e);
        GameError::DataUnavailable(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let words = parse_words(&text);
    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
