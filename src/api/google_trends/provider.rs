use async_trait::async_trait;

use super::models::TrendsQuery;
use crate::api::ApiError;

/// Source of "interest over time" payloads.
///
/// Implementations return the raw response text, unparsed. Interpreting it
/// (including spotting block pages) is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrendsProvider: Send + Sync {
    async fn interest_over_time(&self, query: &TrendsQuery) -> Result<String, ApiError>;
}
