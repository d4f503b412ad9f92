use warp::http::StatusCode;

use crate::api::ApiError;

/// Why an upstream trends body could not be used
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedPayload {
    /// An HTML page came back instead of JSON (block or captcha page)
    #[error("markup instead of JSON")]
    Markup,
    #[error("unparsable body: {0}")]
    Unparsable(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
}

/// Failures of the trends pipeline (fetch, parse, render)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendsError {
    #[error("missing keyword")]
    MissingInput,
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("upstream payload malformed: {0}")]
    UpstreamMalformed(MalformedPayload),
    #[error("insufficient data: {points} point(s), need at least 2")]
    InsufficientData { points: usize },
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrendsError {
    /// 400 for problems with the caller's input, 500 for everything upstream or internal
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrendsError::MissingInput | TrendsError::InsufficientData { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to clients; never carries upstream text
    pub fn public_message(&self) -> &'static str {
        match self {
            TrendsError::MissingInput => "Missing 'keyword' parameter",
            TrendsError::UpstreamUnavailable(_) => "Error fetching data from Google Trends API",
            TrendsError::UpstreamMalformed(MalformedPayload::Markup) => {
                "Google returned HTML instead of JSON (possibly blocked or captcha)"
            }
            TrendsError::UpstreamMalformed(_) => "Invalid/malformed response from Google Trends API",
            TrendsError::InsufficientData { .. } => "Insufficient trend data available for this keyword.",
            TrendsError::Internal(_) => "An unknown error occurred",
        }
    }
}

impl From<ApiError> for TrendsError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::DeserializationError(msg) => {
                TrendsError::UpstreamMalformed(MalformedPayload::Unparsable(msg))
            }
            ApiError::UnexpectedMarkup(_) => TrendsError::UpstreamMalformed(MalformedPayload::Markup),
            other => TrendsError::UpstreamUnavailable(other.to_string()),
        }
    }
}

/// Failures of the game logic
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("need at least two items to play, got {0}")]
    NotEnoughItems(usize),
    #[error("failed to load game data: {0}")]
    DataUnavailable(String),
}

/// First `max_chars` characters of a body, for log lines
///
/// Cuts on a char boundary so multi-byte text never panics.
pub fn body_snippet(body: &str, max_chars: usize) -> &str {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
