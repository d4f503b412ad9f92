use tracing::warn;

/// Error type shared by the upstream HTTP clients
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body could not be decoded into the expected shape
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// HTML came back where JSON was expected (block or captcha page)
    #[error("Unexpected markup: {0}")]
    UnexpectedMarkup(String),
    /// The call did not finish before its deadline
    #[error("Request timed out")]
    Timeout,
}

impl ApiError {
    /// Map a non-success status and its body to an error variant
    pub fn from_status(status_code: u16, body_text: String) -> Self {
        match status_code {
            400 => {
                // Upstreams sometimes wrap the reason in a JSON object
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .get("message")
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    ApiError::BadRequest(message.to_string())
                } else {
                    ApiError::BadRequest(body_text)
                }
            }
            401 => ApiError::Unauthorized(body_text),
            403 => ApiError::Forbidden(body_text),
            404 => ApiError::NotFound(body_text),
            429 => {
                warn!("Upstream rate limited the request");
                ApiError::RateLimited(body_text)
            }
            500..=599 => {
                warn!("Upstream server error {}", status_code);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// Classify a body that failed to parse as JSON
    pub fn unparsable(context: &str, body: &str, e: serde_json::Error) -> Self {
        if body.trim_start().starts_with('<') {
            ApiError::UnexpectedMarkup(format!("{} returned HTML", context))
        } else {
            ApiError::DeserializationError(format!("Failed to parse {}: {}", context, e))
        }
    }

    /// Read the body of a failed response and classify it
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status_code = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();
        Self::from_status(status_code, body_text)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::RequestError(format!("Request failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_prefers_json_message() {
        let err = ApiError::from_status(400, r#"{"message":"bad keyword"}"#.to_string());
        assert_eq!(err, ApiError::BadRequest("bad keyword".to_string()));

        let err = ApiError::from_status(400, "plain".to_string());
        assert_eq!(err, ApiError::BadRequest("plain".to_string()));
    }

    #[test]
    fn test_status_classes() {
        assert!(matches!(ApiError::from_status(429, String::new()), ApiError::RateLimited(_)));
        assert!(matches!(ApiError::from_status(503, String::new()), ApiError::ServerError(503, _)));
        assert!(matches!(ApiError::from_status(302, String::new()), ApiError::HttpError(302, _)));
        assert!(matches!(ApiError::from_status(404, String::new()), ApiError::NotFound(_)));
    }

    #[test]
    fn test_unparsable_detects_markup() {
        let html = "\n<!DOCTYPE html><html><body>unusual traffic</body></html>";
        let e = serde_json::from_str::<serde_json::Value>(html).unwrap_err();
        assert!(matches!(
            ApiError::unparsable("explore response", html, e),
            ApiError::UnexpectedMarkup(_)
        ));

        let e = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert!(matches!(
            ApiError::unparsable("explore response", "{oops", e),
            ApiError::DeserializationError(_)
        ));
    }

    #[test]
    fn test_timeout_message_has_no_duration() {
        assert_eq!(ApiError::Timeout.to_string(), "Request timed out");
    }
}
