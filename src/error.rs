//! Error types for image analysis.

use std::time::Duration;

/// Maximum number of characters kept from a remote error body.
pub const MAX_ERROR_EXCERPT_CHARS: usize = 512;

/// Errors that can occur while analyzing an image.
///
/// Every variant is terminal for the call that produced it.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    /// No usable API key could be resolved.
    #[error("credential error: {0}")]
    Credential(String),

    /// The pixel buffer could not be turned into a PNG data URI.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// DNS, TLS, connection or other transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The round trip exceeded the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The API answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body held no usable analysis.
    #[error("response format error: {0}")]
    ResponseFormat(String),

    /// I/O error (e.g., building the blocking runtime).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VisionError {
    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns troubleshooting guidance suitable for showing to a user.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Credential(_) => {
                "API key not provided. Pass one explicitly or set XAI_API_KEY."
            }
            Self::Encoding(_) => "The input image must be a non-empty RGB, RGBA or grayscale buffer.",
            Self::Network(_) => {
                "Could not reach the Grok API. Check your connection and XAI_BASE_URL."
            }
            Self::Timeout(_) => {
                "The Grok API did not answer in time. Check your connection or try again later."
            }
            Self::Api { status: 401 | 403, .. } => "The API key was rejected. Check that it is valid.",
            Self::Api { status: 429, .. } => "Rate limited by the Grok API. Wait before sending more requests.",
            Self::Api { .. } => "The Grok API rejected the request. See the error message for details.",
            Self::ResponseFormat(_) => "No analysis returned from the Grok API.",
            Self::Io(_) => "A local I/O error occurred.",
        }
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, VisionError>;

/// Normalizes a remote error body into a bounded single-line excerpt.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "<empty body>".into();
    }
    if collapsed.chars().count() <= MAX_ERROR_EXCERPT_CHARS {
        return collapsed;
    }
    let mut excerpt: String = collapsed.chars().take(MAX_ERROR_EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        let err = VisionError::Api {
            status: 429,
            message: "slow down".into(),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(VisionError::Network("refused".into()).status(), None);
    }

    #[test]
    fn test_hint() {
        assert!(VisionError::Credential("missing".into())
            .hint()
            .contains("API key not provided"));
        assert!(VisionError::ResponseFormat("empty".into())
            .hint()
            .contains("No analysis returned"));
        assert!(VisionError::Timeout(Duration::from_secs(60))
            .hint()
            .contains("did not answer in time"));

        let unauthorized = VisionError::Api {
            status: 401,
            message: "bad key".into(),
        };
        assert!(unauthorized.hint().contains("rejected"));
    }

    #[test]
    fn test_error_display() {
        let err = VisionError::Api {
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");

        let err = VisionError::Timeout(Duration::from_secs(60));
        assert_eq!(err.to_string(), "request timed out after 60s");
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(
            sanitize_error_message("  {\"error\":\n  \"rate limited\"}  "),
            "{\"error\": \"rate limited\"}"
        );
        assert_eq!(sanitize_error_message("   "), "<empty body>");
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "é".repeat(MAX_ERROR_EXCERPT_CHARS * 3);
        let excerpt = sanitize_error_message(&body);
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), MAX_ERROR_EXCERPT_CHARS + 3);
    }
}
