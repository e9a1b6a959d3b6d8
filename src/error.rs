// src/error.rs

use thiserror::Error;

/// Everything a portal call can fail with, split the way the UI reacts to it:
/// auth failures force a logout, validation failures never leave the client,
/// network failures are retryable, server failures carry the backend message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required: {0}")]
    Auth(String),
    #[error("{0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Message suitable for an inline banner next to the control that failed.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Auth(_) => "Your session has expired. Please log in again.".to_string(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Server { status: 403, .. } => {
                "You do not have permission to perform this action.".to_string()
            }
            ApiError::Server { message, .. } => message.clone(),
        }
    }

    /// True for failures that must clear the stored session.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// True when the operation was never applied and is safe to retry as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("could not reach the server".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Pulls a human-readable message out of an error response body. Accepts a
/// bare string body, a JSON string, or a `{"message": …}` / `{"error": …}`
/// object; anything else falls back to the caller's generic text.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(text)) => Some(text),
        Ok(value) => value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(|field| field.as_str())
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_field() {
        assert_eq!(
            extract_message(r#"{"message":"duplicate application"}"#),
            Some("duplicate application".to_string())
        );
    }

    #[test]
    fn extracts_error_field_when_message_missing() {
        assert_eq!(
            extract_message(r#"{"error":"file too large"}"#),
            Some("file too large".to_string())
        );
    }

    #[test]
    fn plain_text_body_is_surfaced_verbatim() {
        assert_eq!(
            extract_message("Marksheet not found"),
            Some("Marksheet not found".to_string())
        );
    }

    #[test]
    fn json_string_body_is_unquoted() {
        assert_eq!(
            extract_message(r#""upload rejected""#),
            Some("upload rejected".to_string())
        );
    }

    #[test]
    fn unknown_shapes_fall_back_to_none() {
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message(r#"{"detail":42}"#), None);
        assert_eq!(extract_message("[1,2,3]"), None);
    }

    #[test]
    fn forbidden_gets_permission_message() {
        let err = ApiError::Server {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "You do not have permission to perform this action."
        );
    }

    #[test]
    fn network_errors_are_retryable() {
        assert!(ApiError::Network("timeout".to_string()).is_retryable());
        assert!(!ApiError::Validation("empty file".to_string()).is_retryable());
    }
}
