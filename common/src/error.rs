//! The one error type every call site handles.
//!
//! The server only distinguishes transport failures from business-rule
//! failures carrying a message; both end up in front of the user through
//! [`ApiError::user_message`].

use serde::Deserialize;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("session expired")]
    Unauthorized,

    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Builds the error for a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty());
        ApiError::Server { status, message }
    }

    /// Text for the blocking alert: the server's message when there is one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message: Some(message), .. } => message.clone(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".into(),
            _ => GENERIC_FAILURE.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_reaches_the_user() {
        let err = ApiError::from_response(400, r#"{"success":false,"message":"Email already exists"}"#);
        assert_eq!(err.user_message(), "Email already exists");

        let err = ApiError::from_response(422, r#"{"error":"Invalid status"}"#);
        assert_eq!(err.user_message(), "Invalid status");
    }

    #[test]
    fn unreadable_bodies_fall_back_to_generic_text() {
        let err = ApiError::from_response(500, "<html>Bad gateway</html>");
        assert_eq!(err, ApiError::Server { status: 500, message: None });
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(ApiError::Network("offline".into()).user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn unauthorized_is_recognized() {
        assert_eq!(ApiError::from_response(401, ""), ApiError::Unauthorized);
    }
}
