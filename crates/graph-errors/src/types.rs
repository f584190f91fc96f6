//! Error payload, category and classified error types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Message used when the error object carries none.
pub const DEFAULT_MESSAGE: &str = "Unknown error";

/// Category an API error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Token or session is invalid, expired or revoked.
    Authentication,
    /// Internal failure on the API side.
    Server,
    /// Rate limit reached.
    Throttle,
    /// Missing permission for the requested operation.
    Authorization,
    /// Client-side failure reported through the HTTP status.
    Client,
    /// Anything else.
    Other,
}

impl ErrorCategory {
    /// All categories, in default rule priority order.
    pub const ALL: [ErrorCategory; 6] = [
        ErrorCategory::Authentication,
        ErrorCategory::Server,
        ErrorCategory::Throttle,
        ErrorCategory::Authorization,
        ErrorCategory::Client,
        ErrorCategory::Other,
    ];

    /// Lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Server => "server",
            Self::Throttle => "throttle",
            Self::Authorization => "authorization",
            Self::Client => "client",
            Self::Other => "other",
        }
    }

    /// Whether the same request may succeed later without changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server | Self::Throttle)
    }

    /// Whether the caller needs a fresh access token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized diagnostic fields of an API error response.
///
/// Built once, either by [`ErrorPayload::extract`] / [`ErrorPayload::from_raw`]
/// or through the `with_*` setters, and never re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub(crate) code: i64,
    pub(crate) sub_code: i64,
    pub(crate) error_type: String,
    pub(crate) message: String,
    pub(crate) http_status: u16,
    pub(crate) raw_body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) user_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) user_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) trace_id: Option<String>,
    #[serde(default)]
    pub(crate) response_data: Value,
}

impl ErrorPayload {
    /// Create a payload with every field at its default.
    pub fn new(http_status: u16) -> Self {
        Self {
            code: 0,
            sub_code: 0,
            error_type: String::new(),
            message: DEFAULT_MESSAGE.to_string(),
            http_status,
            raw_body: String::new(),
            user_title: None,
            user_message: None,
            trace_id: None,
            response_data: Value::Null,
        }
    }

    /// Set the primary error code.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Set the sub-code.
    pub fn with_sub_code(mut self, sub_code: i64) -> Self {
        self.sub_code = sub_code;
        self
    }

    /// Set the error type label.
    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = error_type.into();
        self
    }

    /// Set the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the raw response body.
    pub fn with_raw_body(mut self, raw_body: impl Into<String>) -> Self {
        self.raw_body = raw_body.into();
        self
    }

    /// Get the primary error code.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Get the error sub-code.
    pub fn sub_code(&self) -> i64 {
        self.sub_code
    }

    /// Get the error type label.
    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the HTTP status of the response.
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Get the raw response body.
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// Title meant to be shown to the end user (`error_user_title`).
    pub fn user_title(&self) -> Option<&str> {
        self.user_title.as_deref()
    }

    /// Message meant to be shown to the end user (`error_user_msg`).
    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    /// Server-side trace identifier (`fbtrace_id`).
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// The decoded body, `Null` if it could not be decoded.
    pub fn response_data(&self) -> &Value {
        &self.response_data
    }
}

/// An API error paired with the category it was classified into.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "{category} error (code {}, subcode {}, HTTP {}): {}",
    .payload.code,
    .payload.sub_code,
    .payload.http_status,
    .payload.message
)]
pub struct ClassifiedError {
    category: ErrorCategory,
    payload: ErrorPayload,
}

impl ClassifiedError {
    /// Pair a payload with its category. No validation is performed.
    pub fn new(payload: ErrorPayload, category: ErrorCategory) -> Self {
        Self { category, payload }
    }

    /// Get the category.
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Get the classified payload.
    pub fn payload(&self) -> &ErrorPayload {
        &self.payload
    }

    /// Get the primary error code.
    pub fn code(&self) -> i64 {
        self.payload.code
    }

    /// Get the error sub-code.
    pub fn sub_code(&self) -> i64 {
        self.payload.sub_code
    }

    /// Get the error type label.
    pub fn error_type(&self) -> &str {
        &self.payload.error_type
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.payload.message
    }

    /// Get the raw response body.
    pub fn raw_body(&self) -> &str {
        &self.payload.raw_body
    }

    /// Get the HTTP status of the response.
    pub fn http_status(&self) -> u16 {
        self.payload.http_status
    }

    /// Get the end-user title, if any.
    pub fn user_title(&self) -> Option<&str> {
        self.payload.user_title()
    }

    /// Get the end-user message, if any.
    pub fn user_message(&self) -> Option<&str> {
        self.payload.user_message()
    }

    /// Get the server trace identifier, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.payload.trace_id()
    }

    /// Give back the underlying payload.
    pub fn into_payload(self) -> ErrorPayload {
        self.payload
    }
}
