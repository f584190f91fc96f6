//! Classification of Graph API error responses.
//!
//! An error response is reduced to an [`ErrorPayload`] (code, sub-code,
//! type, message, HTTP status and raw body) and run through an ordered rule
//! table that selects exactly one [`ErrorCategory`]. The result is a
//! [`ClassifiedError`] callers can match on to decide whether to
//! re-authenticate, back off or surface the failure.
//!
//! # Example
//!
//! ```rust
//! use graph_errors::{classify_response_body, ErrorCategory};
//! use serde_json::json;
//!
//! let body = json!({
//!     "error": {
//!         "code": 190,
//!         "error_subcode": 463,
//!         "type": "OAuthException",
//!         "message": "Error validating access token: Session has expired"
//!     }
//! });
//!
//! let err = classify_response_body(&body, 401);
//! assert_eq!(err.category(), ErrorCategory::Authentication);
//! assert_eq!(err.sub_code(), 463);
//! ```
//!
//! With a `reqwest` response already in hand:
//!
//! ```rust,no_run
//! # async fn example(response: reqwest::Response) -> Result<(), graph_errors::Error> {
//! let body = graph_errors::error_for_response(response).await?;
//! # let _ = body;
//! # Ok(())
//! # }
//! ```

mod classifier;
mod config;
mod error;
mod extract;
mod response;
pub mod rules;
pub mod types;

pub use classifier::{classify, classify_response_body, Classifier};
pub use config::{
    default_rules, ClassifierBuilder, RuleTable, AUTHENTICATION_CODES, CLIENT_STATUS_RANGE,
    DEFAULT_FALLBACK, OAUTH_ERROR_TYPE, PERMISSION_CODE_RANGE, PERMISSION_DENIED_CODE,
    SERVER_CODES, THROTTLE_CODES, USER_ISSUE_CODE, USER_ISSUE_SUB_CODES,
};
pub use error::Error;
pub use response::{classify_response, error_for_response};
pub use rules::{Matcher, Rule};
pub use types::{ClassifiedError, ErrorCategory, ErrorPayload, DEFAULT_MESSAGE};
