//! Rule-based classification of error payloads.

use crate::config::{ClassifierBuilder, RuleTable};
use crate::rules::Rule;
use crate::types::{ClassifiedError, ErrorCategory, ErrorPayload};
use crate::Error;
use serde_json::Value;
use std::sync::OnceLock;

/// Ordered rule table mapping error payloads to categories.
///
/// Rules are evaluated in order and the first match wins; a payload no rule
/// matches gets the fallback category. Classification only reads the
/// payload, so a classifier can be shared freely between threads.
///
/// # Example
///
/// ```rust
/// use graph_errors::{Classifier, ErrorCategory, ErrorPayload};
///
/// let classifier = Classifier::default();
/// let payload = ErrorPayload::new(400).with_code(17);
///
/// assert_eq!(classifier.classify(&payload), ErrorCategory::Throttle);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<Rule>,
    fallback: ErrorCategory,
}

impl Default for Classifier {
    fn default() -> Self {
        let table = RuleTable::default();
        Self::from_parts(table.rules, table.fallback)
    }
}

impl Classifier {
    /// Create a builder seeded with the Graph API rule table.
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    pub(crate) fn from_parts(rules: Vec<Rule>, fallback: ErrorCategory) -> Self {
        Self { rules, fallback }
    }

    /// Load a classifier from a JSON rule table.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let table: RuleTable = serde_json::from_str(json)?;
        ClassifierBuilder::from_table(table).build()
    }

    /// Export the rule table.
    pub fn to_rule_table(&self) -> RuleTable {
        RuleTable {
            rules: self.rules.clone(),
            fallback: self.fallback,
        }
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Category used when no rule matches.
    pub fn fallback(&self) -> ErrorCategory {
        self.fallback
    }

    /// Select the category for a payload.
    pub fn classify(&self, payload: &ErrorPayload) -> ErrorCategory {
        self.rules
            .iter()
            .find(|rule| rule.matches(payload))
            .map_or(self.fallback, |rule| rule.category)
    }

    /// Pair a payload with a category.
    pub fn build_error(&self, payload: ErrorPayload, category: ErrorCategory) -> ClassifiedError {
        ClassifiedError::new(payload, category)
    }

    /// Classify a payload and wrap it.
    pub fn classify_payload(&self, payload: ErrorPayload) -> ClassifiedError {
        let category = self.classify(&payload);
        self.build_error(payload, category)
    }

    /// Extract and classify a decoded response body.
    pub fn classify_body(&self, body: &Value, http_status: u16) -> ClassifiedError {
        self.classify_payload(ErrorPayload::extract(body, http_status))
    }

    /// Decode, extract and classify a raw response body.
    pub fn classify_raw(&self, raw_body: &str, http_status: u16) -> ClassifiedError {
        self.classify_payload(ErrorPayload::from_raw(raw_body, http_status))
    }
}

pub(crate) fn default_classifier() -> &'static Classifier {
    static DEFAULT: OnceLock<Classifier> = OnceLock::new();
    DEFAULT.get_or_init(Classifier::default)
}

/// Classify a payload with the Graph API rule table.
pub fn classify(payload: &ErrorPayload) -> ErrorCategory {
    default_classifier().classify(payload)
}

/// Extract and classify a decoded response body with the Graph API rule table.
pub fn classify_response_body(body: &Value, http_status: u16) -> ClassifiedError {
    default_classifier().classify_body(body, http_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_rules;
    use crate::rules::Matcher;
    use serde_json::json;

    fn payload(code: i64, sub_code: i64, error_type: &str, status: u16) -> ErrorPayload {
        ErrorPayload::new(status)
            .with_code(code)
            .with_sub_code(sub_code)
            .with_error_type(error_type)
    }

    #[test]
    fn test_oauth_type_wins_over_code() {
        for code in [0, 1, 4, 10, 250, 506] {
            for sub_code in [0, 458, 999] {
                let p = payload(code, sub_code, "OAuthException", 401);
                assert_eq!(classify(&p), ErrorCategory::Authentication, "code {code}");
            }
        }
    }

    #[test]
    fn test_user_issue_sub_codes() {
        for sub_code in [0, 458, 459, 460, 463, 464, 467] {
            let p = payload(230, sub_code, "exception", 401);
            assert_eq!(classify(&p), ErrorCategory::Authentication);
        }
        // Unknown sub-code under 230 falls through to the permission range.
        let p = payload(230, 1, "exception", 401);
        assert_eq!(classify(&p), ErrorCategory::Authorization);
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(classify(&payload(1, 0, "", 401)), ErrorCategory::Server);
        assert_eq!(classify(&payload(2, 0, "", 200)), ErrorCategory::Server);
        assert_eq!(classify(&payload(341, 0, "", 500)), ErrorCategory::Throttle);
        assert_eq!(classify(&payload(10, 0, "", 200)), ErrorCategory::Authorization);
        assert_eq!(classify(&payload(506, 0, "", 404)), ErrorCategory::Client);
        assert_eq!(classify(&payload(506, 0, "", 500)), ErrorCategory::Other);
        assert_eq!(classify(&payload(42, 0, "feature", 200)), ErrorCategory::Other);
    }

    #[test]
    fn test_client_status_bounds() {
        assert_eq!(classify(&payload(0, 0, "", 399)), ErrorCategory::Other);
        assert_eq!(classify(&payload(0, 0, "", 400)), ErrorCategory::Client);
        assert_eq!(classify(&payload(0, 0, "", 499)), ErrorCategory::Client);
        assert_eq!(classify(&payload(0, 0, "", 500)), ErrorCategory::Other);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let classifier = Classifier::default();
        let p = payload(17, 0, "exception", 400);

        let first = classifier.classify(&p);
        let second = classifier.classify(&p);

        assert_eq!(first, second);
    }

    #[test]
    fn test_prepend_rule_takes_precedence() {
        let classifier = Classifier::builder()
            .prepend_rule(Rule::new(ErrorCategory::Client).matcher(Matcher::codes([190])))
            .build()
            .unwrap();

        assert_eq!(
            classifier.classify(&payload(190, 0, "", 400)),
            ErrorCategory::Client
        );
    }

    #[test]
    fn test_appended_rule_does_not_override() {
        let classifier = Classifier::builder()
            .rule(Rule::new(ErrorCategory::Throttle).matcher(Matcher::codes([190, 32])))
            .build()
            .unwrap();

        assert_eq!(
            classifier.classify(&payload(190, 0, "", 200)),
            ErrorCategory::Authentication
        );
        // The client status rule sits ahead of the appended rule.
        assert_eq!(
            classifier.classify(&payload(32, 0, "", 400)),
            ErrorCategory::Client
        );
        assert_eq!(
            classifier.classify(&payload(32, 0, "", 200)),
            ErrorCategory::Throttle
        );
    }

    #[test]
    fn test_json_round_trip_of_default_table() {
        let json = serde_json::to_string(&Classifier::default().to_rule_table()).unwrap();

        let classifier = Classifier::from_json(&json).unwrap();

        assert_eq!(classifier.rules(), default_rules().as_slice());
        assert_eq!(classifier, Classifier::default());
    }

    #[test]
    fn test_from_json_custom_table() {
        let json = json!({
            "rules": [
                { "category": "throttle", "matchers": [
                    { "kind": "http_status_range", "start": 429, "end": 429 }
                ]}
            ],
            "fallback": "server"
        })
        .to_string();

        let classifier = Classifier::from_json(&json).unwrap();

        assert_eq!(classifier.classify(&payload(0, 0, "", 429)), ErrorCategory::Throttle);
        assert_eq!(classifier.classify(&payload(0, 0, "", 400)), ErrorCategory::Server);
    }

    #[test]
    fn test_from_json_rejects_invalid_tables() {
        let empty_rule = r#"{ "rules": [ { "category": "client", "matchers": [] } ] }"#;
        assert!(matches!(
            Classifier::from_json(empty_rule),
            Err(Error::Config(_))
        ));

        assert!(matches!(
            Classifier::from_json("{ not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_classify_response_body() {
        let body = json!({ "error": { "code": 200, "message": "Permissions error" } });

        let err = classify_response_body(&body, 403);

        assert_eq!(err.category(), ErrorCategory::Authorization);
        assert_eq!(err.message(), "Permissions error");
        assert_eq!(err.http_status(), 403);
    }

    #[test]
    fn test_classify_raw_malformed_body() {
        let err = Classifier::default().classify_raw("Bad Gateway", 502);

        assert_eq!(err.category(), ErrorCategory::Other);
        assert_eq!(err.raw_body(), "Bad Gateway");
    }

    #[test]
    fn test_classifier_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
        assert_send_sync::<ClassifiedError>();
    }
}
