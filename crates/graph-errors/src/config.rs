//! Classifier configuration.

use crate::classifier::Classifier;
use crate::rules::{Matcher, Rule};
use crate::types::ErrorCategory;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Error type label of OAuth failures.
pub const OAUTH_ERROR_TYPE: &str = "OAuthException";

/// Codes for a login status or token that is expired, revoked or invalid.
pub const AUTHENTICATION_CODES: [i64; 3] = [100, 102, 190];

/// Code for issues with the user's account.
pub const USER_ISSUE_CODE: i64 = 230;

/// Account-state sub-codes under [`USER_ISSUE_CODE`]. `0` is included so a
/// missing sub-code still resolves to authentication.
pub const USER_ISSUE_SUB_CODES: [i64; 7] = [0, 458, 459, 460, 463, 464, 467];

/// Codes for internal failures or downtime.
pub const SERVER_CODES: [i64; 2] = [1, 2];

/// Codes for API throttling.
pub const THROTTLE_CODES: [i64; 3] = [4, 17, 341];

/// Code for a missing permission.
pub const PERMISSION_DENIED_CODE: i64 = 10;

/// Codes reserved for permission errors.
pub const PERMISSION_CODE_RANGE: RangeInclusive<i64> = 200..=299;

/// HTTP statuses treated as client failures.
pub const CLIENT_STATUS_RANGE: RangeInclusive<u16> = 400..=499;

/// Category used when no rule matches.
pub const DEFAULT_FALLBACK: ErrorCategory = ErrorCategory::Other;

/// The Graph API rule table, in priority order.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(ErrorCategory::Authentication)
            .matcher(Matcher::error_type(OAUTH_ERROR_TYPE))
            .matcher(Matcher::codes(AUTHENTICATION_CODES))
            .matcher(Matcher::sub_codes(USER_ISSUE_CODE, USER_ISSUE_SUB_CODES)),
        Rule::new(ErrorCategory::Server).matcher(Matcher::codes(SERVER_CODES)),
        Rule::new(ErrorCategory::Throttle).matcher(Matcher::codes(THROTTLE_CODES)),
        Rule::new(ErrorCategory::Authorization)
            .matcher(Matcher::codes([PERMISSION_DENIED_CODE]))
            .matcher(Matcher::code_range(
                *PERMISSION_CODE_RANGE.start(),
                *PERMISSION_CODE_RANGE.end(),
            )),
        Rule::new(ErrorCategory::Client).matcher(Matcher::http_status_range(
            *CLIENT_STATUS_RANGE.start(),
            *CLIENT_STATUS_RANGE.end(),
        )),
    ]
}

/// Serializable form of a classifier's rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub rules: Vec<Rule>,
    #[serde(default = "default_fallback")]
    pub fallback: ErrorCategory,
}

fn default_fallback() -> ErrorCategory {
    DEFAULT_FALLBACK
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            fallback: DEFAULT_FALLBACK,
        }
    }
}

/// Builder for [`Classifier`].
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    rules: Vec<Rule>,
    fallback: Option<ErrorCategory>,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierBuilder {
    /// Start from the Graph API rule table.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            fallback: None,
        }
    }

    /// Start from an empty rule table.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            fallback: None,
        }
    }

    /// Start from an existing rule table.
    pub fn from_table(table: RuleTable) -> Self {
        Self {
            rules: table.rules,
            fallback: Some(table.fallback),
        }
    }

    /// Append a rule with the lowest priority so far.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Insert a rule ahead of every existing one.
    pub fn prepend_rule(mut self, rule: Rule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    /// Add a matcher to the first rule for `category`, or append a new rule
    /// if there is none.
    pub fn extend_category(mut self, category: ErrorCategory, matcher: Matcher) -> Self {
        match self.rules.iter_mut().find(|r| r.category == category) {
            Some(rule) => rule.matchers.push(matcher),
            None => self.rules.push(Rule::new(category).matcher(matcher)),
        }
        self
    }

    /// Set the category used when no rule matches.
    pub fn fallback(mut self, category: ErrorCategory) -> Self {
        self.fallback = Some(category);
        self
    }

    /// Build the classifier.
    pub fn build(self) -> Result<Classifier, crate::Error> {
        for rule in &self.rules {
            rule.validate().map_err(crate::Error::Config)?;
        }

        Ok(Classifier::from_parts(
            self.rules,
            self.fallback.unwrap_or(DEFAULT_FALLBACK),
        ))
    }
}
