//! Rule predicates for the classification table.

use crate::types::{ErrorCategory, ErrorPayload};
use serde::{Deserialize, Serialize};

/// A single predicate over an [`ErrorPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Matcher {
    /// `type` equals the given label exactly.
    ErrorType { value: String },
    /// `code` is one of the listed codes.
    Codes { codes: Vec<i64> },
    /// `code` lies in `start..=end`.
    CodeRange { start: i64, end: i64 },
    /// `code` equals `code` and `sub_code` is one of `sub_codes`.
    SubCodes { code: i64, sub_codes: Vec<i64> },
    /// HTTP status lies in `start..=end`.
    HttpStatusRange { start: u16, end: u16 },
}

impl Matcher {
    pub fn error_type(value: impl Into<String>) -> Self {
        Matcher::ErrorType {
            value: value.into(),
        }
    }

    pub fn codes(codes: impl IntoIterator<Item = i64>) -> Self {
        Matcher::Codes {
            codes: codes.into_iter().collect(),
        }
    }

    pub fn code_range(start: i64, end: i64) -> Self {
        Matcher::CodeRange { start, end }
    }

    pub fn sub_codes(code: i64, sub_codes: impl IntoIterator<Item = i64>) -> Self {
        Matcher::SubCodes {
            code,
            sub_codes: sub_codes.into_iter().collect(),
        }
    }

    pub fn http_status_range(start: u16, end: u16) -> Self {
        Matcher::HttpStatusRange { start, end }
    }

    /// Check the predicate against a payload.
    pub fn matches(&self, payload: &ErrorPayload) -> bool {
        match self {
            Matcher::ErrorType { value } => payload.error_type() == value,
            Matcher::Codes { codes } => codes.contains(&payload.code()),
            Matcher::CodeRange { start, end } => (*start..=*end).contains(&payload.code()),
            Matcher::SubCodes { code, sub_codes } => {
                payload.code() == *code && sub_codes.contains(&payload.sub_code())
            }
            Matcher::HttpStatusRange { start, end } => {
                (*start..=*end).contains(&payload.http_status())
            }
        }
    }

    /// Describe why this matcher can never match, if it can't.
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Matcher::ErrorType { value } if value.is_empty() => {
                Err("error_type matcher needs a non-empty value".into())
            }
            Matcher::Codes { codes } if codes.is_empty() => {
                Err("codes matcher needs at least one code".into())
            }
            Matcher::SubCodes { sub_codes, .. } if sub_codes.is_empty() => {
                Err("sub_codes matcher needs at least one sub-code".into())
            }
            Matcher::CodeRange { start, end } if start > end => {
                Err(format!("code range {}..={} is empty", start, end))
            }
            Matcher::HttpStatusRange { start, end } if start > end => {
                Err(format!("HTTP status range {}..={} is empty", start, end))
            }
            _ => Ok(()),
        }
    }
}

/// Maps a payload to `category` when any of its matchers match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub category: ErrorCategory,
    pub matchers: Vec<Matcher>,
}

impl Rule {
    pub fn new(category: ErrorCategory) -> Self {
        Self {
            category,
            matchers: Vec::new(),
        }
    }

    /// Add a matcher.
    pub fn matcher(mut self, matcher: Matcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn matches(&self, payload: &ErrorPayload) -> bool {
        self.matchers.iter().any(|m| m.matches(payload))
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.matchers.is_empty() {
            return Err(format!("{} rule has no matchers", self.category));
        }
        for matcher in &self.matchers {
            matcher
                .validate()
                .map_err(|reason| format!("{} rule: {}", self.category, reason))?;
        }
        Ok(())
    }
}
