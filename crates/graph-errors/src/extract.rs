//! Extraction of error payloads from decoded response bodies.

use crate::types::{ErrorPayload, DEFAULT_MESSAGE};
use serde_json::{Map, Value};

impl ErrorPayload {
    /// Build a payload from a decoded response body.
    ///
    /// The error object is read from the `error` key, or from the top level
    /// when the body has no `error` key but carries a `code`. Missing or
    /// mistyped fields fall back to their defaults; this never fails.
    pub fn extract(body: &Value, http_status: u16) -> Self {
        Self::from_decoded(body.clone(), body.to_string(), http_status)
    }

    /// Decode a raw response body and build a payload from it.
    ///
    /// `raw_body` is kept verbatim. Text that is not valid JSON yields a
    /// payload with default fields.
    pub fn from_raw(raw_body: &str, http_status: u16) -> Self {
        match serde_json::from_str::<Value>(raw_body) {
            Ok(body) => Self::from_decoded(body, raw_body.to_string(), http_status),
            Err(_) => Self::new(http_status).with_raw_body(raw_body),
        }
    }

    fn from_decoded(body: Value, raw_body: String, http_status: u16) -> Self {
        let mut payload = Self::new(http_status).with_raw_body(raw_body);

        if let Some(error) = error_object(&body) {
            payload.code = int_field(error, "code").unwrap_or(0);
            payload.sub_code = int_field(error, "error_subcode").unwrap_or(0);
            payload.error_type = str_field(error, "type").unwrap_or_default();
            payload.message =
                str_field(error, "message").unwrap_or_else(|| DEFAULT_MESSAGE.into());
            payload.user_title = str_field(error, "error_user_title");
            payload.user_message = str_field(error, "error_user_msg");
            payload.trace_id = str_field(error, "fbtrace_id");
        }

        payload.response_data = body;
        payload
    }
}

/// Locate the error object, with or without the `error` envelope.
fn error_object(body: &Value) -> Option<&Map<String, Value>> {
    let top = body.as_object()?;
    match top.get("error") {
        Some(error) => error.as_object(),
        None if top.contains_key("code") => Some(top),
        None => None,
    }
}

fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)?.as_str().map(String::from)
}
