//! Classification of received `reqwest` responses.
//!
//! The caller owns the client and sends the request; these helpers only
//! consume the response that came back.

use crate::classifier::{default_classifier, Classifier};
use crate::types::{ClassifiedError, ErrorPayload};
use crate::Error;
use tracing::{debug, warn};

impl Classifier {
    /// Read the body of a response and classify it.
    pub async fn classify_http_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ClassifiedError, Error> {
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(self.classify_received(ErrorPayload::from_raw(&body, status), &body))
    }

    /// Read the body of a response and return it, unless the response is an
    /// API error.
    ///
    /// A response is an error when its status is not a success or when its
    /// decoded body carries an `error` object, so a `200` with an error
    /// payload still yields [`Error::Response`].
    pub async fn error_for_response(&self, response: reqwest::Response) -> Result<String, Error> {
        let status = response.status();
        let body = response.text().await?;

        let payload = ErrorPayload::from_raw(&body, status.as_u16());
        if status.is_success() && payload.response_data().get("error").is_none() {
            return Ok(body);
        }

        Err(Error::Response(self.classify_received(payload, &body)))
    }

    fn classify_received(&self, payload: ErrorPayload, body: &str) -> ClassifiedError {
        let status = payload.http_status();
        if payload.response_data().is_null() && body.trim() != "null" {
            warn!(status, body = %body, "error response body is not valid JSON");
        }

        let classified = self.classify_payload(payload);

        debug!(
            status,
            code = classified.code(),
            sub_code = classified.sub_code(),
            category = %classified.category(),
            "classified error response"
        );

        classified
    }
}

/// Read the body of a response and classify it with the Graph API rule table.
pub async fn classify_response(response: reqwest::Response) -> Result<ClassifiedError, Error> {
    default_classifier().classify_http_response(response).await
}

/// Return the body of a response, or its classification under the Graph API
/// rule table if it is an API error.
pub async fn error_for_response(response: reqwest::Response) -> Result<String, Error> {
    default_classifier().error_for_response(response).await
}
