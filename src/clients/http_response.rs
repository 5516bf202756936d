//! HTTP response types for the ChannelApe client.
//!
//! This module provides the [`HttpResponse`] type: a delivered answer from
//! the server, whatever its status code.

use std::collections::HashMap;

/// An HTTP response from the ChannelApe API.
///
/// The body is kept as raw text so that error diagnostics can echo exactly
/// what the server sent. Use [`HttpResponse::json`] to parse it.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use channelape::clients::HttpResponse;
///
/// let response = HttpResponse::new(404, HashMap::new(), r#"{"errors":[]}"#);
/// assert_eq!(response.code, 404);
/// assert_eq!(response.status_text, "Not Found");
/// assert!(response.json().unwrap()["errors"].is_array());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The canonical reason phrase for `code`, or an empty string if unknown.
    pub status_text: String,
    /// Response headers, keyed by lower-case name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, deriving the status text from the code.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            code,
            status_text,
            headers,
            body: body.into(),
        }
    }

    /// Parses the body as JSON.
    ///
    /// An empty body parses as `null`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body)
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_text_is_canonical_reason() {
        assert_eq!(HttpResponse::new(200, HashMap::new(), "").status_text, "OK");
        assert_eq!(
            HttpResponse::new(202, HashMap::new(), "").status_text,
            "Accepted"
        );
        assert_eq!(
            HttpResponse::new(404, HashMap::new(), "").status_text,
            "Not Found"
        );
    }

    #[test]
    fn test_status_text_is_empty_for_unknown_code() {
        let response = HttpResponse::new(599, HashMap::new(), "");
        assert_eq!(response.status_text, "");
    }

    #[test]
    fn test_empty_body_parses_as_null() {
        let response = HttpResponse::new(200, HashMap::new(), "  ");
        assert_eq!(response.json().unwrap(), json!(null));
    }

    #[test]
    fn test_invalid_json_body_is_an_error() {
        let response = HttpResponse::new(502, HashMap::new(), "<html>Bad Gateway</html>");
        assert!(response.json().is_err());
        assert_eq!(response.body, "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);

        let response = HttpResponse::new(200, headers, "{}");
        assert_eq!(response.header("X-Request-Id"), Some("abc-123"));
        assert_eq!(response.header("retry-after"), None);
    }
}
