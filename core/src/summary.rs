//! Display-oriented view of a response: status plus a classified body.
//!
//! # Design
//! Whether a body is shown as structured JSON or as raw text is decided by
//! the `Content-Type` header, not by trial parsing. A body that claims to be
//! JSON but does not parse still falls back to text so it is never lost.

use std::fmt;

use serde_json::Value;

use crate::http::HttpResponse;

/// A response body classified for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn from_response(response: &HttpResponse) -> Self {
        let declared_json = response.header("content-type").is_some_and(is_json_media_type);
        if declared_json {
            if let Ok(value) = serde_json::from_str(&response.body) {
                return ResponseBody::Json(value);
            }
        }
        ResponseBody::Text(response.body.clone())
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

/// `application/json`, or any structured-syntax `+json` type, ignoring
/// parameters such as `charset`.
fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                write!(f, "Response: {pretty}")
            }
            ResponseBody::Text(text) => write!(f, "Response (non-JSON): {text}"),
        }
    }
}

/// Status code and classified body of one response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSummary {
    pub status: u16,
    pub body: ResponseBody,
}

impl ResponseSummary {
    pub fn of(response: &HttpResponse) -> Self {
        Self {
            status: response.status,
            body: ResponseBody::from_response(response),
        }
    }
}

impl fmt::Display for ResponseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        write!(f, "{}", self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(content_type: Option<&str>, body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: content_type
                .map(|ct| vec![("content-type".to_string(), ct.to_string())])
                .unwrap_or_default(),
            body: body.to_string(),
        }
    }

    #[test]
    fn json_content_type_yields_structured_body() {
        let body = ResponseBody::from_response(&response(Some("application/json"), r#"{"a":1}"#));
        assert_eq!(body, ResponseBody::Json(serde_json::json!({"a": 1})));
    }

    #[test]
    fn charset_parameter_and_suffix_types_count_as_json() {
        assert!(is_json_media_type("application/json; charset=utf-8"));
        assert!(is_json_media_type("application/problem+json"));
        assert!(!is_json_media_type("text/plain"));
    }

    #[test]
    fn json_looking_text_without_content_type_stays_text() {
        let body = ResponseBody::from_response(&response(None, r#"{"a":1}"#));
        assert_eq!(body, ResponseBody::Text(r#"{"a":1}"#.to_string()));
    }

    #[test]
    fn malformed_json_falls_back_to_text() {
        let body = ResponseBody::from_response(&response(Some("application/json"), "{oops"));
        assert_eq!(body, ResponseBody::Text("{oops".to_string()));
    }

    #[test]
    fn summary_renders_status_and_body() {
        let summary = ResponseSummary::of(&HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        });
        assert_eq!(summary.to_string(), "Status: 404\nResponse (non-JSON): ");
    }

    #[test]
    fn summary_pretty_prints_json() {
        let summary = ResponseSummary::of(&response(Some("application/json"), r#"{"id":1}"#));
        assert_eq!(summary.to_string(), "Status: 200\nResponse: {\n  \"id\": 1\n}");
    }
}
