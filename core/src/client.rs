//! Stateless HTTP request builder and response parser for the customer API.
//!
//! # Design
//! `CustomerClient` holds only the base resource URL and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Customer, CustomerRequest};

/// Synchronous, stateless client for the customer API.
///
/// `base_url` is the collection URL itself, e.g.
/// `http://localhost:8080/api/v1.0/customers`.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    base_url: String,
}

impl CustomerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_customer(&self, input: &CustomerRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.base_url.clone(),
            query: Vec::new(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_list_customers(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, self.base_url.clone())
    }

    pub fn build_get_customer(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Get, self.record_path(id))
    }

    pub fn build_search_customer(&self, email: &str) -> HttpRequest {
        let mut req = self.bare(HttpMethod::Get, format!("{}/search", self.base_url));
        req.query.push(("email".to_string(), email.to_string()));
        req
    }

    pub fn build_update_customer(&self, id: Uuid, input: &CustomerRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.record_path(id),
            query: Vec::new(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// The new number goes in the query string, not the body.
    pub fn build_patch_contact(&self, id: Uuid, contact_number: &str) -> HttpRequest {
        let mut req = self.bare(HttpMethod::Patch, format!("{}/contact", self.record_path(id)));
        req.query.push(("contactNumber".to_string(), contact_number.to_string()));
        req
    }

    pub fn build_customer_exists(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Head, self.record_path(id))
    }

    pub fn build_allowed_methods(&self) -> HttpRequest {
        self.bare(HttpMethod::Options, self.base_url.clone())
    }

    pub fn build_delete_customer(&self, id: Uuid) -> HttpRequest {
        self.bare(HttpMethod::Delete, self.record_path(id))
    }

    pub fn parse_create_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        check_status(&response, 201)?;
        decode(&response)
    }

    pub fn parse_list_customers(&self, response: HttpResponse) -> Result<Vec<Customer>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_get_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_search_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_update_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_patch_contact(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    /// `Ok(false)` on 404; absence is an answer here, not an error.
    pub fn parse_customer_exists(&self, response: HttpResponse) -> Result<bool, ApiError> {
        match check_status(&response, 200) {
            Ok(()) => Ok(true),
            Err(ApiError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Methods listed in the `Allow` header, upper-cased, in server order.
    pub fn parse_allowed_methods(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        check_status(&response, 200)?;
        let allow = response.header("allow").ok_or(ApiError::MissingHeader("allow"))?;
        Ok(allow
            .split(',')
            .map(|m| m.trim().to_ascii_uppercase())
            .filter(|m| !m.is_empty())
            .collect())
    }

    pub fn parse_delete_customer(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    fn record_path(&self, id: Uuid) -> String {
        format!("{}/{id}", self.base_url)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        s if s == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        409 => Err(ApiError::Conflict(error_message(&response.body))),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// Pull `message` out of a JSON error body, or return the body unchanged.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
