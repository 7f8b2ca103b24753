//! Error types for the customer API client.
//!
//! # Design
//! `NotFound` and `Conflict` get dedicated variants because callers
//! distinguish "the record does not exist" and "the email is taken" from
//! "the server returned an unexpected status." All other non-2xx responses
//! land in `HttpError` with the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `CustomerClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404. The requested customer does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 409, usually a duplicate email address.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The server returned a status other than the expected one, 404 or 409.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A header the operation depends on was absent from the response.
    #[error("missing response header: {0}")]
    MissingHeader(&'static str),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
