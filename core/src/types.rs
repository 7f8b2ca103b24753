//! Domain DTOs for the customer API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The wire format uses camelCase field names; `middleName` is the only
//! optional field. Integration tests catch any schema drift between the two
//! crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub given_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub family_name: String,
    pub email_address: String,
    pub contact_number: String,
}

impl Customer {
    /// True when every payload field matches `request`. The id is ignored and
    /// emails are compared with [`same_email`].
    pub fn matches(&self, request: &CustomerRequest) -> bool {
        self.given_name == request.given_name
            && self.middle_name == request.middle_name
            && self.family_name == request.family_name
            && same_email(&self.email_address, &request.email_address)
            && self.contact_number == request.contact_number
    }

    /// The payload that would recreate this record as-is.
    pub fn to_request(&self) -> CustomerRequest {
        CustomerRequest {
            given_name: self.given_name.clone(),
            middle_name: self.middle_name.clone(),
            family_name: self.family_name.clone(),
            email_address: self.email_address.clone(),
            contact_number: self.contact_number.clone(),
        }
    }
}

/// Emails are stored trimmed and lower-cased, so a submitted address and the
/// stored one are equal in that form.
pub fn same_email(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Request payload for creating a customer or replacing one in full.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub given_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub family_name: String,
    pub email_address: String,
    pub contact_number: String,
}
