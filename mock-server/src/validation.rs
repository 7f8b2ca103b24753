//! Field rules for customer payloads.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ServiceError;
use crate::CustomerInput;

const MAX_MIDDLE_NAME: usize = 50;

lazy_static! {
    static ref CONTACT_NUMBER: Regex =
        Regex::new(r"^\+?[1-9][0-9]{6,14}$").expect("contact number pattern");
    static ref EMAIL: Regex =
        Regex::new(r"^[^@\s]+@[^@\s.](?:[^@\s]*[^@\s.])?$").expect("email pattern");
}

/// Collects every failing field so the caller sees all problems at once.
pub fn validate_customer(input: &CustomerInput) -> Result<(), ServiceError> {
    let mut failures = Vec::new();

    if input.given_name.trim().is_empty() {
        failures.push("givenName: Given name is required");
    }
    if input
        .middle_name
        .as_deref()
        .is_some_and(|m| m.chars().count() > MAX_MIDDLE_NAME)
    {
        failures.push("middleName: size must be between 0 and 50");
    }
    if input.family_name.trim().is_empty() {
        failures.push("familyName: Family name is required");
    }
    if input.email_address.trim().is_empty() {
        failures.push("emailAddress: Email address is required");
    } else if !is_valid_email(input.email_address.trim()) {
        failures.push("emailAddress: Email address must be valid");
    }
    if input.contact_number.trim().is_empty() {
        failures.push("contactNumber: Contact number is required");
    } else if !is_valid_contact_number(&input.contact_number) {
        failures.push(CONTACT_NUMBER_RULE);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(failures.join(", ")))
    }
}

pub const CONTACT_NUMBER_RULE: &str =
    "contactNumber: Contact number must be 7 to 15 digits, optionally starting with +";

/// Optional leading `+`, then 7 to 15 digits, the first of which is not 0.
pub fn is_valid_contact_number(value: &str) -> bool {
    CONTACT_NUMBER.is_match(value)
}

/// `local@domain` with no whitespace; the domain neither starts nor ends with a dot.
fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Stored and searched emails are compared in this form.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
