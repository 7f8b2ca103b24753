//! Synchronous API client core for the customer service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `CustomerClient` is stateless. It holds only the base resource URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ResponseSummary` classifies any response for display without
//!   assuming it succeeded.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod summary;
pub mod types;

pub use client::CustomerClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use summary::{ResponseBody, ResponseSummary};
pub use types::{same_email, Customer, CustomerRequest};
