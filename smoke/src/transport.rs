//! Executes `HttpRequest` values built by `customer-core`.
//!
//! # Design
//! `Transport` is the seam between the runner and the network so scenario
//! logic can be driven by scripted responses in tests. `UreqTransport` is the
//! real implementation: a blocking ureq agent with status-as-error disabled,
//! so every status code comes back as data, and a global timeout bounding
//! each call.

use std::time::Duration;

use customer_core::{HttpMethod, HttpRequest, HttpResponse};
use ureq::RequestBuilder;

use crate::error::TransportError;

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

/// Query pairs are percent-encoded by ureq.
fn with_parts<B>(mut builder: RequestBuilder<B>, req: &HttpRequest) -> RequestBuilder<B> {
    for (key, value) in &req.query {
        builder = builder.query(key, value);
    }
    for (key, value) in &req.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let fail = |source: ureq::Error| TransportError {
            method: req.method,
            url: req.path.clone(),
            source,
        };
        let body = req.body.as_deref().unwrap_or_default();

        let result = match req.method {
            HttpMethod::Get => with_parts(self.agent.get(&req.path), req).call(),
            HttpMethod::Head => with_parts(self.agent.head(&req.path), req).call(),
            HttpMethod::Options => with_parts(self.agent.options(&req.path), req).call(),
            HttpMethod::Delete => with_parts(self.agent.delete(&req.path), req).call(),
            HttpMethod::Post => with_parts(self.agent.post(&req.path), req).send(body.as_bytes()),
            HttpMethod::Put => with_parts(self.agent.put(&req.path), req).send(body.as_bytes()),
            HttpMethod::Patch => with_parts(self.agent.patch(&req.path), req).send(body.as_bytes()),
        };
        let mut response = result.map_err(fail)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let body = response.body_mut().read_to_string().map_err(fail)?;

        tracing::debug!(method = %req.method, url = %req.path, status, "response received");
        Ok(HttpResponse { status, headers, body })
    }
}
