//! The ten-step customer lifecycle scenario.
//!
//! # Design
//! Steps run strictly in order, each blocking on its response. Only the `id`
//! and `emailAddress` captured from step 1 flow into later steps.
//!
//! In `Mode::Trace` every response is printed and the run continues whatever
//! the status; only a creation response without an `id` stops it. In
//! `Mode::Verify` the same trace is printed, each step is also checked
//! against the expected outcome, and the first mismatch ends the run.

use std::fmt;
use std::io::Write;

use customer_core::{
    same_email, ApiError, Customer, CustomerClient, CustomerRequest, HttpRequest, HttpResponse, ResponseSummary,
};
use uuid::Uuid;

use crate::config::Config;
use crate::error::RunError;
use crate::transport::Transport;

pub const UPDATED_GIVEN_NAME: &str = "Alicia";
pub const PATCHED_CONTACT_NUMBER: &str = "+19876543210";

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Trace,
    Verify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Create,
    ListAll,
    FetchById,
    SearchByEmail,
    FullUpdate,
    PartialUpdate,
    ExistenceCheck,
    CapabilityDiscovery,
    Delete,
    VerifyDeletion,
}

impl Step {
    pub const ALL: [Step; 10] = [
        Step::Create,
        Step::ListAll,
        Step::FetchById,
        Step::SearchByEmail,
        Step::FullUpdate,
        Step::PartialUpdate,
        Step::ExistenceCheck,
        Step::CapabilityDiscovery,
        Step::Delete,
        Step::VerifyDeletion,
    ];

    pub fn number(self) -> usize {
        Step::ALL.iter().position(|s| *s == self).map_or(0, |i| i + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::Create => "create",
            Step::ListAll => "list all",
            Step::FetchById => "fetch by id",
            Step::SearchByEmail => "search by email",
            Step::FullUpdate => "full update",
            Step::PartialUpdate => "partial update",
            Step::ExistenceCheck => "existence check",
            Step::CapabilityDiscovery => "capability discovery",
            Step::Delete => "delete",
            Step::VerifyDeletion => "verify deletion",
        }
    }

    /// Heading printed before the step's request goes out.
    pub fn heading(self) -> &'static str {
        match self {
            Step::Create => "Creating customer...",
            Step::ListAll => "Getting all customers...",
            Step::FetchById => "Getting customer by ID...",
            Step::SearchByEmail => "Searching customer by email...",
            Step::FullUpdate => "Updating customer...",
            Step::PartialUpdate => "Patching contact number...",
            Step::ExistenceCheck => "HEAD request to check if customer exists...",
            Step::CapabilityDiscovery => "OPTIONS request...",
            Step::Delete => "Deleting customer...",
            Step::VerifyDeletion => "Verifying deletion...",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.name())
    }
}

/// Values taken from the creation response and reused verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub status: u16,
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub mode: Mode,
    pub captured: Captured,
    pub steps: Vec<StepRecord>,
}

impl ScenarioReport {
    pub fn status_of(&self, step: Step) -> Option<u16> {
        self.steps.iter().find(|r| r.step == step).map(|r| r.status)
    }
}

/// `alice-<uuid-v4>@example.com`, unique per run.
pub fn random_email() -> String {
    format!("alice-{}@example.com", Uuid::new_v4())
}

pub fn initial_customer(email: &str) -> CustomerRequest {
    CustomerRequest {
        given_name: "Alice".to_string(),
        middle_name: Some("M".to_string()),
        family_name: "Walker".to_string(),
        email_address: email.to_string(),
        contact_number: "+1234567890".to_string(),
    }
}

pub struct ScenarioRunner<T> {
    client: CustomerClient,
    transport: T,
    mode: Mode,
}

impl<T: Transport> ScenarioRunner<T> {
    pub fn new(config: &Config, transport: T, mode: Mode) -> Self {
        Self {
            client: CustomerClient::new(&config.base_url),
            transport,
            mode,
        }
    }

    /// Run the scenario with a fresh random email.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<ScenarioReport, RunError> {
        self.run_with(initial_customer(&random_email()), out)
    }

    pub fn run_with<W: Write>(&self, mut payload: CustomerRequest, out: &mut W) -> Result<ScenarioReport, RunError> {
        tracing::info!(base_url = self.client.base_url(), mode = ?self.mode, "starting scenario");
        let mut steps = Vec::with_capacity(Step::ALL.len());
        let verify = self.mode == Mode::Verify;
        let c = &self.client;

        // 1. create
        let step = Step::Create;
        let response = self.exchange(step, &c.build_create_customer(&payload)?, out, &mut steps)?;
        print_summary(out, &response)?;
        let captured = if verify {
            let created = c
                .parse_create_customer(response)
                .map_err(|e| RunError::verification(step, e.to_string()))?;
            ensure(step, !created.id.is_nil(), || "server returned a nil id".to_string())?;
            ensure(step, same_email(&created.email_address, &payload.email_address), || {
                format!(
                    "emailAddress {:?} differs from submitted {:?}",
                    created.email_address, payload.email_address
                )
            })?;
            Captured {
                id: created.id,
                email: created.email_address,
            }
        } else {
            capture(&response)?
        };
        tracing::info!(id = %captured.id, email = %captured.email, "customer created");
        let id = captured.id;

        // 2. list all
        let step = Step::ListAll;
        let response = self.exchange(step, &c.build_list_customers(), out, &mut steps)?;
        print_summary(out, &response)?;
        if verify {
            let all = c.parse_list_customers(response).map_err(|e| fail(step, e))?;
            ensure(step, all.iter().any(|cust| cust.id == id), || {
                format!("created customer {id} missing from list of {}", all.len())
            })?;
        }

        // 3. fetch by id
        let step = Step::FetchById;
        let response = self.exchange(step, &c.build_get_customer(id), out, &mut steps)?;
        print_summary(out, &response)?;
        if verify {
            let fetched = c.parse_get_customer(response).map_err(|e| fail(step, e))?;
            expect_record(step, &fetched, id, &payload)?;
        }

        // 4. search by email
        let step = Step::SearchByEmail;
        let response = self.exchange(step, &c.build_search_customer(&captured.email), out, &mut steps)?;
        print_summary(out, &response)?;
        if verify {
            let found = c.parse_search_customer(response).map_err(|e| fail(step, e))?;
            expect_record(step, &found, id, &payload)?;
        }

        // 5. full update
        let step = Step::FullUpdate;
        payload.given_name = UPDATED_GIVEN_NAME.to_string();
        let response = self.exchange(step, &c.build_update_customer(id, &payload)?, out, &mut steps)?;
        print_summary(out, &response)?;
        if verify {
            let updated = c.parse_update_customer(response).map_err(|e| fail(step, e))?;
            expect_record(step, &updated, id, &payload)?;
            let fetched = self.refetch(step, id)?;
            expect_record(step, &fetched, id, &payload)?;
        }

        // 6. partial update
        let step = Step::PartialUpdate;
        payload.contact_number = PATCHED_CONTACT_NUMBER.to_string();
        let response = self.exchange(step, &c.build_patch_contact(id, PATCHED_CONTACT_NUMBER), out, &mut steps)?;
        print_summary(out, &response)?;
        if verify {
            let patched = c.parse_patch_contact(response).map_err(|e| fail(step, e))?;
            expect_record(step, &patched, id, &payload)?;
            let fetched = self.refetch(step, id)?;
            expect_record(step, &fetched, id, &payload)?;
        }

        // 7. existence check
        let step = Step::ExistenceCheck;
        let response = self.exchange(step, &c.build_customer_exists(id), out, &mut steps)?;
        writeln!(out, "Status: {}", response.status)?;
        print_rule(out)?;
        if verify {
            let exists = c.parse_customer_exists(response).map_err(|e| fail(step, e))?;
            ensure(step, exists, || format!("customer {id} reported absent"))?;
        }

        // 8. capability discovery
        let step = Step::CapabilityDiscovery;
        let response = self.exchange(step, &c.build_allowed_methods(), out, &mut steps)?;
        writeln!(out, "Allowed Methods: {}", response.header("allow").unwrap_or("(none)"))?;
        print_rule(out)?;
        if verify {
            let methods = c.parse_allowed_methods(response).map_err(|e| fail(step, e))?;
            for required in ["GET", "POST"] {
                ensure(step, methods.iter().any(|m| m == required), || {
                    format!("{required} not in allowed methods {methods:?}")
                })?;
            }
        }

        // 9. delete
        let step = Step::Delete;
        let response = self.exchange(step, &c.build_delete_customer(id), out, &mut steps)?;
        print_summary(out, &response)?;
        if verify {
            c.parse_delete_customer(response).map_err(|e| fail(step, e))?;
        }

        // 10. verify deletion
        let step = Step::VerifyDeletion;
        let response = self.exchange(step, &c.build_get_customer(id), out, &mut steps)?;
        print_summary(out, &response)?;
        if verify {
            expect_not_found(step, c.parse_get_customer(response).map(|_| ()))?;
            self.confirm_absence(step, id)?;
        }

        tracing::info!(steps = steps.len(), "scenario finished");
        Ok(ScenarioReport {
            mode: self.mode,
            captured,
            steps,
        })
    }

    /// Print the heading, send one request, and record its status.
    fn exchange<W: Write>(
        &self,
        step: Step,
        request: &HttpRequest,
        out: &mut W,
        steps: &mut Vec<StepRecord>,
    ) -> Result<HttpResponse, RunError> {
        writeln!(out, "{}", step.heading())?;
        tracing::debug!(%step, method = %request.method, url = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        steps.push(StepRecord {
            step,
            status: response.status,
        });
        Ok(response)
    }

    /// Follow-up read in verify mode; not printed or recorded.
    fn refetch(&self, step: Step, id: Uuid) -> Result<Customer, RunError> {
        let response = self.transport.execute(&self.client.build_get_customer(id))?;
        self.client
            .parse_get_customer(response)
            .map_err(|e| RunError::verification(step, format!("follow-up fetch: {e}")))
    }

    /// Absence must hold for HEAD, and keep holding for a repeated
    /// delete and a repeated fetch.
    fn confirm_absence(&self, step: Step, id: Uuid) -> Result<(), RunError> {
        let c = &self.client;

        let exists = c
            .parse_customer_exists(self.transport.execute(&c.build_customer_exists(id))?)
            .map_err(|e| fail(step, e))?;
        ensure(step, !exists, || format!("HEAD still reports customer {id}"))?;

        let repeat_delete = c.parse_delete_customer(self.transport.execute(&c.build_delete_customer(id))?);
        expect_not_found(step, repeat_delete)?;

        let repeat_fetch = c.parse_get_customer(self.transport.execute(&c.build_get_customer(id))?);
        expect_not_found(step, repeat_fetch.map(|_| ()))
    }
}

/// Pull `id` and `emailAddress` out of a creation response of any status.
fn capture(response: &HttpResponse) -> Result<Captured, RunError> {
    let summary = ResponseSummary::of(response);
    let body = summary.body.as_json().ok_or_else(|| {
        RunError::Capture(format!("status {} with a non-JSON body", response.status))
    })?;
    let id = body
        .get("id")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<Uuid>().ok())
        .ok_or_else(|| RunError::Capture(format!("status {} without a usable id", response.status)))?;
    let email = body
        .get("emailAddress")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RunError::Capture(format!("status {} without an emailAddress", response.status)))?;
    Ok(Captured {
        id,
        email: email.to_string(),
    })
}

fn print_summary<W: Write>(out: &mut W, response: &HttpResponse) -> std::io::Result<()> {
    writeln!(out, "{}", ResponseSummary::of(response))?;
    print_rule(out)
}

fn print_rule<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn fail(step: Step, err: ApiError) -> RunError {
    RunError::verification(step, err.to_string())
}

fn ensure(step: Step, condition: bool, reason: impl FnOnce() -> String) -> Result<(), RunError> {
    if condition {
        Ok(())
    } else {
        Err(RunError::verification(step, reason()))
    }
}

fn expect_record(step: Step, customer: &Customer, id: Uuid, payload: &CustomerRequest) -> Result<(), RunError> {
    ensure(step, customer.id == id, || format!("expected customer {id}, got {}", customer.id))?;
    ensure(step, customer.matches(payload), || {
        format!("record {:?} does not match expected {:?}", customer.to_request(), payload)
    })
}

fn expect_not_found(step: Step, result: Result<(), ApiError>) -> Result<(), RunError> {
    match result {
        Err(ApiError::NotFound) => Ok(()),
        Ok(()) => Err(RunError::verification(step, "customer still present")),
        Err(e) => Err(RunError::verification(step, format!("expected not found, got: {e}"))),
    }
}
