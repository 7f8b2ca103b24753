use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub mod error;
pub mod validation;

pub use error::{ErrorBody, ServiceError};

use validation::{is_valid_contact_number, normalize_email, validate_customer, CONTACT_NUMBER_RULE};

/// Collection path served by `app()`.
pub const BASE_PATH: &str = "/api/v1.0/customers";

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS, HEAD";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub given_name: String,
    pub middle_name: Option<String>,
    pub family_name: String,
    pub email_address: String,
    pub contact_number: String,
}

/// Missing string fields deserialize as empty so validation reports them
/// as 400 instead of the extractor rejecting the body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInput {
    pub given_name: String,
    pub middle_name: Option<String>,
    pub family_name: String,
    pub email_address: String,
    pub contact_number: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactParams {
    pub contact_number: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Customer>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/api/v1.0/customers",
            get(list_customers).post(create_customer).options(allowed_methods),
        )
        .route("/api/v1.0/customers/search", get(search_customer))
        .route(
            "/api/v1.0/customers/{id}",
            get(get_customer)
                .head(customer_exists)
                .put(update_customer)
                .delete(delete_customer),
        )
        .route("/api/v1.0/customers/{id}/contact", patch(update_contact))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_customers(State(db): State<Db>) -> Json<Vec<Customer>> {
    let customers = db.read().await;
    Json(customers.values().cloned().collect())
}

async fn get_customer(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ServiceError> {
    let customers = db.read().await;
    customers
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ServiceError::Absent(format!("ID {id}")))
}

async fn search_customer(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Customer>, ServiceError> {
    let email = normalize_email(&params.email);
    let customers = db.read().await;
    customers
        .values()
        .find(|c| c.email_address == email)
        .cloned()
        .map(Json)
        .ok_or_else(|| ServiceError::Absent(format!("email {email}")))
}

async fn create_customer(
    State(db): State<Db>,
    Json(input): Json<CustomerInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_customer(&input)?;
    let email = normalize_email(&input.email_address);

    let mut customers = db.write().await;
    if customers.values().any(|c| c.email_address == email) {
        return Err(ServiceError::DuplicateEmail(email));
    }
    let customer = Customer {
        id: Uuid::new_v4(),
        given_name: input.given_name,
        middle_name: input.middle_name,
        family_name: input.family_name,
        email_address: email,
        contact_number: input.contact_number,
    };
    customers.insert(customer.id, customer.clone());
    tracing::info!(id = %customer.id, "customer created");

    let location = format!("{BASE_PATH}/{}", customer.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(customer)))
}

async fn update_customer(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<Customer>, ServiceError> {
    validate_customer(&input)?;
    let email = normalize_email(&input.email_address);

    let mut customers = db.write().await;
    if !customers.contains_key(&id) {
        return Err(ServiceError::NotFound(id));
    }
    if customers.values().any(|c| c.id != id && c.email_address == email) {
        return Err(ServiceError::DuplicateEmail(email));
    }
    let customer = customers.get_mut(&id).ok_or(ServiceError::NotFound(id))?;
    customer.given_name = input.given_name;
    customer.middle_name = input.middle_name;
    customer.family_name = input.family_name;
    customer.email_address = email;
    customer.contact_number = input.contact_number;
    tracing::info!(%id, "customer updated");
    Ok(Json(customer.clone()))
}

async fn update_contact(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Query(params): Query<ContactParams>,
) -> Result<Json<Customer>, ServiceError> {
    if !is_valid_contact_number(&params.contact_number) {
        return Err(ServiceError::Validation(CONTACT_NUMBER_RULE.to_string()));
    }
    let mut customers = db.write().await;
    let customer = customers
        .get_mut(&id)
        .ok_or_else(|| ServiceError::Absent(format!("ID {id}")))?;
    customer.contact_number = params.contact_number;
    tracing::info!(%id, "contact number updated");
    Ok(Json(customer.clone()))
}

async fn customer_exists(State(db): State<Db>, Path(id): Path<Uuid>) -> StatusCode {
    if db.read().await.contains_key(&id) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn allowed_methods() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOWED_METHODS)])
}

async fn delete_customer(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let mut customers = db.write().await;
    customers.remove(&id).ok_or(ServiceError::NotFound(id))?;
    tracing::info!(%id, "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_serializes_to_camel_case_json() {
        let customer = Customer {
            id: Uuid::nil(),
            given_name: "Alice".to_string(),
            middle_name: None,
            family_name: "Walker".to_string(),
            email_address: "alice@example.com".to_string(),
            contact_number: "+1234567890".to_string(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["givenName"], "Alice");
        assert!(json["middleName"].is_null());
        assert_eq!(json["emailAddress"], "alice@example.com");
    }

    #[test]
    fn customer_input_defaults_missing_fields_to_empty() {
        let input: CustomerInput = serde_json::from_str(r#"{"givenName":"Alice"}"#).unwrap();
        assert_eq!(input.given_name, "Alice");
        assert!(input.family_name.is_empty());
        assert!(input.middle_name.is_none());
    }

    #[test]
    fn contact_params_use_camel_case_key() {
        let params: ContactParams =
            serde_json::from_str(r#"{"contactNumber":"+19876543210"}"#).unwrap();
        assert_eq!(params.contact_number, "+19876543210");
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(ServiceError::NotFound(Uuid::nil()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Absent("ID x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::DuplicateEmail("a@b.c".to_string()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::Validation("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
