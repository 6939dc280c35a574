//! Customer handlers
//!
//! Endpoints under `/api/customers`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::envelope::{json_body, path_id, ResponseEnvelope};
use crate::app::validation;
use crate::domain::entities::{CustomerId, CustomerWithAccounts};
use crate::domain::ports::{AccountRepository, CustomerRepository};
use crate::error::AppError;
use crate::AppState;

/// Request body for create, full and partial update.
///
/// Every field is optional here; required-ness is decided per operation by
/// the validation rules.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub account_numbers: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<CustomerWithAccounts> for CustomerResponse {
    fn from(c: CustomerWithAccounts) -> Self {
        let CustomerWithAccounts {
            customer,
            account_numbers,
        } = c;
        Self {
            customer_id: customer.id.0,
            name: customer.name,
            email: customer.email,
            mobile_number: customer.mobile_number,
            account_numbers: account_numbers.into_iter().map(|n| n.0).collect(),
            created_at: customer.audit.created_at,
            created_by: customer.audit.created_by,
            updated_at: customer.audit.updated_at,
            updated_by: customer.audit.updated_by,
        }
    }
}

fn customer_id(path: Result<Path<String>, PathRejection>) -> Result<CustomerId, AppError> {
    path_id(path, "id", "Customer ID").map(CustomerId)
}

/// POST /api/customers
pub async fn create_customer<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<ResponseEnvelope<CustomerResponse>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let req = json_body(payload)?;
    let draft = validation::customer_draft(req.name, req.email, req.mobile_number)?;

    let customer = state.customer_service.create(&draft).await?;

    Ok(ResponseEnvelope::created(
        "Customer created successfully",
        customer.into(),
    ))
}

/// GET /api/customers/:id
pub async fn get_customer<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ResponseEnvelope<CustomerResponse>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let id = customer_id(path)?;
    let customer = state.customer_service.get(&id).await?;
    Ok(ResponseEnvelope::ok(customer.into()))
}

/// GET /api/customers
pub async fn list_customers<CR, AR>(
    State(state): State<AppState<CR, AR>>,
) -> Result<ResponseEnvelope<Vec<CustomerResponse>>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let customers = state.customer_service.list().await?;
    Ok(ResponseEnvelope::ok(
        customers.into_iter().map(Into::into).collect(),
    ))
}

/// PUT /api/customers/:id
pub async fn update_customer<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<ResponseEnvelope<CustomerResponse>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let id = customer_id(path)?;
    let req = json_body(payload)?;
    let draft = validation::customer_draft(req.name, req.email, req.mobile_number)?;

    let customer = state.customer_service.update(&id, &draft).await?;

    Ok(ResponseEnvelope::ok_with(
        "Customer updated successfully",
        customer.into(),
    ))
}

/// PATCH /api/customers/:id
pub async fn patch_customer<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<ResponseEnvelope<CustomerResponse>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let id = customer_id(path)?;
    let req = json_body(payload)?;
    let patch = validation::customer_patch(req.name, req.email, req.mobile_number)?;

    let customer = state.customer_service.patch(&id, &patch).await?;

    Ok(ResponseEnvelope::ok_with(
        "Customer updated successfully",
        customer.into(),
    ))
}

/// DELETE /api/customers/:id
pub async fn delete_customer<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ResponseEnvelope<()>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let id = customer_id(path)?;
    state.customer_service.delete(&id).await?;
    Ok(ResponseEnvelope::empty("Customer deleted successfully"))
}
