//! Account handlers
//!
//! Endpoints under `/api/accounts`.

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
use crate::domain::entities::{Account, AccountNumber, CustomerId};
use crate::domain::ports::{AccountRepository, CustomerRepository};
use crate::error::AppError;
use crate::AppState;

/// Request body for create, full and partial update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    pub customer_id: Option<i64>,
    pub account_type: Option<String>,
    pub branch_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account_number: i64,
    pub customer_id: i64,
    pub account_type: String,
    pub branch_address: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            account_number: a.number.0,
            customer_id: a.customer_id.0,
            account_type: a.account_type,
            branch_address: a.branch_address,
            created_at: a.audit.created_at,
            created_by: a.audit.created_by,
            updated_at: a.audit.updated_at,
            updated_by: a.audit.updated_by,
        }
    }
}

fn account_number(path: Result<Path<String>, PathRejection>) -> Result<AccountNumber, AppError> {
    path_id(path, "accountNumber", "Account number").map(AccountNumber)
}

fn list(accounts: Vec<Account>) -> ResponseEnvelope<Vec<AccountResponse>> {
    ResponseEnvelope::ok(accounts.into_iter().map(Into::into).collect())
}

/// POST /api/accounts
pub async fn create_account<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<ResponseEnvelope<AccountResponse>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let req = json_body(payload)?;
    let draft = validation::account_draft(req.customer_id, req.account_type, req.branch_address)?;

    let account = state.account_service.create(&draft).await?;

    Ok(ResponseEnvelope::created(
        "Account created successfully",
        account.into(),
    ))
}

/// GET /api/accounts/:account_number
pub async fn get_account<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ResponseEnvelope<AccountResponse>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let number = account_number(path)?;
    let account = state.account_service.get(&number).await?;
    Ok(ResponseEnvelope::ok(account.into()))
}

/// GET /api/accounts
pub async fn list_accounts<CR, AR>(
    State(state): State<AppState<CR, AR>>,
) -> Result<ResponseEnvelope<Vec<AccountResponse>>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    Ok(list(state.account_service.list().await?))
}

/// GET /api/accounts/customer/:customer_id
pub async fn list_customer_accounts<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ResponseEnvelope<Vec<AccountResponse>>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let customer_id = CustomerId(path_id(path, "customerId", "Customer ID")?);
    Ok(list(
        state.account_service.list_by_customer(&customer_id).await?,
    ))
}

/// PUT /api/accounts/:account_number
pub async fn update_account<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<ResponseEnvelope<AccountResponse>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let number = account_number(path)?;
    let req = json_body(payload)?;
    let draft = validation::account_draft(req.customer_id, req.account_type, req.branch_address)?;

    let account = state.account_service.update(&number, &draft).await?;

    Ok(ResponseEnvelope::ok_with(
        "Account updated successfully",
        account.into(),
    ))
}

/// PATCH /api/accounts/:account_number
pub async fn patch_account<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<ResponseEnvelope<AccountResponse>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let number = account_number(path)?;
    let req = json_body(payload)?;
    let patch = validation::account_patch(req.customer_id, req.account_type, req.branch_address)?;

    let account = state.account_service.patch(&number, &patch).await?;

    Ok(ResponseEnvelope::ok_with(
        "Account updated successfully",
        account.into(),
    ))
}

/// DELETE /api/accounts/:account_number
pub async fn delete_account<CR, AR>(
    State(state): State<AppState<CR, AR>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ResponseEnvelope<()>, AppError>
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let number = account_number(path)?;
    state.account_service.delete(&number).await?;
    Ok(ResponseEnvelope::empty("Account deleted successfully"))
}
