//! Customer service
//!
//! Customer CRUD with the uniqueness rules on email and mobile number, and
//! the rule that a customer owning accounts cannot be deleted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{
    AccountNumber, AuditFields, Customer, CustomerDraft, CustomerId, CustomerPatch,
    CustomerWithAccounts, NewCustomer,
};
use crate::domain::ports::{AccountRepository, CustomerRepository};
use crate::error::{AppError, DomainError};

/// Service for managing customers
pub struct CustomerService<CR, AR>
where
    CR: CustomerRepository,
    AR: AccountRepository,
{
    customers: Arc<CR>,
    accounts: Arc<AR>,
    auditor: String,
}

impl<CR, AR> CustomerService<CR, AR>
where
    CR: CustomerRepository,
    AR: AccountRepository,
{
    pub fn new(customers: Arc<CR>, accounts: Arc<AR>, auditor: String) -> Self {
        Self {
            customers,
            accounts,
            auditor,
        }
    }

    /// Register a new customer.
    ///
    /// Email is checked before mobile number, so a request clashing on both
    /// reports the email.
    pub async fn create(&self, draft: &CustomerDraft) -> Result<CustomerWithAccounts, AppError> {
        self.ensure_email_free(&draft.email).await?;
        self.ensure_mobile_number_free(&draft.mobile_number).await?;

        let new_customer = NewCustomer {
            name: draft.name.clone(),
            email: draft.email.clone(),
            mobile_number: draft.mobile_number.clone(),
            audit: AuditFields::created(Utc::now(), &self.auditor),
        };

        let customer = self.customers.create(&new_customer).await?;
        tracing::info!(customer_id = %customer.id, "Customer created");

        Ok(CustomerWithAccounts {
            customer,
            account_numbers: Vec::new(),
        })
    }

    pub async fn get(&self, id: &CustomerId) -> Result<CustomerWithAccounts, AppError> {
        let customer = self.find_existing(id).await?;
        self.with_accounts(customer).await
    }

    /// All customers, each with its account numbers.
    ///
    /// Accounts are loaded once and grouped rather than queried per customer.
    pub async fn list(&self) -> Result<Vec<CustomerWithAccounts>, AppError> {
        let customers = self.customers.find_all().await?;
        let accounts = self.accounts.find_all().await?;

        let mut by_owner: HashMap<CustomerId, Vec<AccountNumber>> = HashMap::new();
        for account in accounts {
            by_owner
                .entry(account.customer_id)
                .or_default()
                .push(account.number);
        }

        Ok(customers
            .into_iter()
            .map(|customer| {
                let account_numbers = by_owner.remove(&customer.id).unwrap_or_default();
                CustomerWithAccounts {
                    customer,
                    account_numbers,
                }
            })
            .collect())
    }

    /// Replace name, email and mobile number
    pub async fn update(
        &self,
        id: &CustomerId,
        draft: &CustomerDraft,
    ) -> Result<CustomerWithAccounts, AppError> {
        let mut customer = self.find_existing(id).await?;

        if customer.email != draft.email {
            self.ensure_email_free(&draft.email).await?;
        }
        if customer.mobile_number != draft.mobile_number {
            self.ensure_mobile_number_free(&draft.mobile_number).await?;
        }

        customer.apply(draft);
        self.save(customer).await
    }

    /// Apply only the fields present in `patch`
    pub async fn patch(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
    ) -> Result<CustomerWithAccounts, AppError> {
        let mut customer = self.find_existing(id).await?;

        if let Some(email) = &patch.email {
            if *email != customer.email {
                self.ensure_email_free(email).await?;
            }
        }
        if let Some(mobile_number) = &patch.mobile_number {
            if *mobile_number != customer.mobile_number {
                self.ensure_mobile_number_free(mobile_number).await?;
            }
        }

        customer.apply_patch(patch);
        self.save(customer).await
    }

    /// Delete a customer that owns no accounts
    pub async fn delete(&self, id: &CustomerId) -> Result<(), AppError> {
        self.find_existing(id).await?;

        let owned = self.accounts.find_by_customer(id).await?;
        if !owned.is_empty() {
            tracing::debug!(customer_id = %id, accounts = owned.len(), "Refusing to delete customer with accounts");
            return Err(AppError::Domain(DomainError::OperationNotAllowed(format!(
                "Cannot delete customer with id {} because they have associated accounts",
                id
            ))));
        }

        self.customers.delete(id).await?;
        tracing::info!(customer_id = %id, "Customer deleted");

        Ok(())
    }

    async fn find_existing(&self, id: &CustomerId) -> Result<Customer, AppError> {
        self.customers.find_by_id(id).await?.ok_or_else(|| {
            AppError::Domain(DomainError::NotFound(format!(
                "Customer not found with id: {}",
                id
            )))
        })
    }

    async fn save(&self, mut customer: Customer) -> Result<CustomerWithAccounts, AppError> {
        customer.audit.touch(Utc::now(), &self.auditor);
        let customer = self.customers.update(&customer).await?;
        tracing::info!(customer_id = %customer.id, "Customer updated");
        self.with_accounts(customer).await
    }

    async fn with_accounts(&self, customer: Customer) -> Result<CustomerWithAccounts, AppError> {
        let account_numbers = self
            .accounts
            .find_by_customer(&customer.id)
            .await?
            .into_iter()
            .map(|a| a.number)
            .collect();

        Ok(CustomerWithAccounts {
            customer,
            account_numbers,
        })
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), AppError> {
        if self.customers.find_by_email(email).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Customer with email {} already exists",
                email
            ))));
        }
        Ok(())
    }

    async fn ensure_mobile_number_free(&self, mobile_number: &str) -> Result<(), AppError> {
        if self
            .customers
            .find_by_mobile_number(mobile_number)
            .await?
            .is_some()
        {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Customer with mobile number {} already exists",
                mobile_number
            ))));
        }
        Ok(())
    }
}
