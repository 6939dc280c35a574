//! Account service
//!
//! Account CRUD. An account may only ever point at a customer that exists;
//! that is checked on create and whenever the owner changes.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{
    Account, AccountDraft, AccountNumber, AccountPatch, AuditFields, CustomerId, NewAccount,
};
use crate::domain::ports::{AccountRepository, CustomerRepository};
use crate::error::{AppError, DomainError};

use super::account_number::{AccountNumberGenerator, MAX_ATTEMPTS};

/// Service for managing accounts
pub struct AccountService<CR, AR>
where
    CR: CustomerRepository,
    AR: AccountRepository,
{
    customers: Arc<CR>,
    accounts: Arc<AR>,
    numbers: AccountNumberGenerator<AR>,
    auditor: String,
}

impl<CR, AR> AccountService<CR, AR>
where
    CR: CustomerRepository,
    AR: AccountRepository,
{
    pub fn new(customers: Arc<CR>, accounts: Arc<AR>, auditor: String) -> Self {
        Self {
            numbers: AccountNumberGenerator::new(accounts.clone()),
            customers,
            accounts,
            auditor,
        }
    }

    /// Open an account for an existing customer.
    ///
    /// The owner is checked before a number is drawn, so a request for an
    /// unknown customer costs no allocation. A number taken by a concurrent
    /// insert between the draw and the write is redrawn, within the same
    /// attempt budget the generator uses.
    pub async fn create(&self, draft: &AccountDraft) -> Result<Account, AppError> {
        self.ensure_customer_exists(&draft.customer_id).await?;

        for attempt in 1..=MAX_ATTEMPTS {
            let new_account = NewAccount {
                number: self.numbers.generate().await?,
                customer_id: draft.customer_id,
                account_type: draft.account_type.clone(),
                branch_address: draft.branch_address.clone(),
                audit: AuditFields::created(Utc::now(), &self.auditor),
            };

            match self.accounts.create(&new_account).await {
                Ok(account) => {
                    tracing::info!(
                        account_number = %account.number,
                        customer_id = %account.customer_id,
                        "Account created"
                    );
                    return Ok(account);
                }
                Err(DomainError::AlreadyExists(_)) => {
                    tracing::debug!(
                        attempt,
                        account_number = %new_account.number,
                        "Account number taken at insert"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(
            attempts = MAX_ATTEMPTS,
            "Every allocated account number was taken at insert"
        );
        Err(AppError::Domain(DomainError::GenerationFailed(format!(
            "Unable to generate unique account number after {} attempts",
            MAX_ATTEMPTS
        ))))
    }

    pub async fn get(&self, number: &AccountNumber) -> Result<Account, AppError> {
        self.find_existing(number).await
    }

    pub async fn list(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.accounts.find_all().await?)
    }

    /// Accounts owned by a customer; the customer itself must exist
    pub async fn list_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Account>, AppError> {
        self.ensure_customer_exists(customer_id).await?;
        Ok(self.accounts.find_by_customer(customer_id).await?)
    }

    /// Replace owner, type and branch
    pub async fn update(
        &self,
        number: &AccountNumber,
        draft: &AccountDraft,
    ) -> Result<Account, AppError> {
        let mut account = self.find_existing(number).await?;

        if account.customer_id != draft.customer_id {
            self.ensure_customer_exists(&draft.customer_id).await?;
        }

        account.apply(draft);
        self.save(account).await
    }

    /// Apply only the fields present in `patch`
    pub async fn patch(
        &self,
        number: &AccountNumber,
        patch: &AccountPatch,
    ) -> Result<Account, AppError> {
        let mut account = self.find_existing(number).await?;

        if let Some(customer_id) = patch.customer_id {
            if customer_id != account.customer_id {
                self.ensure_customer_exists(&customer_id).await?;
            }
        }

        account.apply_patch(patch);
        self.save(account).await
    }

    pub async fn delete(&self, number: &AccountNumber) -> Result<(), AppError> {
        self.find_existing(number).await?;
        self.accounts.delete(number).await?;
        tracing::info!(account_number = %number, "Account deleted");
        Ok(())
    }

    async fn find_existing(&self, number: &AccountNumber) -> Result<Account, AppError> {
        self.accounts.find_by_number(number).await?.ok_or_else(|| {
            AppError::Domain(DomainError::NotFound(format!(
                "Account not found with account number: {}",
                number
            )))
        })
    }

    async fn save(&self, mut account: Account) -> Result<Account, AppError> {
        account.audit.touch(Utc::now(), &self.auditor);
        let account = self.accounts.update(&account).await?;
        tracing::info!(account_number = %account.number, "Account updated");
        Ok(account)
    }

    async fn ensure_customer_exists(&self, id: &CustomerId) -> Result<(), AppError> {
        if !self.customers.exists(id).await? {
            return Err(AppError::Domain(DomainError::NotFound(format!(
                "Customer not found with id: {}",
                id
            ))));
        }
        Ok(())
    }
}
