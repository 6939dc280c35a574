//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Account, AccountNumber, Customer, CustomerId, NewAccount, NewCustomer,
};
use crate::error::DomainError;

/// Repository for Customer entities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError>;

    /// List every customer, oldest first
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError>;

    /// Find a customer by email (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;

    /// Find a customer by mobile number
    async fn find_by_mobile_number(&self, mobile: &str) -> Result<Option<Customer>, DomainError>;

    /// Check whether a customer exists
    async fn exists(&self, id: &CustomerId) -> Result<bool, DomainError>;

    /// Insert a customer; the store assigns the ID
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError>;

    /// Persist every field of an existing customer
    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError>;

    /// Delete a customer. Returns `NotFound` if absent.
    async fn delete(&self, id: &CustomerId) -> Result<(), DomainError>;
}

/// Repository for Account entities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its number
    async fn find_by_number(&self, number: &AccountNumber)
        -> Result<Option<Account>, DomainError>;

    /// List every account, oldest first
    async fn find_all(&self) -> Result<Vec<Account>, DomainError>;

    /// List the accounts owned by a customer
    async fn find_by_customer(&self, customer_id: &CustomerId)
        -> Result<Vec<Account>, DomainError>;

    /// Check whether an account number is already taken
    async fn exists_by_number(&self, number: &AccountNumber) -> Result<bool, DomainError>;

    /// Insert an account with a pre-allocated number
    async fn create(&self, account: &NewAccount) -> Result<Account, DomainError>;

    /// Persist every field of an existing account
    async fn update(&self, account: &Account) -> Result<Account, DomainError>;

    /// Delete an account. Returns `NotFound` if absent.
    async fn delete(&self, number: &AccountNumber) -> Result<(), DomainError>;
}
