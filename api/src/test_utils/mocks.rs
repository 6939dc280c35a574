//! In-memory implementations of the repository ports
//!
//! These store data in memory and mirror the constraints the database
//! enforces, so services and handlers see the same errors in tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Account, AccountNumber, Customer, CustomerId, NewAccount, NewCustomer,
};
use crate::domain::ports::{AccountRepository, CustomerRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Customer Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<BTreeMap<CustomerId, Customer>>>,
    next_id: Arc<RwLock<i64>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a customer for testing
    pub fn with_customer(self, customer: Customer) -> Self {
        {
            let mut next_id = self.next_id.write().unwrap();
            *next_id = (*next_id).max(customer.id.0);
            self.customers
                .write()
                .unwrap()
                .insert(customer.id, customer);
        }
        self
    }

    fn clashes(&self, id: Option<CustomerId>, email: &str, mobile_number: &str) -> bool {
        self.customers.read().unwrap().values().any(|c| {
            Some(c.id) != id && (c.email == email || c.mobile_number == mobile_number)
        })
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        Ok(self.customers.read().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        Ok(self.customers.read().unwrap().values().cloned().collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let customers = self.customers.read().unwrap();
        Ok(customers.values().find(|c| c.email == email).cloned())
    }

    async fn find_by_mobile_number(&self, mobile: &str) -> Result<Option<Customer>, DomainError> {
        let customers = self.customers.read().unwrap();
        Ok(customers
            .values()
            .find(|c| c.mobile_number == mobile)
            .cloned())
    }

    async fn exists(&self, id: &CustomerId) -> Result<bool, DomainError> {
        Ok(self.customers.read().unwrap().contains_key(id))
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        if self.clashes(None, &customer.email, &customer.mobile_number) {
            return Err(DomainError::AlreadyExists(
                "Customer with this email or mobile number already exists".to_string(),
            ));
        }

        let id = {
            let mut next_id = self.next_id.write().unwrap();
            *next_id += 1;
            CustomerId(*next_id)
        };

        let created = Customer {
            id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            mobile_number: customer.mobile_number.clone(),
            audit: customer.audit.clone(),
        };
        self.customers.write().unwrap().insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError> {
        if self.clashes(Some(customer.id), &customer.email, &customer.mobile_number) {
            return Err(DomainError::AlreadyExists(
                "Customer with this email or mobile number already exists".to_string(),
            ));
        }

        let mut customers = self.customers.write().unwrap();
        match customers.get_mut(&customer.id) {
            Some(stored) => {
                *stored = customer.clone();
                Ok(customer.clone())
            }
            None => Err(DomainError::NotFound(format!(
                "Customer not found with id: {}",
                customer.id
            ))),
        }
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), DomainError> {
        match self.customers.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!(
                "Customer not found with id: {}",
                id
            ))),
        }
    }
}

// ============================================================================
// In-Memory Account Repository
// ============================================================================

/// Accounts kept in insertion order
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an account for testing
    pub fn with_account(self, account: Account) -> Self {
        self.accounts.write().unwrap().push(account);
        self
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_number(&self, number: &AccountNumber) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().unwrap();
        Ok(accounts.iter().find(|a| a.number == *number).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>, DomainError> {
        Ok(self.accounts.read().unwrap().clone())
    }

    async fn find_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().unwrap();
        Ok(accounts
            .iter()
            .filter(|a| a.customer_id == *customer_id)
            .cloned()
            .collect())
    }

    async fn exists_by_number(&self, number: &AccountNumber) -> Result<bool, DomainError> {
        Ok(self
            .accounts
            .read()
            .unwrap()
            .iter()
            .any(|a| a.number == *number))
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.iter().any(|a| a.number == account.number) {
            return Err(DomainError::AlreadyExists(
                "Account number is already allocated".to_string(),
            ));
        }

        let created = Account {
            number: account.number,
            customer_id: account.customer_id,
            account_type: account.account_type.clone(),
            branch_address: account.branch_address.clone(),
            audit: account.audit.clone(),
        };
        accounts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().unwrap();
        match accounts.iter_mut().find(|a| a.number == account.number) {
            Some(stored) => {
                *stored = account.clone();
                Ok(account.clone())
            }
            None => Err(DomainError::NotFound(format!(
                "Account not found with account number: {}",
                account.number
            ))),
        }
    }

    async fn delete(&self, number: &AccountNumber) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.number != *number);
        if accounts.len() == before {
            return Err(DomainError::NotFound(format!(
                "Account not found with account number: {}",
                number
            )));
        }
        Ok(())
    }
}
