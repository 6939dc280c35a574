//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod account;
pub mod audit;
pub mod customer;

pub use account::{Account, AccountDraft, AccountNumber, AccountPatch, NewAccount};
pub use audit::AuditFields;
pub use customer::{
    Customer, CustomerDraft, CustomerId, CustomerPatch, CustomerWithAccounts, NewCustomer,
};
