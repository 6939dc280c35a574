//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod accounts;
pub mod customers;
pub mod envelope;
pub mod hello;

pub use accounts::{
    create_account, delete_account, get_account, list_accounts, list_customer_accounts,
    patch_account, update_account,
};
pub use customers::{
    create_customer, delete_customer, get_customer, list_customers, patch_customer,
    update_customer,
};
pub use hello::{health, hello};
