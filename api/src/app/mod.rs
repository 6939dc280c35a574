//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and repository ports.

pub mod account_number;
pub mod account_service;
pub mod customer_service;
pub mod validation;

pub use account_service::AccountService;
pub use customer_service::CustomerService;
