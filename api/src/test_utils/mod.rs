//! Test utilities
//!
//! In-memory repository implementations and test fixtures for unit tests.
//!
//! The in-memory repositories back the service tests and the HTTP tests that
//! drive the generic router. `mockall` mocks (generated on the port traits)
//! are used where a test needs to inject a failure or count calls.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
