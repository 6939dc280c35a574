//! Domain layer
//!
//! Customers, accounts and the persistence ports they need. No framework or
//! database types leak in here.
//! - `entities`: data types and their local invariants
//! - `ports`: repository traits implemented by adapters

pub mod entities;
pub mod ports;
