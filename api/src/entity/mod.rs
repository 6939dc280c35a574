//! SeaORM entity models
//!
//! Table mappings used by the PostgreSQL adapters. Domain code never sees
//! these types; the adapters convert at the boundary.

pub mod accounts;
pub mod customers;
