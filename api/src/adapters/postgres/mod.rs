//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod account_repo;
pub mod customer_repo;
pub mod schema;


pub use account_repo::PostgresAccountRepository;
pub use customer_repo::PostgresCustomerRepository;
pub use schema::ensure_schema;

use chrono::Utc;
use sea_orm::{prelude::DateTimeWithTimeZone, DbErr, SqlErr};

use crate::domain::entities::AuditFields;

/// Constraint a failed write ran into
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

pub(crate) fn violation(e: &DbErr) -> Option<Violation> {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Some(Violation::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => Some(Violation::ForeignKey),
        _ => None,
    }
}

pub(crate) fn audit_from_columns(
    created_at: DateTimeWithTimeZone,
    created_by: String,
    updated_at: Option<DateTimeWithTimeZone>,
    updated_by: Option<String>,
) -> AuditFields {
    AuditFields {
        created_at: created_at.with_timezone(&Utc),
        created_by,
        updated_at: updated_at.map(|dt| dt.with_timezone(&Utc)),
        updated_by,
    }
}
