//! Schema bootstrap
//!
//! Creates the tables straight from the entity definitions, so unique
//! columns and the accounts → customers foreign key come from one place.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::entity::{accounts, customers};

/// Create any missing tables. Existing tables are left untouched.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_if_missing(db, customers::Entity).await?;
    // accounts references customers, so it must come second
    create_if_missing(db, accounts::Entity).await?;
    Ok(())
}

async fn create_if_missing<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt)).await?;
    tracing::debug!(table = %table, "Table ensured");

    Ok(())
}
