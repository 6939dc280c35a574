//! PostgreSQL adapter for AccountRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{Account, AccountNumber, CustomerId, NewAccount};
use crate::domain::ports::AccountRepository;
use crate::entity::accounts;
use crate::error::DomainError;

use super::{audit_from_columns, violation, Violation};

/// PostgreSQL implementation of AccountRepository
pub struct PostgresAccountRepository {
    db: DatabaseConnection,
}

impl PostgresAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// The foreign key fires when the owner vanished between check and write
fn write_error(e: DbErr, customer_id: CustomerId) -> DomainError {
    match violation(&e) {
        Some(Violation::ForeignKey) => {
            DomainError::NotFound(format!("Customer not found with id: {}", customer_id))
        }
        Some(Violation::Unique) => {
            tracing::debug!(error = %e, "Account number taken concurrently");
            DomainError::AlreadyExists("Account number is already allocated".to_string())
        }
        None => DomainError::Database(e.to_string()),
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_number(
        &self,
        number: &AccountNumber,
    ) -> Result<Option<Account>, DomainError> {
        let result = accounts::Entity::find_by_id(number.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Account>, DomainError> {
        let results = accounts::Entity::find()
            .order_by_asc(accounts::Column::CreatedAt)
            .order_by_asc(accounts::Column::AccountNumber)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Account>, DomainError> {
        let results = accounts::Entity::find()
            .filter(accounts::Column::CustomerId.eq(customer_id.0))
            .order_by_asc(accounts::Column::CreatedAt)
            .order_by_asc(accounts::Column::AccountNumber)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn exists_by_number(&self, number: &AccountNumber) -> Result<bool, DomainError> {
        let count = accounts::Entity::find_by_id(number.0)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, DomainError> {
        let model = accounts::ActiveModel {
            account_number: Set(account.number.0),
            customer_id: Set(account.customer_id.0),
            account_type: Set(account.account_type.clone()),
            branch_address: Set(account.branch_address.clone()),
            created_at: Set(account.audit.created_at.fixed_offset()),
            created_by: Set(account.audit.created_by.clone()),
            updated_at: Set(account.audit.updated_at.map(|t| t.fixed_offset())),
            updated_by: Set(account.audit.updated_by.clone()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, account.customer_id))?;

        Ok(result.into())
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let model = accounts::ActiveModel {
            account_number: Set(account.number.0),
            customer_id: Set(account.customer_id.0),
            account_type: Set(account.account_type.clone()),
            branch_address: Set(account.branch_address.clone()),
            created_at: Set(account.audit.created_at.fixed_offset()),
            created_by: Set(account.audit.created_by.clone()),
            updated_at: Set(account.audit.updated_at.map(|t| t.fixed_offset())),
            updated_by: Set(account.audit.updated_by.clone()),
        };

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!(
                "Account not found with account number: {}",
                account.number
            )),
            e => write_error(e, account.customer_id),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, number: &AccountNumber) -> Result<(), DomainError> {
        let result = accounts::Entity::delete_by_id(number.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!(
                "Account not found with account number: {}",
                number
            )))
        } else {
            Ok(())
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<accounts::Model> for Account {
    fn from(model: accounts::Model) -> Self {
        Account {
            number: AccountNumber(model.account_number),
            customer_id: CustomerId(model.customer_id),
            account_type: model.account_type,
            branch_address: model.branch_address,
            audit: audit_from_columns(
                model.created_at,
                model.created_by,
                model.updated_at,
                model.updated_by,
            ),
        }
    }
}
