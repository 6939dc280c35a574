//! PostgreSQL adapter for CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{Customer, CustomerId, NewCustomer};
use crate::domain::ports::CustomerRepository;
use crate::entity::customers;
use crate::error::DomainError;

use super::{audit_from_columns, violation, Violation};

/// PostgreSQL implementation of CustomerRepository
pub struct PostgresCustomerRepository {
    db: DatabaseConnection,
}

impl PostgresCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique violations mean a concurrent writer took the email or mobile number
fn write_error(e: DbErr) -> DomainError {
    match violation(&e) {
        Some(Violation::Unique) => {
            tracing::debug!(error = %e, "Customer unique constraint violated");
            DomainError::AlreadyExists(
                "Customer with this email or mobile number already exists".to_string(),
            )
        }
        _ => DomainError::Database(e.to_string()),
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        let results = customers::Entity::find()
            .order_by_asc(customers::Column::CustomerId)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find()
            .filter(customers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_mobile_number(&self, mobile: &str) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find()
            .filter(customers::Column::MobileNumber.eq(mobile))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn exists(&self, id: &CustomerId) -> Result<bool, DomainError> {
        let count = customers::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        let model = customers::ActiveModel {
            name: Set(customer.name.clone()),
            email: Set(customer.email.clone()),
            mobile_number: Set(customer.mobile_number.clone()),
            created_at: Set(customer.audit.created_at.fixed_offset()),
            created_by: Set(customer.audit.created_by.clone()),
            updated_at: Set(customer.audit.updated_at.map(|t| t.fixed_offset())),
            updated_by: Set(customer.audit.updated_by.clone()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_error)?;

        Ok(result.into())
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let model = customers::ActiveModel {
            customer_id: Set(customer.id.0),
            name: Set(customer.name.clone()),
            email: Set(customer.email.clone()),
            mobile_number: Set(customer.mobile_number.clone()),
            created_at: Set(customer.audit.created_at.fixed_offset()),
            created_by: Set(customer.audit.created_by.clone()),
            updated_at: Set(customer.audit.updated_at.map(|t| t.fixed_offset())),
            updated_by: Set(customer.audit.updated_by.clone()),
        };

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Customer not found with id: {}", customer.id))
            }
            e => write_error(e),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), DomainError> {
        let result = customers::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey) => DomainError::OperationNotAllowed(format!(
                    "Cannot delete customer with id {} because they have associated accounts",
                    id
                )),
                _ => DomainError::Database(e.to_string()),
            })?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!(
                "Customer not found with id: {}",
                id
            )))
        } else {
            Ok(())
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Customer {
            id: CustomerId(model.customer_id),
            name: model.name,
            email: model.email,
            mobile_number: model.mobile_number,
            audit: audit_from_columns(
                model.created_at,
                model.created_by,
                model.updated_at,
                model.updated_by,
            ),
        }
    }
}
