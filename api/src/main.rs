//! Bank Accounts API Server
//!
//! Back-office REST service for customers and their bank accounts.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{Method, Uri},
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::Database;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{ensure_schema, PostgresAccountRepository, PostgresCustomerRepository};
use app::{AccountService, CustomerService};
use config::Config;
use domain::ports::{AccountRepository, CustomerRepository};
use error::{AppError, DomainError};

/// Application state shared across all handlers
pub struct AppState<CR, AR>
where
    CR: CustomerRepository,
    AR: AccountRepository,
{
    pub customer_service: Arc<CustomerService<CR, AR>>,
    pub account_service: Arc<AccountService<CR, AR>>,
}

impl<CR, AR> AppState<CR, AR>
where
    CR: CustomerRepository,
    AR: AccountRepository,
{
    pub fn new(customers: Arc<CR>, accounts: Arc<AR>, auditor: &str) -> Self {
        Self {
            customer_service: Arc::new(CustomerService::new(
                customers.clone(),
                accounts.clone(),
                auditor.to_string(),
            )),
            account_service: Arc::new(AccountService::new(
                customers,
                accounts,
                auditor.to_string(),
            )),
        }
    }
}

// Manual impl: the repositories themselves are not Clone
impl<CR, AR> Clone for AppState<CR, AR>
where
    CR: CustomerRepository,
    AR: AccountRepository,
{
    fn clone(&self) -> Self {
        Self {
            customer_service: self.customer_service.clone(),
            account_service: self.account_service.clone(),
        }
    }
}

async fn no_route(method: Method, uri: Uri) -> AppError {
    AppError::Domain(DomainError::NotFound(format!(
        "No endpoint {} {}",
        method,
        uri.path()
    )))
}

/// Build the full router over any repository implementations
pub fn build_router<CR, AR>(state: AppState<CR, AR>) -> Router
where
    CR: CustomerRepository + 'static,
    AR: AccountRepository + 'static,
{
    let api = Router::new()
        .route("/hello", get(handlers::hello))
        // Customers
        .route(
            "/customers",
            post(handlers::create_customer::<CR, AR>).get(handlers::list_customers::<CR, AR>),
        )
        .route(
            "/customers/:id",
            get(handlers::get_customer::<CR, AR>)
                .put(handlers::update_customer::<CR, AR>)
                .patch(handlers::patch_customer::<CR, AR>)
                .delete(handlers::delete_customer::<CR, AR>),
        )
        // Accounts
        .route(
            "/accounts",
            post(handlers::create_account::<CR, AR>).get(handlers::list_accounts::<CR, AR>),
        )
        .route(
            "/accounts/customer/:customer_id",
            get(handlers::list_customer_accounts::<CR, AR>),
        )
        .route(
            "/accounts/:account_number",
            get(handlers::get_account::<CR, AR>)
                .put(handlers::update_account::<CR, AR>)
                .patch(handlers::patch_account::<CR, AR>)
                .delete(handlers::delete_account::<CR, AR>),
        );

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .fallback(no_route)
        // Middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(middleware::from_fn(error::error_envelope)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bank_accounts_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bank Accounts API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.auto_migrate {
        ensure_schema(&db)
            .await
            .context("Failed to create database schema")?;
        tracing::info!("Schema ready");
    }

    // Create adapters and services
    let customer_repo = Arc::new(PostgresCustomerRepository::new(db.clone()));
    let account_repo = Arc::new(PostgresAccountRepository::new(db));
    let state = AppState::new(customer_repo, account_repo, &config.auditor);

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(auditor = %config.auditor, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
