//! Account number allocation
//!
//! Numbers are drawn uniformly from the seven-digit range with the OS RNG so
//! they cannot be guessed from their neighbours. A draw that hits an existing
//! account is discarded and redrawn, up to `MAX_ATTEMPTS` times.

use std::sync::Arc;

use rand::{rngs::OsRng, Rng};

use crate::domain::entities::AccountNumber;
use crate::domain::ports::AccountRepository;
use crate::error::DomainError;

/// Draws allowed before giving up on a single allocation
pub const MAX_ATTEMPTS: usize = 100;

/// Allocates unused account numbers
pub struct AccountNumberGenerator<AR>
where
    AR: AccountRepository,
{
    accounts: Arc<AR>,
}

impl<AR> AccountNumberGenerator<AR>
where
    AR: AccountRepository,
{
    pub fn new(accounts: Arc<AR>) -> Self {
        Self { accounts }
    }

    /// Return a number no persisted account currently uses.
    ///
    /// Fails with `GenerationFailed` once `MAX_ATTEMPTS` consecutive draws
    /// collide. There is no sequential fallback.
    pub async fn generate(&self) -> Result<AccountNumber, DomainError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let candidate = draw();

            if !self.accounts.exists_by_number(&candidate).await? {
                if attempt > 1 {
                    tracing::debug!(attempt, account_number = %candidate, "Allocated account number after collisions");
                }
                return Ok(candidate);
            }

            tracing::debug!(attempt, account_number = %candidate, "Account number already taken");
        }

        tracing::warn!(
            attempts = MAX_ATTEMPTS,
            "Account number space exhausted for this request"
        );

        Err(DomainError::GenerationFailed(format!(
            "Unable to generate unique account number after {} attempts",
            MAX_ATTEMPTS
        )))
    }
}

fn draw() -> AccountNumber {
    let mut rng = OsRng;
    AccountNumber(rng.gen_range(AccountNumber::range()))
}
