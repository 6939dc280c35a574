//! Account domain entity
//!
//! A bank account owned by exactly one customer and identified by a random
//! 7-digit number.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::audit::AuditFields;
use super::customer::CustomerId;

/// Seven-digit account identifier, also the primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(pub i64);

impl AccountNumber {
    pub const MIN: i64 = 1_000_000;
    pub const MAX: i64 = 9_999_999;

    pub fn range() -> RangeInclusive<i64> {
        Self::MIN..=Self::MAX
    }

    /// Whether the value falls inside the seven-digit allocation range
    pub fn is_in_range(&self) -> bool {
        Self::range().contains(&self.0)
    }
}

impl From<i64> for AccountNumber {
    fn from(n: i64) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub number: AccountNumber,
    pub customer_id: CustomerId,
    pub account_type: String,
    pub branch_address: String,
    pub audit: AuditFields,
}

impl Account {
    pub fn apply(&mut self, draft: &AccountDraft) {
        self.customer_id = draft.customer_id;
        self.account_type = draft.account_type.clone();
        self.branch_address = draft.branch_address.clone();
    }

    pub fn apply_patch(&mut self, patch: &AccountPatch) {
        if let Some(customer_id) = patch.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(account_type) = &patch.account_type {
            self.account_type = account_type.clone();
        }
        if let Some(branch_address) = &patch.branch_address {
            self.branch_address = branch_address.clone();
        }
    }
}

/// Complete, validated account fields (create and full update)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDraft {
    pub customer_id: CustomerId,
    pub account_type: String,
    pub branch_address: String,
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub customer_id: Option<CustomerId>,
    pub account_type: Option<String>,
    pub branch_address: Option<String>,
}

/// Data needed to insert an account; the number is allocated beforehand
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub number: AccountNumber,
    pub customer_id: CustomerId,
    pub account_type: String,
    pub branch_address: String,
    pub audit: AuditFields,
}
