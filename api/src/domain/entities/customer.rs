//! Customer domain entity
//!
//! A bank customer, identified by a database-generated surrogate key and
//! uniquely keyed by email and mobile number.

use serde::{Deserialize, Serialize};

use super::account::AccountNumber;
use super::audit::AuditFields;

/// Surrogate key assigned by the store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub audit: AuditFields,
}

impl Customer {
    /// Overwrite every mutable field with the values in `draft`
    pub fn apply(&mut self, draft: &CustomerDraft) {
        self.name = draft.name.clone();
        self.email = draft.email.clone();
        self.mobile_number = draft.mobile_number.clone();
    }

    /// Overwrite only the fields present in `patch`
    pub fn apply_patch(&mut self, patch: &CustomerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(mobile_number) = &patch.mobile_number {
            self.mobile_number = mobile_number.clone();
        }
    }
}

/// Complete, validated customer fields (create and full update)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
}

/// Validated partial update: `None` means "leave as is"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
}

/// Data needed to insert a customer
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub audit: AuditFields,
}

/// A customer together with the numbers of the accounts it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerWithAccounts {
    pub customer: Customer,
    pub account_numbers: Vec<AccountNumber>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_customer() -> Customer {
        Customer {
            id: CustomerId(7),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            mobile_number: "81234567".to_string(),
            audit: AuditFields::created(Utc::now(), "test"),
        }
    }

    #[test]
    fn apply_replaces_every_field() {
        let mut customer = make_customer();
        customer.apply(&CustomerDraft {
            name: "Jane Roe".to_string(),
            email: "jane@example.com".to_string(),
            mobile_number: "98765432".to_string(),
        });

        assert_eq!(customer.id, CustomerId(7));
        assert_eq!(customer.name, "Jane Roe");
        assert_eq!(customer.email, "jane@example.com");
        assert_eq!(customer.mobile_number, "98765432");
    }

    #[test]
    fn apply_patch_keeps_absent_fields() {
        let mut customer = make_customer();
        customer.apply_patch(&CustomerPatch {
            name: Some("Johnny".to_string()),
            ..Default::default()
        });

        assert_eq!(customer.name, "Johnny");
        assert_eq!(customer.email, "john@example.com");
        assert_eq!(customer.mobile_number, "81234567");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut customer = make_customer();
        let before = customer.clone();
        customer.apply_patch(&CustomerPatch::default());
        assert_eq!(customer, before);
    }

    #[test]
    fn customer_id_display() {
        assert_eq!(CustomerId(42).to_string(), "42");
    }
}
