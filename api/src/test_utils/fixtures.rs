//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Duration, Utc};

use crate::domain::entities::{
    Account, AccountDraft, AccountNumber, AuditFields, Customer, CustomerDraft, CustomerId,
};

/// Auditor name the services under test are constructed with
pub const TEST_AUDITOR: &str = "Test Service";

/// Audit trail stamped a day ago, so later writes sort strictly after it
fn past_audit() -> AuditFields {
    let yesterday = Utc::now() - Duration::days(1);
    let mut audit = AuditFields::created(yesterday, "fixture");
    audit.touch(yesterday, "fixture");
    audit
}

/// Create a test customer with default values
pub fn test_customer() -> Customer {
    test_customer_with(1, "john.doe@example.com", "81234567")
}

/// Create a test customer with a specific id, email and mobile number
pub fn test_customer_with(id: i64, email: &str, mobile_number: &str) -> Customer {
    Customer {
        id: CustomerId(id),
        name: "John Doe".to_string(),
        email: email.to_string(),
        mobile_number: mobile_number.to_string(),
        audit: past_audit(),
    }
}

/// Create a test account owned by `customer_id`
pub fn test_account(number: AccountNumber, customer_id: CustomerId) -> Account {
    Account {
        number,
        customer_id,
        account_type: "Savings".to_string(),
        branch_address: "1 Raffles Place".to_string(),
        audit: past_audit(),
    }
}

pub fn customer_draft(name: &str, email: &str, mobile_number: &str) -> CustomerDraft {
    CustomerDraft {
        name: name.to_string(),
        email: email.to_string(),
        mobile_number: mobile_number.to_string(),
    }
}

pub fn account_draft(customer_id: CustomerId, account_type: &str, branch_address: &str) -> AccountDraft {
    AccountDraft {
        customer_id,
        account_type: account_type.to_string(),
        branch_address: branch_address.to_string(),
    }
}
