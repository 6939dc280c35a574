//! Request field rules
//!
//! Turns loosely-typed request fields into validated drafts and patches.
//! Every failing field is reported, not just the first one.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::{AccountDraft, AccountPatch, CustomerDraft, CustomerId, CustomerPatch};
use crate::error::{DomainError, FieldErrors};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[89][0-9]{7}$").expect("mobile pattern"));

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 100;
const ACCOUNT_TYPE_MAX: usize = 100;
const BRANCH_ADDRESS_MAX: usize = 200;

/// All three fields required (create, full update)
pub fn customer_draft(
    name: Option<String>,
    email: Option<String>,
    mobile_number: Option<String>,
) -> Result<CustomerDraft, DomainError> {
    let mut errors = FieldErrors::new();

    let name = required(&mut errors, "name", "Name", name);
    let email = required(&mut errors, "email", "Email", email);
    let mobile_number = required(&mut errors, "mobileNumber", "Mobile number", mobile_number);

    check_customer_fields(&mut errors, name.as_deref(), email.as_deref(), mobile_number.as_deref());

    match (name, email, mobile_number) {
        (Some(name), Some(email), Some(mobile_number)) => errors.into_result(CustomerDraft {
            name,
            email,
            mobile_number,
        }),
        _ => Err(DomainError::Validation(errors)),
    }
}

/// Any subset of fields; the ones present follow the same rules
pub fn customer_patch(
    name: Option<String>,
    email: Option<String>,
    mobile_number: Option<String>,
) -> Result<CustomerPatch, DomainError> {
    let mut errors = FieldErrors::new();

    check_customer_fields(&mut errors, name.as_deref(), email.as_deref(), mobile_number.as_deref());

    errors.into_result(CustomerPatch {
        name,
        email,
        mobile_number,
    })
}

/// All three fields required (create, full update)
pub fn account_draft(
    customer_id: Option<i64>,
    account_type: Option<String>,
    branch_address: Option<String>,
) -> Result<AccountDraft, DomainError> {
    let mut errors = FieldErrors::new();

    if customer_id.is_none() {
        errors.add("customerId", "Customer ID cannot be null");
    }
    let account_type = required(&mut errors, "accountType", "Account type", account_type);
    let branch_address = required(&mut errors, "branchAddress", "Branch address", branch_address);

    check_account_fields(
        &mut errors,
        customer_id,
        account_type.as_deref(),
        branch_address.as_deref(),
    );

    match (customer_id, account_type, branch_address) {
        (Some(customer_id), Some(account_type), Some(branch_address)) => {
            errors.into_result(AccountDraft {
                customer_id: CustomerId(customer_id),
                account_type,
                branch_address,
            })
        }
        _ => Err(DomainError::Validation(errors)),
    }
}

pub fn account_patch(
    customer_id: Option<i64>,
    account_type: Option<String>,
    branch_address: Option<String>,
) -> Result<AccountPatch, DomainError> {
    let mut errors = FieldErrors::new();

    check_account_fields(
        &mut errors,
        customer_id,
        account_type.as_deref(),
        branch_address.as_deref(),
    );

    errors.into_result(AccountPatch {
        customer_id: customer_id.map(CustomerId),
        account_type,
        branch_address,
    })
}

fn check_customer_fields(
    errors: &mut FieldErrors,
    name: Option<&str>,
    email: Option<&str>,
    mobile_number: Option<&str>,
) {
    if let Some(name) = name {
        check_text(errors, "name", "Name", name, NAME_MAX);
    }
    if let Some(email) = email {
        check_text(errors, "email", "Email", email, EMAIL_MAX);
        if !EMAIL.is_match(email) {
            errors.add("email", "Email should be valid");
        }
    }
    if let Some(mobile_number) = mobile_number {
        if mobile_number.trim().is_empty() {
            errors.add("mobileNumber", "Mobile number cannot be blank");
        } else if !MOBILE_NUMBER.is_match(mobile_number) {
            errors.add(
                "mobileNumber",
                "Mobile number should be 8 digits starting with 8 or 9",
            );
        }
    }
}

fn check_account_fields(
    errors: &mut FieldErrors,
    customer_id: Option<i64>,
    account_type: Option<&str>,
    branch_address: Option<&str>,
) {
    if let Some(id) = customer_id {
        if id <= 0 {
            errors.add("customerId", "Customer ID must be positive");
        }
    }
    if let Some(account_type) = account_type {
        check_text(
            errors,
            "accountType",
            "Account type",
            account_type,
            ACCOUNT_TYPE_MAX,
        );
    }
    if let Some(branch_address) = branch_address {
        check_text(
            errors,
            "branchAddress",
            "Branch address",
            branch_address,
            BRANCH_ADDRESS_MAX,
        );
    }
}

/// Records "cannot be blank" for a missing field and passes the value on
fn required(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: Option<String>,
) -> Option<String> {
    if value.is_none() {
        errors.add(field, format!("{} cannot be blank", label));
    }
    value
}

fn check_text(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} cannot be blank", label));
    } else if value.chars().count() > max {
        errors.add(field, format!("{} cannot exceed {} characters", label, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn field_errors(result: Result<impl std::fmt::Debug, DomainError>) -> FieldErrors {
        match result {
            Err(DomainError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_customer_draft() {
        let draft = customer_draft(s("John Doe"), s("john@x.com"), s("81234567")).unwrap();
        assert_eq!(draft.name, "John Doe");
        assert_eq!(draft.email, "john@x.com");
        assert_eq!(draft.mobile_number, "81234567");
    }

    #[test]
    fn customer_draft_reports_every_missing_field() {
        let errors = field_errors(customer_draft(None, None, None));
        assert_eq!(errors.get("name"), Some("Name cannot be blank"));
        assert_eq!(errors.get("email"), Some("Email cannot be blank"));
        assert_eq!(errors.get("mobileNumber"), Some("Mobile number cannot be blank"));
    }

    #[test]
    fn blank_strings_are_blank() {
        let errors = field_errors(customer_draft(s("   "), s("john@x.com"), s("81234567")));
        assert_eq!(errors.get("name"), Some("Name cannot be blank"));
        assert_eq!(errors.get("email"), None);
    }

    #[test]
    fn email_pattern() {
        for bad in ["john", "john@", "john@x", "@x.com", "john@x.c", "jo hn@x.com"] {
            let errors = field_errors(customer_draft(s("J"), s(bad), s("81234567")));
            assert_eq!(errors.get("email"), Some("Email should be valid"), "{}", bad);
        }
        for good in ["john.doe@example.com", "a+b@sub.domain.org", "x_y%z@d-e.io"] {
            assert!(customer_draft(s("J"), s(good), s("81234567")).is_ok(), "{}", good);
        }
    }

    #[test]
    fn mobile_number_pattern() {
        for bad in ["71234567", "8123456", "812345678", "8123456a", "+6581234567"] {
            let errors = field_errors(customer_draft(s("J"), s("j@x.com"), s(bad)));
            assert_eq!(
                errors.get("mobileNumber"),
                Some("Mobile number should be 8 digits starting with 8 or 9"),
                "{}",
                bad
            );
        }
        assert!(customer_draft(s("J"), s("j@x.com"), s("91234567")).is_ok());
    }

    #[test]
    fn overlong_mobile_number_reports_the_pattern() {
        let errors = field_errors(customer_draft(s("J"), s("j@x.com"), s(&"8".repeat(25))));
        assert_eq!(
            errors.get("mobileNumber"),
            Some("Mobile number should be 8 digits starting with 8 or 9")
        );

        let errors = field_errors(customer_patch(None, None, s("  ")));
        assert_eq!(errors.get("mobileNumber"), Some("Mobile number cannot be blank"));
    }

    #[test]
    fn name_length_limit() {
        let long = "a".repeat(101);
        let errors = field_errors(customer_draft(Some(long), s("j@x.com"), s("81234567")));
        assert_eq!(errors.get("name"), Some("Name cannot exceed 100 characters"));

        assert!(customer_draft(Some("a".repeat(100)), s("j@x.com"), s("81234567")).is_ok());
    }

    #[test]
    fn empty_customer_patch_is_valid() {
        let patch = customer_patch(None, None, None).unwrap();
        assert_eq!(patch, CustomerPatch::default());
    }

    #[test]
    fn customer_patch_checks_present_fields() {
        let errors = field_errors(customer_patch(None, s("not-an-email"), None));
        assert_eq!(errors.get("email"), Some("Email should be valid"));
        assert_eq!(errors.get("name"), None);

        let errors = field_errors(customer_patch(s(""), None, None));
        assert_eq!(errors.get("name"), Some("Name cannot be blank"));
    }

    #[test]
    fn valid_account_draft() {
        let draft = account_draft(Some(3), s("Savings"), s("1 Raffles Place")).unwrap();
        assert_eq!(draft.customer_id, CustomerId(3));
        assert_eq!(draft.account_type, "Savings");
    }

    #[test]
    fn account_draft_missing_fields() {
        let errors = field_errors(account_draft(None, None, s("")));
        assert_eq!(errors.get("customerId"), Some("Customer ID cannot be null"));
        assert_eq!(errors.get("accountType"), Some("Account type cannot be blank"));
        assert_eq!(errors.get("branchAddress"), Some("Branch address cannot be blank"));
    }

    #[test]
    fn account_customer_id_must_be_positive() {
        let errors = field_errors(account_draft(Some(0), s("Savings"), s("X")));
        assert_eq!(errors.get("customerId"), Some("Customer ID must be positive"));

        let errors = field_errors(account_patch(Some(-4), None, None));
        assert_eq!(errors.get("customerId"), Some("Customer ID must be positive"));
    }

    #[test]
    fn branch_address_length_limit() {
        let errors = field_errors(account_draft(Some(1), s("Savings"), Some("b".repeat(201))));
        assert_eq!(
            errors.get("branchAddress"),
            Some("Branch address cannot exceed 200 characters")
        );
    }

    #[test]
    fn account_patch_keeps_absent_fields_absent() {
        let patch = account_patch(None, s("Checking"), None).unwrap();
        assert_eq!(patch.customer_id, None);
        assert_eq!(patch.account_type.as_deref(), Some("Checking"));
        assert_eq!(patch.branch_address, None);
    }
}
