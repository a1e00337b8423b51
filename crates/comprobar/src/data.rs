//! Deterministic inputs for the suites: catalog anchors, boundary names,
//! partitioned quantities, and unique registration identities.
//!
//! Everything here is input data. Storefront wording and selectors belong to
//! the page objects in [`crate::page`].

use uuid::Uuid;

// ============================================================================
// Catalog Anchors
// ============================================================================

/// Product id of the MacBook, a stock item on the demo storefront
pub const MACBOOK_PRODUCT_ID: u32 = 43;

/// Display name of the anchor product
pub const MACBOOK_NAME: &str = "MacBook";

/// Category path of the Desktops top-level category
pub const DESKTOPS_CATEGORY_PATH: &str = "20";

// ============================================================================
// Account Data
// ============================================================================

/// Longest first name the registration form accepts
pub const NAME_FIELD_MAX: usize = 32;

/// Well-formed email no account was ever registered under
pub const WRONG_EMAIL: &str = "wrong@email.com";

/// Password that matches no account
pub const WRONG_PASSWORD: &str = "wrongpass";

/// Password satisfying the storefront's length rules
pub const VALID_PASSWORD: &str = "ValidPass123";

/// Email that fails format validation
pub const MALFORMED_EMAIL: &str = "not-an-email";

/// First name of length `len`, for exercising field boundaries
#[must_use]
pub fn boundary_name(len: usize) -> String {
    "A".repeat(len)
}

/// Email address no previous run can have registered
#[must_use]
pub fn unique_email() -> String {
    format!("comprobar-{}@example.com", Uuid::new_v4().simple())
}

// ============================================================================
// Search Data
// ============================================================================

/// Query with a known result on the demo storefront
pub const KNOWN_QUERY: &str = "MacBook";

/// Query far past any sensible input length
#[must_use]
pub fn very_long_query() -> String {
    "a".repeat(255)
}

// ============================================================================
// Cart Quantities
// ============================================================================

/// Quantity inputs the storefront accepts
pub const QUANTITY_ACCEPTED: &[&str] = &["1", "2"];

/// Quantity inputs that must not add anything to the cart
pub const QUANTITY_REJECTED: &[&str] = &["0", "-5"];

// ============================================================================
// Forms
// ============================================================================

/// Field values for the account registration form
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
}

impl RegistrationForm {
    /// A registration identity no previous run can collide with
    #[must_use]
    pub fn unique() -> Self {
        Self {
            first_name: "Ana".to_string(),
            last_name: "Prueba".to_string(),
            email: unique_email(),
            password: VALID_PASSWORD.to_string(),
        }
    }

    /// Replace the first name
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }
}

/// Field values for the product enquiry contact form
#[derive(Debug, Clone)]
pub struct ContactForm {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Enquiry body, at least ten characters
    pub enquiry: String,
}

impl ContactForm {
    /// A well-formed enquiry
    #[must_use]
    pub fn valid() -> Self {
        Self {
            name: "Ana Prueba".to_string(),
            email: unique_email(),
            enquiry: "Is the MacBook in this listing available for bulk order?".to_string(),
        }
    }

    /// Replace the sender email
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod boundary_tests {
        use super::*;

        #[test]
        fn test_boundary_name_length() {
            assert_eq!(boundary_name(1).len(), 1);
            assert_eq!(boundary_name(NAME_FIELD_MAX).len(), 32);
            assert_eq!(boundary_name(NAME_FIELD_MAX + 1).len(), 33);
        }

        #[test]
        fn test_very_long_query_is_ascii() {
            let query = very_long_query();
            assert_eq!(query.len(), 255);
            assert!(query.is_ascii());
        }
    }

    mod identity_tests {
        use super::*;

        #[test]
        fn test_unique_emails_do_not_collide() {
            let first = unique_email();
            let second = unique_email();
            assert_ne!(first, second);
            assert!(first.ends_with("@example.com"));
        }

        #[test]
        fn test_registration_form_is_unique_per_call() {
            let first = RegistrationForm::unique();
            let second = RegistrationForm::unique();
            assert_ne!(first.email, second.email);
            assert_eq!(first.password, VALID_PASSWORD);
        }

        #[test]
        fn test_with_first_name_replaces_only_name() {
            let form = RegistrationForm::unique().with_first_name(boundary_name(33));
            assert_eq!(form.first_name.len(), 33);
            assert_eq!(form.last_name, "Prueba");
        }
    }

    mod partition_tests {
        use super::*;

        #[test]
        fn test_quantity_partitions_are_disjoint() {
            for rejected in QUANTITY_REJECTED {
                assert!(!QUANTITY_ACCEPTED.contains(rejected));
            }
        }

        #[test]
        fn test_rejected_quantities_are_nonpositive() {
            for quantity in QUANTITY_REJECTED {
                let parsed: i64 = quantity.parse().unwrap();
                assert!(parsed <= 0);
            }
        }
    }
}
