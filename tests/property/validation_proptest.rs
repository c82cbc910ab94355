//! Property-based tests for credential validation

use proptest::prelude::*;

use listshare::backend::auth::validation::{validate_email, validate_password, MIN_PASSWORD_LENGTH};

proptest! {
    #[test]
    fn test_email_normalization_is_stable(
        local in "[A-Za-z0-9._]{1,12}",
        domain in "[A-Za-z0-9]{1,10}",
        tld in "[A-Za-z]{2,4}",
    ) {
        let raw = format!("  {}@{}.{} ", local, domain, tld);
        let normalized = validate_email(&raw).unwrap();

        prop_assert_eq!(&normalized, &normalized.to_lowercase());
        prop_assert_eq!(validate_email(&normalized).unwrap(), normalized);
    }

    #[test]
    fn test_email_without_at_is_rejected(text in "[a-z0-9.]{0,20}") {
        prop_assert!(validate_email(&text).is_err());
    }

    #[test]
    fn test_short_passwords_are_rejected(password in "[a-z0-9]{0,7}") {
        prop_assert!(password.chars().count() < MIN_PASSWORD_LENGTH);
        prop_assert!(validate_password(&password).is_err());
    }

    #[test]
    fn test_letters_and_digits_pass(letters in "[a-zA-Z]{4,16}", digits in "[0-9]{4,16}") {
        let combined = format!("{}{}", letters, digits);
        prop_assert!(validate_password(&combined).is_ok());
        prop_assert!(validate_password(&letters.repeat(2)).is_err());
        prop_assert!(validate_password(&digits.repeat(2)).is_err());
    }
}
