/**
 * Credential Validation
 *
 * Format checks applied at signup and password reset. Failures are
 * validation errors, which the HTTP boundary reports as 400.
 */

use crate::shared::SharedError;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check an email address and return its normalized form
///
/// Accepts exactly one `@` with a non-empty local part and a dotted domain
/// whose labels are non-empty. Whitespace anywhere is rejected. The result
/// is trimmed and lower-cased.
pub fn validate_email(email: &str) -> Result<String, SharedError> {
    let email = email.trim().to_lowercase();
    let invalid = || SharedError::validation("email", "Invalid email format");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(email)
}

/// Check the password policy: long enough, with a letter and a digit
pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(SharedError::validation(
            "password",
            "Password must contain at least one letter and one digit",
        ));
    }
    Ok(())
}
