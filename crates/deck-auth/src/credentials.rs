//! Registration input checks.

use crate::error::AuthError;

/// Trim and lower-case an email for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate registration input and return the normalized email.
///
/// # Errors
///
/// Returns `AuthError::Validation` when the email is blank or has no `@`, or
/// the password is shorter than `min_password_len` characters.
pub fn validate_registration(
    email: &str,
    password: &str,
    min_password_len: usize,
) -> Result<String, AuthError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::Validation(
            "email and password are required".into(),
        ));
    }
    if !email.contains('@') {
        return Err(AuthError::Validation(format!("invalid email: {email}")));
    }
    if password.chars().count() < min_password_len {
        return Err(AuthError::Validation(format!(
            "password must be at least {min_password_len} characters"
        )));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = validate_registration("  Dev@Example.COM ", "longenough", 8).unwrap();
        assert_eq!(email, "dev@example.com");
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(validate_registration("", "longenough", 8).is_err());
        assert!(validate_registration("a@b.c", "", 8).is_err());
    }

    #[test]
    fn email_needs_at_sign() {
        let err = validate_registration("not-an-email", "longenough", 8).unwrap_err();
        assert!(err.to_string().contains("invalid email"));
    }

    #[test]
    fn short_password_is_rejected() {
        let err = validate_registration("a@b.c", "short", 8).unwrap_err();
        assert!(err.to_string().contains("at least 8"));
        assert!(validate_registration("a@b.c", "exactly8", 8).is_ok());
    }
}
