//! Account field rules applied before anything reaches the remote store.

use crate::error::CoreError;

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: usize = 64;

/// Minimum password length enforced on registration and password change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Usernames are restricted to ASCII alphanumerics plus `_`, `-` and `.`.
///
/// The restriction keeps usernames safe to embed in REST filter expressions.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation("Username must not be empty".into()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(CoreError::Validation(format!(
            "Username contains invalid character '{bad}'"
        )));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// A deliberately loose shape check: one `@` with text on both sides, no whitespace.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}
