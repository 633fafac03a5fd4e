//! Input validation helpers
//!
//! Centralized text length constants and a bridge from `validator` derive
//! errors to [`AppError`].

use validator::Validate;

use crate::utils::AppError;

// ========== Text length limits ==========

/// Entity names: buyer, employee, product, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: department codes, colors, sizes, phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ========== Validation helpers ==========

/// Run derive-based validation and fold the first failure into an [`AppError`].
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .into_iter()
            .next()
            .and_then(|(field, errs)| {
                errs.first().map(|e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field} is invalid"),
                })
            })
            .unwrap_or_else(|| "Invalid request body".to_string());
        AppError::validation(message)
    })
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Acme", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn rejects_oversized_text() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }
}
