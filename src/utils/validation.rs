//! Input validation helpers
//!
//! Centralized text length constants and a bridge from `validator` derive
//! errors to [`AppError`].

use validator::Validate;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, coupon code, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, review comments
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Address lines
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Run `validator` derive checks on a request DTO.
///
/// The first failing field is reported back as a 400 with the field name,
/// matching the envelope's human-readable message style.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let detail = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {reason}")
            })
            .unwrap_or_else(|| "fields provided are in wrong format".to_string());
        AppError::validation(detail)
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
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("  ", "name", 10).is_err());
        assert!(validate_required_text("abcdefghijk", "name", 10).is_err());
        assert!(validate_required_text("ok", "name", 10).is_ok());
    }
}
