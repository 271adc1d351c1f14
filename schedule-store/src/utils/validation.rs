//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the shift
//! and staff forms. Failures are validation errors carrying the offending
//! field, so the form can highlight it.

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names and roles: staff name, staff position, shift role
pub const MAX_NAME_LEN: usize = 200;

/// Staff availability notes
pub const MAX_NOTE_LEN: usize = 500;

/// Date strings as typed into the form
pub const MAX_DATE_LEN: usize = 32;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-blank and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    check_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        check_len(v, field, max_len)?;
    }
    Ok(())
}

fn check_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}
