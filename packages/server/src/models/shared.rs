use crate::error::AppError;

/// Maximum length of a primary identifier (site, turbine, blade).
pub const MAX_ID_LENGTH: usize = 64;

/// Validate a trimmed primary identifier (1-64 characters). Inner spaces are
/// kept, matching what the batch loader stores.
pub fn validate_identifier(field: &str, value: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > MAX_ID_LENGTH {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{MAX_ID_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a required free-text field (non-empty after trimming).
pub fn validate_required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate an optional free-text field of a PATCH body.
pub fn validate_optional(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) => validate_required(field, v),
        None => Ok(()),
    }
}
