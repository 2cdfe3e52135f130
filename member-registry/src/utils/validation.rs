//! Input validation helpers
//!
//! Text length limits and field checks for the registration form.

use validator::ValidateEmail;

use crate::error::ValidationError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: full name, school, qualification
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone, state, LGA, ID type/number, TRCN
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Upper bound for years of teaching experience
pub const MAX_YEARS_EXPERIENCE: u32 = 80;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
/// Returns the trimmed value.
pub fn validate_required_text(
    value: Option<&str>,
    field: &'static str,
    max_len: usize,
) -> Result<String, ValidationError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    check_len(value, field, max_len)?;
    Ok(value.to_string())
}

/// Validate that an optional string, if present and non-blank, is within the
/// length limit. Blank becomes `None`.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &'static str,
    max_len: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => {
            check_len(v, field, max_len)?;
            Ok(Some(v.to_string()))
        }
        _ => Ok(None),
    }
}

pub fn validate_email(value: Option<&str>) -> Result<String, ValidationError> {
    let email = validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    if !email.validate_email() {
        return Err(ValidationError::InvalidEmail(email));
    }
    Ok(email)
}

/// Whole number in `0..=max`
pub fn validate_count(
    value: Option<&str>,
    field: &'static str,
    max: u32,
) -> Result<u32, ValidationError> {
    let raw = validate_required_text(value, field, MAX_SHORT_TEXT_LEN)?;
    match raw.parse::<u32>() {
        Ok(n) if n <= max => Ok(n),
        _ => Err(ValidationError::InvalidNumber {
            field,
            value: raw,
            max,
        }),
    }
}

/// HTML checkbox semantics: present with "on" (or a truthy value) means checked
pub fn is_checked(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}

fn check_len(value: &str, field: &'static str, max_len: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::TooLong {
            field,
            len,
            max: max_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(
            validate_required_text(Some("  Ada  "), "fullName", 10).unwrap(),
            "Ada"
        );
        assert!(matches!(
            validate_required_text(Some("   "), "fullName", 10),
            Err(ValidationError::MissingField("fullName"))
        ));
        assert!(matches!(
            validate_required_text(None, "school", 10),
            Err(ValidationError::MissingField("school"))
        ));
        assert!(matches!(
            validate_required_text(Some("abcdefghijk"), "school", 10),
            Err(ValidationError::TooLong { len: 11, .. })
        ));
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(validate_optional_text(Some(""), "trcn", 10).unwrap(), None);
        assert_eq!(validate_optional_text(None, "trcn", 10).unwrap(), None);
        assert_eq!(
            validate_optional_text(Some("T-1"), "trcn", 10).unwrap(),
            Some("T-1".to_string())
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email(Some("ada@example.com")).is_ok());
        assert!(matches!(
            validate_email(Some("not-an-email")),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_count() {
        assert_eq!(validate_count(Some("12"), "yearsExperience", 80).unwrap(), 12);
        assert!(validate_count(Some("-1"), "yearsExperience", 80).is_err());
        assert!(validate_count(Some("81"), "yearsExperience", 80).is_err());
        assert!(validate_count(Some("ten"), "yearsExperience", 80).is_err());
    }

    #[test]
    fn test_checkbox() {
        assert!(is_checked(Some("on")));
        assert!(is_checked(Some("true")));
        assert!(!is_checked(Some("off")));
        assert!(!is_checked(None));
    }
}
