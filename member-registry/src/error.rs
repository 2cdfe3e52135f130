//! Registry errors
//!
//! | Class | Variants | Effect |
//! |-------|----------|--------|
//! | Validation | oversized attachment, missing consent, bad field | submission aborted, nothing mutated |
//! | Storage | unreadable roster, quota exceeded, redb failure | read: empty roster; write: append rolled back |
//!
//! Nothing here is fatal. Every variant maps to an [`ErrorCode`] and a message
//! suitable for a notification.

use shared::ErrorCode;
use thiserror::Error;

use crate::store::StorageError;

/// Form and attachment validation failures
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Attachment '{name}' is {size} bytes, limit is {limit} bytes")]
    SizeExceeded { name: String, size: u64, limit: u64 },

    #[error("Photo consent is required when a passport photo is attached")]
    ConsentRequired,

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Unknown teaching level: {0}")]
    InvalidTeachingLevel(String),

    #[error("{field} must be a whole number between 0 and {max}, got '{value}'")]
    InvalidNumber {
        field: &'static str,
        value: String,
        max: u32,
    },
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::SizeExceeded { .. } => ErrorCode::AttachmentTooLarge,
            ValidationError::ConsentRequired => ErrorCode::ConsentRequired,
            ValidationError::MissingField(_) => ErrorCode::RequiredField,
            ValidationError::TooLong { .. } => ErrorCode::FieldTooLong,
            ValidationError::InvalidEmail(_) => ErrorCode::InvalidEmail,
            ValidationError::InvalidTeachingLevel(_) => ErrorCode::InvalidTeachingLevel,
            ValidationError::InvalidNumber { .. } => ErrorCode::ValueOutOfRange,
        }
    }

    /// Form control the UI should focus after this error
    pub fn focus_target(&self) -> Option<&'static str> {
        match self {
            ValidationError::ConsentRequired => Some("photoConsent"),
            ValidationError::MissingField(field)
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidNumber { field, .. } => Some(*field),
            ValidationError::InvalidEmail(_) => Some("email"),
            ValidationError::InvalidTeachingLevel(_) => Some("teachingLevel"),
            ValidationError::SizeExceeded { .. } => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ValidationError::SizeExceeded { limit, .. } => {
                format!("File size must be less than {}MB", limit / (1024 * 1024))
            }
            ValidationError::MissingField(_)
            | ValidationError::TooLong { .. }
            | ValidationError::InvalidNumber { .. } => self.to_string(),
            _ => self.code().message().to_string(),
        }
    }
}

/// Registry-level error
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::Validation(e) => e.code(),
            RegistryError::Storage(e) => e.code(),
        }
    }

    pub fn focus_target(&self) -> Option<&'static str> {
        match self {
            RegistryError::Validation(e) => e.focus_target(),
            RegistryError::Storage(_) => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            RegistryError::Validation(e) => e.user_message(),
            RegistryError::Storage(e) => e.code().message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_error_focuses_checkbox() {
        let err = RegistryError::from(ValidationError::ConsentRequired);
        assert_eq!(err.code(), ErrorCode::ConsentRequired);
        assert_eq!(err.focus_target(), Some("photoConsent"));
        assert_eq!(
            err.user_message(),
            "Please provide consent for using your passport photograph"
        );
    }

    #[test]
    fn test_size_message_uses_limit() {
        let err = ValidationError::SizeExceeded {
            name: "scan.pdf".into(),
            size: 6 * 1024 * 1024,
            limit: 5 * 1024 * 1024,
        };
        assert_eq!(err.user_message(), "File size must be less than 5MB");
        assert_eq!(err.focus_target(), None);
    }

    #[test]
    fn test_storage_error_message() {
        let err = RegistryError::from(StorageError::QuotaExceeded {
            required: 2,
            quota: 1,
        });
        assert_eq!(err.code(), ErrorCode::StorageFull);
        assert_eq!(err.user_message(), ErrorCode::StorageFull.message());
    }
}
