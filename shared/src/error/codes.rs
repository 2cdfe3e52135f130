//! Error code table
//!
//! Codes are serialized as plain `u16` values so a web or desktop front end can
//! switch on them without sharing Rust types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Registration ====================
    /// Passport photo attached without photo consent
    ConsentRequired = 1001,
    /// Email address is not valid
    InvalidEmail = 1002,
    /// Teaching level is not one of the offered options
    InvalidTeachingLevel = 1003,
    /// Text field exceeds its length limit
    FieldTooLong = 1004,

    // ==================== 2xxx: Attachment ====================
    /// Attachment exceeds the size limit
    AttachmentTooLarge = 2001,

    // ==================== 9xxx: Storage ====================
    /// Persisted data could not be read
    StorageUnreadable = 9401,
    /// Storage quota exhausted
    StorageFull = 9402,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
    /// Persisted data written by a newer version
    StorageVersionUnsupported = 9405,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Please check the highlighted fields",
            ErrorCode::RequiredField => "Please fill in all required fields",
            ErrorCode::ValueOutOfRange => "A value is out of range",

            ErrorCode::ConsentRequired => {
                "Please provide consent for using your passport photograph"
            }
            ErrorCode::InvalidEmail => "Please enter a valid email address",
            ErrorCode::InvalidTeachingLevel => "Please choose a teaching level",
            ErrorCode::FieldTooLong => "A field is too long",

            ErrorCode::AttachmentTooLarge => "File size must be less than 5MB",

            ErrorCode::StorageUnreadable => {
                "Saved registrations could not be read and were not loaded"
            }
            ErrorCode::StorageFull => "Storage is full, registration was not saved",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
            ErrorCode::SystemBusy => "System busy, please retry later",
            ErrorCode::StorageVersionUnsupported => {
                "Saved registrations come from a newer version of this page"
            }
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            1001 => Ok(ErrorCode::ConsentRequired),
            1002 => Ok(ErrorCode::InvalidEmail),
            1003 => Ok(ErrorCode::InvalidTeachingLevel),
            1004 => Ok(ErrorCode::FieldTooLong),

            2001 => Ok(ErrorCode::AttachmentTooLarge),

            9401 => Ok(ErrorCode::StorageUnreadable),
            9402 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),
            9405 => Ok(ErrorCode::StorageVersionUnsupported),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ConsentRequired.code(), 1001);
        assert_eq!(ErrorCode::AttachmentTooLarge.code(), 2001);
        assert_eq!(ErrorCode::StorageFull.code(), 9402);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::StorageFull).unwrap();
        assert_eq!(json, "9402");
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("4001");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::RequiredField,
            ErrorCode::ConsentRequired,
            ErrorCode::InvalidEmail,
            ErrorCode::AttachmentTooLarge,
            ErrorCode::StorageUnreadable,
            ErrorCode::StorageVersionUnsupported,
        ];
        for code in codes {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value).unwrap(), code);
        }
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::ConsentRequired.is_success());
    }
}
