//! Unified error codes for the membership registry
//!
//! Every failure the registry reports to a user maps onto an [`ErrorCode`].
//! Front ends localize by code; the English message is for logs and fallbacks.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Registration validation errors
//! - 2xxx: Attachment errors
//! - 9xxx: Storage errors

mod codes;

pub use codes::{ErrorCode, InvalidErrorCode};
