//! Shared types for the membership registry
//!
//! Domain records, the unified error codes shown to users, and small
//! utilities used by the registry core and any front end that hosts it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::ErrorCode;
pub use models::{AttachmentFlags, Member, MemberCreate, TeachingLevel, Theme};
pub use serde::{Deserialize, Serialize};
