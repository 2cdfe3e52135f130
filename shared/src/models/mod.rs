//! Data models
//!
//! Shared between the registry core and whatever renders it.
//! Persisted field names are camelCase to stay readable by older page builds.

pub mod member;
pub mod serde_helpers;
pub mod theme;

// Re-exports
pub use member::*;
pub use theme::*;
