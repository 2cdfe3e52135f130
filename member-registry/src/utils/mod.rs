//! Utilities: logging setup and form field validation

pub mod logger;
pub mod validation;
