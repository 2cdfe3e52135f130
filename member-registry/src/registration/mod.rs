//! Registration flow: form parsing and the session controller

pub mod controller;
pub mod form;

pub use controller::{REGISTRATION_SUCCESS_MESSAGE, RegistrationController};
pub use form::FormFields;
