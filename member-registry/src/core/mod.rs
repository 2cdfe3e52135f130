//! Core: configuration

pub mod config;

pub use config::RegistryConfig;
