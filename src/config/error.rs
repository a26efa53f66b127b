//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Primary age bracket is empty ({min} > {max})")]
    InvalidAgeBracket { min: u32, max: u32 },

    #[error("Secondary age threshold {secondary} is above the primary bracket start {primary_min}")]
    SecondaryAboveBracket { secondary: u32, primary_min: u32 },

    #[error("At least one licence class must trigger the assessment")]
    NoLicenceClasses,

    #[error("Cache-bust marker must be a non-empty query key")]
    InvalidCacheBustMarker,

    #[error("Acknowledgement path must start with '/'")]
    InvalidAcknowledgementPath,

    #[error("Log filter must not be empty")]
    EmptyLogFilter,
}
