//! Navigation configuration

use serde::Deserialize;

use crate::application::{DEFAULT_ACKNOWLEDGEMENT_PATH, DEFAULT_CACHE_BUST_MARKER};

use super::error::ConfigValidationError;

/// Guard and redirect settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Query key appended when navigating to the current path
    #[serde(default = "default_cache_bust_marker")]
    pub cache_bust_marker: String,

    /// Path prefix of the acknowledgement view; the submission id is appended
    #[serde(default = "default_acknowledgement_path")]
    pub acknowledgement_path: String,
}

impl NavigationConfig {
    /// Validate navigation configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let marker = self.cache_bust_marker.trim();
        if marker.is_empty() || marker.contains(['=', '&', '?', '#']) {
            return Err(ConfigValidationError::InvalidCacheBustMarker);
        }
        if !self.acknowledgement_path.starts_with('/') {
            return Err(ConfigValidationError::InvalidAcknowledgementPath);
        }
        Ok(())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            cache_bust_marker: default_cache_bust_marker(),
            acknowledgement_path: default_acknowledgement_path(),
        }
    }
}

fn default_cache_bust_marker() -> String {
    DEFAULT_CACHE_BUST_MARKER.to_string()
}

fn default_acknowledgement_path() -> String {
    DEFAULT_ACKNOWLEDGEMENT_PATH.to_string()
}
