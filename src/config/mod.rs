//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `MEDEXAM`
//! prefix using the `config` and `dotenvy` crates. Nested values are
//! separated by double underscores. Every section has defaults, so an empty
//! environment yields a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use medexam_workflow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Cognitive bracket starts at {}", config.cognitive.primary_min_age);
//! ```

mod cognitive;
mod error;
mod logging;
mod navigation;

pub use cognitive::CognitiveConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use logging::LoggingConfig;
pub use navigation::NavigationConfig;

use std::sync::Arc;

use serde::Deserialize;

use crate::application::{CoordinatorSettings, NavigationGuardStore};
use crate::domain::requirement::RequirementPolicy;
use crate::ports::HistoryPlatform;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Cognitive assessment thresholds and licence classes
    #[serde(default)]
    pub cognitive: CognitiveConfig,

    /// Navigation guard and redirect settings
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEDEXAM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Splits `COGNITIVE__LICENCE_CLASSES` on commas
    ///
    /// # Environment Variable Format
    ///
    /// - `MEDEXAM__COGNITIVE__PRIMARY_MIN_AGE=70` -> `cognitive.primary_min_age = 70`
    /// - `MEDEXAM__COGNITIVE__LICENCE_CLASSES=4,4A,5` -> `cognitive.licence_classes`
    /// - `MEDEXAM__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEDEXAM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cognitive.licence_classes"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.cognitive.validate()?;
        self.navigation.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Requirement policy for the cognitive assessment resolver
    pub fn requirement_policy(&self) -> RequirementPolicy {
        self.cognitive.policy()
    }

    /// Settings for new wizard sessions
    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            policy: self.requirement_policy(),
            acknowledgement_path: self.navigation.acknowledgement_path.clone(),
        }
    }

    /// Navigation guard for one tab, using the configured cache-bust marker
    pub fn navigation_guard(&self, platform: Arc<dyn HistoryPlatform>) -> NavigationGuardStore {
        NavigationGuardStore::with_cache_bust_marker(
            platform,
            self.navigation.cache_bust_marker.trim(),
        )
    }
}
