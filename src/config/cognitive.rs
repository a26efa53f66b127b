//! Cognitive assessment thresholds

use serde::Deserialize;

use crate::domain::requirement::RequirementPolicy;

use super::error::ConfigValidationError;

/// Age thresholds and licence classes for the cognitive assessment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CognitiveConfig {
    #[serde(default = "default_primary_min_age")]
    pub primary_min_age: u32,

    #[serde(default = "default_primary_max_age")]
    pub primary_max_age: u32,

    #[serde(default = "default_secondary_min_age")]
    pub secondary_min_age: u32,

    /// Licence classes that trigger the assessment inside the primary bracket
    #[serde(default = "default_licence_classes")]
    pub licence_classes: Vec<String>,
}

impl CognitiveConfig {
    /// Builds the resolver policy
    pub fn policy(&self) -> RequirementPolicy {
        RequirementPolicy {
            primary_min_age: self.primary_min_age,
            primary_max_age: self.primary_max_age,
            secondary_min_age: self.secondary_min_age,
            licence_classes: self
                .licence_classes
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Validate cognitive configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.primary_min_age > self.primary_max_age {
            return Err(ConfigValidationError::InvalidAgeBracket {
                min: self.primary_min_age,
                max: self.primary_max_age,
            });
        }
        if self.secondary_min_age > self.primary_min_age {
            return Err(ConfigValidationError::SecondaryAboveBracket {
                secondary: self.secondary_min_age,
                primary_min: self.primary_min_age,
            });
        }
        if self.policy().licence_classes.is_empty() {
            return Err(ConfigValidationError::NoLicenceClasses);
        }
        Ok(())
    }
}

impl Default for CognitiveConfig {
    fn default() -> Self {
        Self {
            primary_min_age: default_primary_min_age(),
            primary_max_age: default_primary_max_age(),
            secondary_min_age: default_secondary_min_age(),
            licence_classes: default_licence_classes(),
        }
    }
}

fn default_primary_min_age() -> u32 {
    RequirementPolicy::default().primary_min_age
}

fn default_primary_max_age() -> u32 {
    RequirementPolicy::default().primary_max_age
}

fn default_secondary_min_age() -> u32 {
    RequirementPolicy::default().secondary_min_age
}

fn default_licence_classes() -> Vec<String> {
    RequirementPolicy::default().licence_classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_defaults() {
        assert_eq!(CognitiveConfig::default().policy(), RequirementPolicy::default());
        assert!(CognitiveConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_bracket() {
        let config = CognitiveConfig {
            primary_min_age: 75,
            primary_max_age: 70,
            secondary_min_age: 65,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidAgeBracket { min: 75, max: 70 })
        );
    }

    #[test]
    fn rejects_secondary_threshold_above_bracket() {
        let config = CognitiveConfig {
            secondary_min_age: 72,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::SecondaryAboveBracket { .. })
        ));
    }

    #[test]
    fn blank_licence_classes_are_dropped() {
        let config = CognitiveConfig {
            licence_classes: vec![" 4 ".into(), "".into()],
            ..Default::default()
        };
        assert_eq!(config.policy().licence_classes, vec!["4".to_string()]);

        let empty = CognitiveConfig {
            licence_classes: vec!["  ".into()],
            ..Default::default()
        };
        assert_eq!(empty.validate(), Err(ConfigValidationError::NoLicenceClasses));
    }

    #[test]
    fn deserializes_partial_section() {
        let json = r#"{ "primary_min_age": 71 }"#;
        let config: CognitiveConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.primary_min_age, 71);
        assert_eq!(config.primary_max_age, 74);
    }
}
