//! Tunable thresholds for a quiz run.

use serde::{Deserialize, Serialize};

use quiz_core::{AssessmentPolicy, ProgressionPolicy};

use crate::error::ConfigError;

/// Policies and selection options for the controller.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```toml
/// shuffle = true
///
/// [progression]
/// level_up_streak = 5
/// level_down_misses = 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuizConfig {
    pub progression: ProgressionPolicy,
    pub assessment: AssessmentPolicy,
    /// Shuffle each level's question rotation.
    pub shuffle: bool,
    /// Seed for the shuffle; `None` seeds from the OS.
    pub shuffle_seed: Option<u64>,
}

impl QuizConfig {
    /// Parse a TOML config. Policies are validated while parsing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML, unknown keys, or
    /// thresholds rejected by policy validation.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        tracing::debug!(?config, "quiz config loaded");
        Ok(config)
    }

    #[must_use]
    pub fn with_progression(mut self, progression: ProgressionPolicy) -> Self {
        self.progression = progression;
        self
    }

    #[must_use]
    pub fn with_assessment(mut self, assessment: AssessmentPolicy) -> Self {
        self.assessment = assessment;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool, seed: Option<u64>) -> Self {
        self.shuffle = shuffle;
        self.shuffle_seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = QuizConfig::from_toml_str("").unwrap();
        assert_eq!(config, QuizConfig::default());
        assert!(!config.shuffle);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = QuizConfig::from_toml_str(
            r"
            shuffle = true
            shuffle_seed = 7

            [progression]
            level_up_streak = 5
            ",
        )
        .unwrap();
        assert!(config.shuffle);
        assert_eq!(config.shuffle_seed, Some(7));
        assert_eq!(config.progression.level_up_streak(), 5);
        assert_eq!(
            config.progression.mastery_correct_at_top(),
            ProgressionPolicy::DEFAULT_MASTERY_CORRECT_AT_TOP
        );
        assert_eq!(config.assessment, AssessmentPolicy::default());
    }

    #[test]
    fn invalid_thresholds_fail_to_load() {
        let err = QuizConfig::from_toml_str("[progression]\nlevel_up_streak = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = QuizConfig::from_toml_str("[assessment]\nlevel4_min_correct = 9\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_disables_optional_rules() {
        let config = QuizConfig::from_toml_str(
            "[progression]\nlevel_down_misses = 0\nmax_questions = 0\n",
        )
        .unwrap();
        assert_eq!(config.progression.level_down_misses(), None);
        assert_eq!(config.progression.max_questions(), None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(QuizConfig::from_toml_str("colour = \"red\"").is_err());
    }
}
