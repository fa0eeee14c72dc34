//! Replay configuration.

use crate::error::{CoreResult, ReproError};
use serde::{Deserialize, Serialize};

/// Replay driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Largest accepted input in bytes (0 = unlimited)
    pub max_input_len: u64,
    /// Invocations per input; the file is re-read for each one
    pub runs: u32,
    /// Fail when the bytes read differ from the metadata length
    pub strict_length: bool,
    /// Exit with the target's non-zero status
    pub propagate_status: bool,
    /// Pass the extra command-line arguments to the init hook
    pub forward_init_args: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_input_len: 0,
            runs: 1,
            strict_length: false,
            propagate_status: false,
            forward_init_args: false,
        }
    }
}

impl ReplayConfig {
    /// Parse a JSON document; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or the result is invalid
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field consistency
    ///
    /// # Errors
    ///
    /// Returns error if `runs` is zero
    pub fn validate(&self) -> CoreResult<()> {
        if self.runs == 0 {
            return Err(ReproError::Config {
                field: "runs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The length limit, if any
    #[must_use]
    pub fn length_limit(&self) -> Option<u64> {
        (self.max_input_len > 0).then_some(self.max_input_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_shot() {
        let config = ReplayConfig::default();
        assert_eq!(config.runs, 1);
        assert_eq!(config.length_limit(), None);
        assert!(!config.forward_init_args);
        assert!(!config.propagate_status);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ReplayConfig::from_json(r#"{"max_input_len": 1024}"#).unwrap();
        assert_eq!(config.length_limit(), Some(1024));
        assert_eq!(config.runs, 1);
    }

    #[test]
    fn test_from_json_rejects_zero_runs() {
        let err = ReplayConfig::from_json(r#"{"runs": 0}"#).unwrap_err();
        assert!(matches!(err, ReproError::Config { ref field, .. } if field == "runs"));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        assert!(ReplayConfig::from_json(r#"{"timeout": 5}"#).is_err());
    }
}
