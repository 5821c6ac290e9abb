//! File-based limit configuration for Floodgate.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::{FloodgateError, Result};
use crate::throttle::RateLimit;

/// A set of rate limits described in configuration.
///
/// Limits are listed in enforcement order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Rate limits to enforce, in evaluation order
    #[serde(default)]
    pub limits: Vec<LimitSpec>,
}

/// Configuration for a single rate limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitSpec {
    /// Maximum requests allowed in the time window
    pub max_requests: u64,
    /// Time window in milliseconds
    pub window_ms: u64,
}

impl ThrottleConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading rate limit configuration");

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| FloodgateError::Config(format!("Failed to parse rate limit config: {}", e)))
    }

    /// Build validated limit descriptors from the configured specs.
    ///
    /// Every call builds fresh descriptors; by limit-identity rules the result
    /// never shares history with limits built from an earlier call.
    pub fn build_limits(&self) -> Result<Vec<RateLimit>> {
        self.limits
            .iter()
            .map(|spec| RateLimit::new(spec.max_requests, Duration::from_millis(spec.window_ms)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit_list() {
        let yaml = r#"
limits:
  - max_requests: 2
    window_ms: 1000
  - max_requests: 3
    window_ms: 2000
"#;
        let config = ThrottleConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.limits.len(), 2);

        let limits = config.build_limits().unwrap();
        assert_eq!(limits[0].max_requests(), 2);
        assert_eq!(limits[0].window(), Duration::from_secs(1));
        assert_eq!(limits[1].max_requests(), 3);
        assert_eq!(limits[1].window(), Duration::from_secs(2));
    }

    #[test]
    fn test_empty_document_means_no_limits() {
        let config = ThrottleConfig::from_yaml("limits: []").unwrap();
        assert!(config.build_limits().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_a_config_error() {
        let result = ThrottleConfig::from_yaml("limits: [not a spec");
        assert!(matches!(result, Err(FloodgateError::Config(_))));
    }

    #[test]
    fn test_invalid_spec_rejected_at_build() {
        let yaml = r#"
limits:
  - max_requests: 0
    window_ms: 1000
"#;
        let config = ThrottleConfig::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.build_limits(),
            Err(FloodgateError::InvalidLimit(_))
        ));
    }
}
