//! Propagation configuration

use serde::{Deserialize, Serialize};

/// Limits on one propagation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Longest follower chain followed from the changed list
    pub max_depth: usize,

    /// Maximum number of follower evaluations per pass
    pub max_steps: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_steps: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PropagationConfig::default();
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.max_steps, 10_000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: PropagationConfig = serde_yaml::from_str("max_depth: 4").unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_steps, 10_000);
    }
}
