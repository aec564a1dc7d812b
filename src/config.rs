//! Engine configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```
//! use gomoku::Config;
//!
//! let config = Config::from_toml_str("points_limit = 12\nenable_cache = false").unwrap();
//! assert_eq!(config.points_limit, 12);
//! assert!(!config.enable_cache);
//! assert_eq!(config.inline_count, 4);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for candidate generation, caching and the top-level driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Turns every memo cache and transposition cache on or off
    pub enable_cache: bool,
    /// Capacity of each FIFO cache
    pub cache_capacity: usize,
    /// Maximum candidates kept in the quiet (non-forcing) tier
    pub points_limit: usize,
    /// Only consider points on a line with the last `inline_count` moves
    pub only_in_line: bool,
    /// Number of recent moves used by the in-line policy
    pub inline_count: usize,
    /// Cells two points may be apart and still count as "in line"
    pub in_line_distance: usize,
    /// Past ply 2, keep twos and blocked threes only near the recent moves.
    /// Turn off for exhaustive candidate lists.
    pub narrow_deep_quiet: bool,
    /// Run the forced-win checks around the general search
    pub enable_vct: bool,
    /// Extra plies given to the threes-and-fours search in `minmax`
    pub vct_extra_depth: usize,
    /// Alpha-beta cutoffs; off gives plain exhaustive negamax
    pub alpha_beta: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_cache: true,
            cache_capacity: 1_000_000,
            points_limit: 20,
            only_in_line: false,
            inline_count: 4,
            in_line_distance: 5,
            narrow_deep_quiet: true,
            enable_vct: true,
            vct_extra_depth: 8,
            alpha_beta: true,
        }
    }
}

impl Config {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.points_limit == 0 {
            return Err(ConfigError::Invalid("points_limit must be at least 1".into()));
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid("cache_capacity must be at least 1".into()));
        }
        if self.in_line_distance == 0 {
            return Err(ConfigError::Invalid("in_line_distance must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.enable_cache);
        assert_eq!(config.points_limit, 20);
        assert!(!config.only_in_line);
        assert_eq!(config.in_line_distance, 5);
        assert!(config.narrow_deep_quiet);
        assert_eq!(config.vct_extra_depth, 8);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_zero_limit() {
        let err = Config::from_toml_str("points_limit = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = Config::from_toml_str("points_limit = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
