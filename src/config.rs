//! Checker configuration.
//!
//! Configuration is an immutable value constructed once (from CLI flags or
//! test setup) and handed to the runner; nothing here is global.

use thiserror::Error;

/// Immutable configuration for a check run.
///
/// Both lists are comma-separated glob patterns matched against
/// package-qualified type names (e.g. "example.com/demo/config.Config").
/// Glob syntax follows Go's `path.Match`: `*` and `?` never cross a `/`,
/// `[...]` character classes are supported, there is no recursive `**`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Include patterns; empty means every type is in scope.
    pub include: String,
    /// Exclude patterns; a match here always wins over include.
    pub exclude: String,
}

impl Config {
    /// Build a config from raw include/exclude pattern lists.
    pub fn new(include: impl Into<String>, exclude: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            exclude: exclude.into(),
        }
    }
}

/// Configuration error, raised before any file is analyzed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A glob in one of the pattern lists failed to compile.
    #[error("invalid {list} pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// Which list the pattern came from ("include" or "exclude").
        list: &'static str,
        /// The offending pattern as written.
        pattern: String,
        /// The underlying glob syntax error.
        source: globset::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new("*.Config", "vendor.*");
        assert_eq!(config.include, "*.Config");
        assert_eq!(config.exclude, "vendor.*");

        let empty = Config::default();
        assert!(empty.include.is_empty());
        assert!(empty.exclude.is_empty());
    }
}
