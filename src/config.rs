//! Client configuration.
//!
//! Configuration is via environment variables, with CLI flags taking priority:
//! - `TASKSCOPE_URL` - API base URL (default: `http://127.0.0.1:8000/api`)
//! - `TASKSCOPE_STRATEGY` - Strategy used when none is given (default: `smart_balance`)

use crate::models::Strategy;

/// Default URL of a locally running analysis service.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub default_strategy: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            default_strategy: Strategy::default().as_str().to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("TASKSCOPE_URL")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.base_url),
            default_strategy: lookup("TASKSCOPE_STRATEGY")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.default_strategy),
        }
    }

    /// Apply CLI overrides on top of the environment.
    pub fn with_overrides(mut self, url: Option<String>, strategy: Option<String>) -> Self {
        if let Some(url) = url {
            self.base_url = url;
        }
        if let Some(strategy) = strategy {
            self.default_strategy = strategy;
        }
        self
    }
}
