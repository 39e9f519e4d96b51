//! Session configuration.

use std::fmt;

use zinc_eval::EvalConfig;

/// Environment variable bounding identifier-chain depth.
pub const MAX_DEPTH_VAR: &str = "ZINC_MAX_EVAL_DEPTH";
/// Environment variable holding a tracing filter, e.g. `zinc_eval=debug`.
pub const LOG_VAR: &str = "ZINC_LOG";

/// Settings for one [`Session`](crate::Session).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub eval: EvalConfig,
    /// Tracing filter directives; `None` defers to `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl SessionConfig {
    /// Read `ZINC_MAX_EVAL_DEPTH` and `ZINC_LOG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    ///
    /// `ZINC_MAX_EVAL_DEPTH` is a positive integer or `unlimited`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = SessionConfig::default();
        if let Some(raw) = lookup(MAX_DEPTH_VAR) {
            config.eval.max_depth = parse_depth(raw.trim())?;
        }
        config.log_filter = lookup(LOG_VAR).filter(|f| !f.trim().is_empty());
        Ok(config)
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.eval.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }
}

fn parse_depth(raw: &str) -> Result<Option<usize>, ConfigError> {
    if raw.eq_ignore_ascii_case("unlimited") {
        return Ok(None);
    }
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidValue {
            key: MAX_DEPTH_VAR,
            value: raw.to_string(),
            expected: "a positive integer or `unlimited`",
        }),
        Ok(depth) => Ok(Some(depth)),
    }
}

/// Malformed configuration value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid {key} `{value}`: expected {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {}
