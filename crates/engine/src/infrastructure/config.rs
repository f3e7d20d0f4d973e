//! Engine configuration.
//!
//! Settings come from built-in defaults overridden by `PARLEY_*` environment
//! variables (a `.env` file is loaded first if present):
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PARLEY_LOG_FILTER` | `parley_engine=info` | tracing filter when `RUST_LOG` is unset |
//! | `PARLEY_RULES_PATH` | unset | TOML/JSON file overriding rows of the rules table |

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use parley_domain::NegotiationRules;
use serde::Deserialize;

const DEFAULT_LOG_FILTER: &str = "parley_engine=info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            rules_path: None,
        }
    }
}

impl EngineConfig {
    /// Load from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_environment(Environment::with_prefix("PARLEY"))
    }

    pub(crate) fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// The rules table to use: the configured file, or the reference rules.
    pub fn rules(&self) -> Result<NegotiationRules, ConfigError> {
        match &self.rules_path {
            Some(path) => load_rules(path),
            None => Ok(NegotiationRules::default()),
        }
    }
}

/// Load a rules table from a TOML or JSON file (format picked by extension).
///
/// Rows missing from the file keep their reference values. Deltas larger
/// than `NegotiationRules::MAX_DELTA` are rejected.
pub fn load_rules(path: &Path) -> Result<NegotiationRules, ConfigError> {
    let rules: NegotiationRules = Config::builder()
        .add_source(File::from(path))
        .build()?
        .try_deserialize()?;
    rules.validate().map_err(|e| {
        ConfigError::Message(format!("Invalid rules in {}: {}", path.display(), e))
    })?;
    tracing::info!(path = %path.display(), "Loaded negotiation rules");
    Ok(rules)
}
