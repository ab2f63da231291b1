//! Handler settings loaded from TOML files and the environment.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{DispatchError, DispatchResult};
use crate::handler::MatchPolicy;

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "ERROR_DISPATCH";

fn default_true() -> bool {
    true
}

/// Settings applied to a builder with
/// [`ErrorHandlerBuilder::with_config`](crate::ErrorHandlerBuilder::with_config).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DispatchConfig {
    /// How rules are evaluated once one has matched.
    #[serde(default)]
    pub match_policy: MatchPolicy,
    /// Whether handlers emit per-call debug events.
    #[serde(default = "default_true")]
    pub log_dispatch: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::All,
            log_dispatch: true,
        }
    }
}

impl DispatchConfig {
    /// Load settings from a TOML file, with environment overrides.
    ///
    /// Environment variables use the form `ERROR_DISPATCH__<KEY>`, e.g.
    /// `ERROR_DISPATCH__MATCH_POLICY=first`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not UTF-8, the file does not exist,
    /// or its contents do not deserialize.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use error_dispatch::DispatchConfig;
    ///
    /// let config = DispatchConfig::load("dispatch.toml")?;
    /// # Ok::<(), error_dispatch::DispatchError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> DispatchResult<Self> {
        let path = path.as_ref();

        let path_str = path
            .to_str()
            .ok_or_else(|| DispatchError::InvalidConfigPath(format!("{:?}", path)))?;

        if !path.exists() {
            return Err(DispatchError::ConfigNotFound(path_str.to_string()));
        }

        let config = Config::builder()
            .add_source(File::new(path_str, FileFormat::Toml))
            .add_source(Self::environment())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse settings from TOML text. Environment overrides are not applied.
    pub fn from_toml_str(toml: &str) -> DispatchResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }
}
