//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! 1. `T::default()`
//! 2. YAML file, if a path is given
//! 3. Environment variables prefixed with `APP__`; `__` separates nesting
//!    levels, so `APP__GATEWAY__USERS_ENDPOINT` sets `gateway.users_endpoint`
//!
//! CLI overrides are applied by the binary on the extracted value.

use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Prefix of environment variables that override configuration.
pub const ENV_PREFIX: &str = "APP__";

/// Load `T` from defaults, an optional YAML file and the environment.
///
/// # Errors
/// Returns an error if `path` does not point at a file, or if any layer
/// holds a value that does not fit `T`.
pub fn load_layered<T>(path: Option<&Path>) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut figment = Figment::new().merge(Serialized::defaults(T::default()));

    if let Some(path) = path {
        if !path.is_file() {
            bail!("config file does not exist: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("invalid configuration")
}

/// Render a configuration value as YAML.
///
/// # Errors
/// Returns an error if `value` cannot be serialized.
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_saphyr::to_string(value).context("failed to render configuration as YAML")
}
