use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`HUSTLER__BACKEND__URL` → `backend.url`).
pub const ENV_PREFIX: &str = "HUSTLER";
/// Separator between nesting levels in environment keys.
pub const ENV_SEPARATOR: &str = "__";
/// File consulted when no explicit path is given; any supported extension is accepted.
pub const DEFAULT_CONFIG_FILE: &str = "client";

/// Custom error type for config loading.
#[hustler_derive::hustler_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration tree from a file layered under `HUSTLER__*` environment overrides.
///
/// 1. **Base file**: an explicit `path` must exist. Without one, `client.*` in the working
///    directory is used if present, and defaults apply otherwise.
/// 2. **Environment**: variables prefixed with `HUSTLER__`, nested with `__`
///    (`HUSTLER__BACKEND__TIMEOUT_SECONDS=30` maps to `backend.timeout_seconds`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is malformed or
/// the merged tree does not deserialize into `T`.
///
/// # Example
/// ```rust,no_run
/// use hustler_kernel::config::load_config;
/// use hustler_kernel::domain::config::ClientConfig;
///
/// let cfg: ClientConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    load_config_from(path, None)
}

/// Same as [`load_config`], but reads overrides from `env` instead of the process
/// environment when given.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_from<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<HashMap<String, String>>,
) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    let (file, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    info!(path = %file.display(), required, "Loading client config");

    Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
