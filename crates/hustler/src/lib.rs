//! Facade crate for the SurveyHustler registration client.
//! Re-exports domain/kernel primitives and the registration slice, and wires the ambient
//! stack (config, logging, backend client) in one call.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] once at startup and keep the returned [`Bootstrap`] alive.
//! - Hand [`Bootstrap::backend`] and [`Bootstrap::config`] to the front-end.

mod error;

pub use crate::error::{BootstrapError, BootstrapErrorExt, BootstrapResult};
pub use hustler_domain as domain;
pub use hustler_kernel as kernel;
pub use hustler_logger as logger;
pub use hustler_registration as registration;

use hustler_domain::config::{ClientConfig, LogConfig};
use hustler_logger::{Logger, LoggerBuilder, Named, parse_level};
use hustler_registration::HttpBackend;
use std::path::Path;
use tracing::info;

/// Everything the front-end needs after startup.
#[derive(Debug)]
pub struct Bootstrap {
    pub config: ClientConfig,
    pub backend: HttpBackend,
    /// Keeps the file writer alive; drop it last.
    pub logger: Logger,
}

/// Loads the configuration, installs logging and builds the backend client.
///
/// `config_path` is optional; without it `client.toml` in the working directory is read if
/// present and `HUSTLER__*` environment variables are applied on top.
///
/// # Errors
/// Returns [`BootstrapError`] if any of the three steps fails.
pub fn init(app_name: &str, config_path: Option<&Path>) -> BootstrapResult<Bootstrap> {
    let config: ClientConfig =
        hustler_kernel::config::load_config(config_path).context("Loading client config")?;
    let logger = logger_builder(app_name, &config.log)?.init().context("Installing logger")?;
    let backend = HttpBackend::new(&config.backend).context("Building backend client")?;

    info!(backend = %backend.base_url(), "Registration client ready");
    Ok(Bootstrap { config, backend, logger })
}

/// Translates [`LogConfig`] into a logger builder without installing it.
///
/// # Errors
/// [`BootstrapError::Logger`] for an unknown level name.
pub fn logger_builder(app_name: &str, log: &LogConfig) -> BootstrapResult<LoggerBuilder<Named>> {
    let mut builder = Logger::builder()
        .name(app_name)
        .level(parse_level(&log.level).context("Reading log.level")?)
        .json(log.json);
    if let Some(filter) = log.filter.as_deref().filter(|f| !f.trim().is_empty()) {
        builder = builder.env_filter(filter);
    }
    if let Some(directory) = &log.directory {
        builder = builder.directory(directory);
    }
    Ok(builder)
}
