//! # Logger
//!
//! Tracing setup for the registration client: a compact console layer, an optional
//! daily-rolling file layer written through a non-blocking worker, and level filtering
//! that still honours `RUST_LOG`.
//!
//! ## Example
//!
//! ```rust
//! # use hustler_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("hustler-desktop")
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("hustler=debug,reqwest=warn")
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt, LoggerResult};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct Settings {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

/// Builder state before a name is chosen. [`LoggerBuilder::init`] is unavailable here.
#[derive(Debug)]
pub struct Unnamed;

/// Builder state carrying the logger name (also the log file prefix).
#[derive(Debug)]
pub struct Named(String);

/// Configures and installs the global tracing subscriber.
#[derive(Debug)]
#[must_use = "The builder does nothing until `init()` is called."]
pub struct LoggerBuilder<N = Unnamed> {
    name: N,
    settings: Settings,
}

impl LoggerBuilder<Unnamed> {
    /// Names the logger; required before [`LoggerBuilder::init`].
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder { name: Named(name.into()), settings: self.settings }
    }
}

impl<N> LoggerBuilder<N> {
    /// Minimum level emitted when neither `RUST_LOG` nor an explicit filter says otherwise.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Programmatic filter directives (e.g. `hustler=debug,hyper=info`).
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.settings.env_filter = Some(filter.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Writes rolling log files into `directory` in addition to (or instead of) the console.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.settings.directory = Some(directory.into());
        self
    }

    /// Emits JSON lines in the log file. Console output stays human-readable.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }
}

impl LoggerBuilder<Named> {
    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive for the lifetime of the program; dropping it stops
    /// the background file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, bad filter
    ///   directives or when no output is enabled.
    /// * [`LoggerError::Appender`] when the log directory cannot be used.
    /// * [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn init(self) -> LoggerResult<Logger> {
        let Self { name: Named(name), settings } = self;
        validate(&name, &settings)?;

        let filter = env_filter(&settings)?;
        let mut layers = Vec::new();

        if settings.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &settings.directory {
            Some(directory) => {
                fs::create_dir_all(directory).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Creating log directory {}", directory.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(settings.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(settings.max_files)
                    .build(directory)
                    .context("Building rolling file appender")?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if settings.json {
                    file_layer.json().boxed()
                } else {
                    file_layer.boxed()
                });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, "Logging initialized");

        Ok(Logger { guard })
    }
}

/// Handle to the installed logging system.
#[must_use = "Dropping this handle stops background log writers."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring the global subscriber.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { name: Unnamed, settings: Settings::default() }
    }

    /// The file writer guard, present only when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

/// Parses a level name (`trace`, `debug`, `info`, `warn`, `error`, `off`).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(raw: &str) -> LoggerResult<LevelFilter> {
    LevelFilter::from_str(raw.trim()).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{raw}': {e}").into(),
        context: None,
    })
}

fn validate(name: &str, settings: &Settings) -> LoggerResult<()> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    if settings.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }
    if !settings.console && settings.directory.is_none() {
        return Err(LoggerError::InvalidConfiguration {
            message: "No logging output enabled. Enable console or file output.".into(),
            context: None,
        });
    }
    Ok(())
}

fn env_filter(settings: &Settings) -> LoggerResult<EnvFilter> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.env_filter {
        None => Ok(builder.from_env_lossy()),
        Some(directives) => builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid env filter '{directives}': {e}").into(),
            context: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builder_defaults() {
        let builder = Logger::builder().name("hustler-test");
        assert!(builder.settings.console);
        assert!(!builder.settings.json);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert_eq!(builder.settings.max_files, DEFAULT_MAX_FILES);
        assert!(builder.settings.directory.is_none());
    }

    #[test]
    fn builder_records_settings_in_any_order() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let builder = Logger::builder()
            .level(LevelFilter::DEBUG)
            .directory(tmp.path())
            .name("hustler-test")
            .json(true)
            .max_files(3)
            .env_filter("hustler=trace");

        assert_eq!(builder.settings.level, LevelFilter::DEBUG);
        assert_eq!(builder.settings.directory.as_deref(), Some(tmp.path()));
        assert!(builder.settings.json);
        assert_eq!(builder.settings.max_files, 3);
        assert_eq!(builder.settings.env_filter.as_deref(), Some("hustler=trace"));
        Ok(())
    }

    #[test]
    fn validation_rejects_unusable_settings() {
        let empty_name = Logger::builder().name("  ").init();
        assert!(matches!(empty_name, Err(LoggerError::InvalidConfiguration { .. })));

        let no_files = Logger::builder().name("x").max_files(0).init();
        assert!(matches!(no_files, Err(LoggerError::InvalidConfiguration { .. })));

        let silent = Logger::builder().name("x").console(false).init();
        assert!(matches!(silent, Err(LoggerError::InvalidConfiguration { .. })));

        let bad_filter = Logger::builder().name("x").env_filter("hustler=loud").init();
        assert!(matches!(bad_filter, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn level_names_parse() {
        assert_eq!(parse_level("debug").ok(), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level(" WARN ").ok(), Some(LevelFilter::WARN));
        assert!(matches!(parse_level("chatty"), Err(LoggerError::InvalidConfiguration { .. })));
    }
}
