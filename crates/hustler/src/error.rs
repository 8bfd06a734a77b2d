use std::borrow::Cow;

/// Startup failures, one variant per bootstrapped subsystem.
#[hustler_derive::hustler_error]
pub enum BootstrapError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config {
        source: hustler_kernel::config::ConfigError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Logger error{}: {source}", format_context(.context))]
    Logger { source: hustler_logger::LoggerError, context: Option<Cow<'static, str>> },

    #[error("Backend client error{}: {source}", format_context(.context))]
    Backend { source: hustler_registration::ApiError, context: Option<Cow<'static, str>> },
}
