use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the registration client reads from `client.toml` and `HUSTLER__*` variables.
///
/// The OTP, cooldown and password rules are fixed in [`crate::constants`] and not configurable.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfigInner {
    pub backend: BackendConfig,
    pub log: LogConfig,
    pub window: WindowConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into UI contexts.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(flatten, default)]
    inner: Arc<ClientConfigInner>,
}

impl Deref for ClientConfig {
    type Target = ClientConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ClientConfig {
    fn deref_mut(&mut self) -> &mut ClientConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where the registration backend lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

/// Logging knobs, translated into a `hustler_logger::LoggerBuilder` by the binaries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub filter: Option<String>,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

// --- Default ---

impl Default for BackendConfig {
    fn default() -> Self {
        Self { url: "http://localhost:5000".to_owned(), timeout_seconds: 15 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, json: false }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "SurveyHustler Registration".to_owned(), width: 900.0, height: 760.0 }
    }
}
