//! Dioxus desktop front-end of the SurveyHustler registration wizard.
//!
//! All state lives in [`hustler::registration::Wizard`]; the components here only render
//! it and forward input.

mod app;
mod cli;
mod components;
mod steps;

pub use app::App;
pub use cli::Cli;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use hustler::domain::config::{ClientConfig, WindowConfig};
use hustler::registration::HttpBackend;

const STYLE: &str = r#"<style>
body { font-family: system-ui, sans-serif; background: #f4f6fb; margin: 0; }
.wizard { max-width: 560px; margin: 32px auto; background: #fff; padding: 24px 32px; border-radius: 12px; box-shadow: 0 2px 12px rgba(0,0,0,.08); }
.field { display: flex; flex-direction: column; margin-bottom: 12px; gap: 4px; }
.field input, .field select { padding: 8px; border: 1px solid #c9cfdb; border-radius: 6px; }
.field select:disabled { background: #eef0f4; }
.notice { margin: 8px 0; font-size: 14px; }
.notice.error { color: #c0392b; }
.notice.info { color: #1e8449; }
.resend { cursor: pointer; color: #2d6cdf; }
.resend.inactive { cursor: default; color: #9aa3b5; pointer-events: none; }
button { padding: 10px 18px; border: 0; border-radius: 6px; background: #2d6cdf; color: #fff; cursor: pointer; }
button:disabled { background: #9aa3b5; }
</style>"#;

/// Shared, read-only handles for every component.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    /// One client for the whole session; it carries the backend's session cookie.
    pub backend: HttpBackend,
    /// Telegram id from the launch arguments.
    pub tg_id: Option<String>,
}

impl AppContext {
    #[must_use]
    pub fn new(config: ClientConfig, backend: HttpBackend, tg_id: Option<String>) -> Self {
        let tg_id = tg_id.map(|id| id.trim().to_owned()).filter(|id| !id.is_empty());
        Self { config, backend, tg_id }
    }
}

#[derive(Debug)]
pub struct DesktopApp {
    title: String,
    width: f64,
    height: f64,
}

impl Default for DesktopApp {
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}

impl DesktopApp {
    #[must_use]
    pub fn from_config(window: &WindowConfig) -> Self {
        Self { title: window.title.clone(), width: window.width, height: window.height }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use = "This function does nothing unless you call `launch()` on it"]
    pub const fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Opens the window and blocks until it is closed.
    pub fn launch(self, context: AppContext, root: fn() -> Element) {
        let window = WindowBuilder::new()
            .with_title(&self.title)
            .with_inner_size(LogicalSize { width: self.width, height: self.height });

        let cfg = Config::default().with_window(window).with_custom_head(format!(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">{STYLE}"#
        ));

        LaunchBuilder::desktop()
            .with_cfg(cfg)
            .with_context_provider(move || Box::new(context.clone()))
            .launch(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_settings_follow_config() {
        let window = WindowConfig { title: "Sign up".into(), width: 640.0, height: 480.0 };
        let app = DesktopApp::from_config(&window).with_size(800.0, 600.0);
        assert_eq!(app.title, "Sign up");
        assert!((app.width - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_tg_id_is_dropped() {
        let config = ClientConfig::default();
        let backend = HttpBackend::new(&config.backend).unwrap();
        assert_eq!(AppContext::new(config.clone(), backend.clone(), Some("  ".into())).tg_id, None);
        assert_eq!(
            AppContext::new(config, backend, Some(" 5550001 ".into())).tg_id.as_deref(),
            Some("5550001")
        );
    }
}
