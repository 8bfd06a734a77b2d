#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use clap::Parser;
use hustler_desktop::{App, AppContext, Cli, DesktopApp};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let hustler::Bootstrap { config, backend, logger: _logger } =
        hustler::init(env!("CARGO_PKG_NAME"), cli.config.as_deref())
            .context("Critical: client bootstrap failed")?;

    let app = DesktopApp::from_config(&config.window);
    app.launch(AppContext::new(config, backend, cli.tg_id), App);

    Ok(())
}
