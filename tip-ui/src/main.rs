use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gpui::{App, Application};
use tracing::{error, info};

use tip_ui::{
    app::{AppSettings, Overrides},
    config::AppConfig,
    logging, open_main_window, setup_app,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tip calculator.
///
/// Computes a tip from a bill amount and a percentage and shows it in the
/// currency of the active locale.
#[derive(Debug, Parser)]
#[command(name = "TipTime", version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locale for currency formatting (e.g. `en-US`, `de_DE.UTF-8`).
    /// Defaults to LC_ALL, LC_MONETARY or LANG.
    #[arg(long)]
    locale: Option<String>,

    /// Ad placement identifier for the banner region.
    #[arg(long)]
    placement: Option<String>,

    /// Do not show or request a banner ad.
    #[arg(long, default_value_t = false)]
    no_ads: bool,

    /// Log filter: a level or any `EnvFilter` directive.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress log output on stdout.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            locale: self.locale.clone(),
            placement: self.placement.clone(),
            no_ads: self.no_ads,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            quiet: self.quiet,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    let settings =
        AppSettings::resolve(config, cli.overrides()).context("invalid ad placement")?;

    logging::init_logging(&settings.logging)?;
    info!("starting Tip Time\n{settings}");

    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx: &mut App| {
            setup_app(cx);

            if let Err(error) = open_main_window(settings, cx) {
                error!(?error, "failed to open main window");
                cx.quit();
            }
        });

    logging::disable_file_logging();
    Ok(())
}
