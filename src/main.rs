mod api;
mod config;
mod style;
mod types;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use crate::api::HttpCategoryApi;
use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "category-manager", version, about = "Create, edit and delete categories of a remote REST API")]
struct Args {
    /// TOML configuration file (defaults to the per-user config dir when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the category service, e.g. https://api.escuelajs.co/api/v1
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // env_logger writes to stderr; RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    config.apply_cli(args.api_url);
    log::info!("Using category service at {}", config.api_base_url);

    let api = HttpCategoryApi::new(&config.api_base_url, config.request_timeout())?;
    let api_base_url = config.api_base_url.clone();
    let notification_ttl = config.notification_ttl();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Category Manager",
        native_options,
        Box::new(move |cc| {
            // http:// and https:// thumbnails in the list
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ui::CategoryApp::new(
                Arc::new(api),
                api_base_url,
                notification_ttl,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("Run Category Manager window")
}
