mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod theme;
mod widgets;
mod workspace;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use vlcr_core::bus::Bus;
use vlcr_core::config::Config;
use vlcr_core::gateway::Gateway;
use vlcr_core::platform;

/// Terminal remote control for VLC's HTTP interface
/// (`vlc --extraintf http --http-password <pw>`).
#[derive(Parser, Debug)]
#[command(name = "vlcr", version, about)]
struct Args {
    /// Player host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Player HTTP port (overrides config)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// HTTP interface password (overrides config)
    #[arg(long, env = "VLC_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = platform::log_path();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG wins; HTTP client internals are noisy at debug
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("vlcr log: {}", log_path.display());
    tracing::info!("vlcr starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config unusable, running on defaults: {}", e);
        Config::default()
    });
    if let Some(host) = args.host {
        config.vlc.host = host;
    }
    if let Some(port) = args.port {
        config.vlc.port = port;
    }
    if let Some(password) = args.password {
        config.vlc.password = password;
    }

    // ── Gateway + bus ────────────────────────────────────────────────────────
    let bus = Arc::new(Bus::new());
    let gateway = Gateway::new(&config.vlc, bus)?;
    tracing::info!("player at {}", gateway.base_url());

    // ── Run TUI ──────────────────────────────────────────────────────────────
    app::App::new(&config, gateway).run().await?;

    Ok(())
}
