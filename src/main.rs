// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

use readiness::{api::create_router, config::AppConfig, state::create_app_state};

#[derive(Parser)]
#[command(name = "readiness")]
#[command(about = "AI pilot readiness assessment service")]
struct Args {
    /// Listen host (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Serve canned responses instead of calling the model
    #[arg(long, env = "SCRIPTED_MODE")]
    scripted: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config.scripted = args.scripted;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &config.env_file {
        Some(path) => debug!("Loaded {}", path.display()),
        None => debug!(".env file not found, using environment variables and defaults"),
    }
    for warning in config.fallback_warnings() {
        warn!("{}", warning);
    }

    info!("Starting readiness assessment service");
    info!(
        "Mode: {}",
        if config.live_mode() { "live model" } else { "scripted" }
    );
    info!("CORS origins: {}", config.cors_origins().join(", "));

    let bind_address = config.bind_address();
    let state = create_app_state(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
