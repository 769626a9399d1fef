mod app;
mod config;
mod connectivity;
mod db;
mod event;
mod joke;
mod query;
mod screen;
mod selector;
mod store;
mod ui;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jokebox")]
#[command(about = "A terminal joke viewer with an offline rotation of saved jokes")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/jokebox/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Start in offline mode
  #[arg(long)]
  offline: bool,

  /// Path to the joke database
  #[arg(short, long)]
  database: Option<PathBuf>,
}

/// Log to a file in the data directory; the terminal belongs to the UI.
fn init_logging() -> Result<WorkerGuard> {
  let dir = config::data_dir()?;
  std::fs::create_dir_all(&dir).map_err(|e| eyre!("Failed to create log directory: {}", e))?;

  let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
    &dir,
    "jokebox.log",
  ));

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jokebox=info")),
    )
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _guard = init_logging()?;

  // Load configuration
  let mut config = config::Config::load(args.config.as_deref())?;

  // Command line overrides
  if args.offline {
    config.start_online = false;
  }
  if let Some(database) = args.database {
    config.database = Some(database);
  }

  tracing::info!(api_url = %config.api_url, online = config.start_online, "starting");

  // Initialize and run the app
  let app = app::App::new(config).await?;
  app.run().await?;

  Ok(())
}
