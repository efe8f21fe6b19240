// apps/catalog_admin/src/main.rs

mod config;
mod console;
mod demo;
mod errors;
mod prompt;
mod state;

use crate::config::AppConfig;
use crate::prompt::ConsolePrompt;
use crate::state::AppState;

use anyhow::Context;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so they never interleave with the console on stdout.
  // RUST_LOG overrides the default level; CATALOG_LOG_JSON=1 switches to JSON lines.
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::WARN)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr);
  if std::env::var("CATALOG_LOG_JSON").map(|v| v == "1").unwrap_or(false) {
    builder.json().init();
  } else {
    builder.init();
  }

  tracing::info!("Starting catalog admin console...");

  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  let app_state =
    AppState::build(app_config, Arc::new(ConsolePrompt)).context("Failed to initialise the catalog store")?;

  console::run(&app_state).await.context("Console session failed")?;
  Ok(())
}
