// apps/catalog_admin/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Root of the hosted database project. `None` runs against an in-memory store.
  pub api_url: Option<String>,
  pub api_key: Option<String>,
  pub table: String,
  pub request_timeout: Duration,

  // Fill the in-memory store with a few products on startup.
  pub seed_demo: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_vars(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_vars<F>(get_var: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |name: &str| get_var(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let api_url = get("CATALOG_API_URL");
    let api_key = get("CATALOG_API_KEY");
    if api_url.is_some() && api_key.is_none() {
      return Err(AppError::Config(
        "CATALOG_API_KEY must be set when CATALOG_API_URL is".to_string(),
      ));
    }

    let table = get("CATALOG_TABLE").unwrap_or_else(|| "products".to_string());
    let timeout_secs = get("CATALOG_REQUEST_TIMEOUT_SECS")
      .unwrap_or_else(|| "30".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid CATALOG_REQUEST_TIMEOUT_SECS: {}", e)))?;
    let seed_demo = get("CATALOG_SEED_DEMO")
      .unwrap_or_else(|| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid CATALOG_SEED_DEMO value: {}", e)))?;

    tracing::info!(remote = api_url.is_some(), %table, "Application configuration loaded.");

    Ok(Self {
      api_url,
      api_key,
      table,
      request_timeout: Duration::from_secs(timeout_secs),
      seed_demo,
    })
  }
}
