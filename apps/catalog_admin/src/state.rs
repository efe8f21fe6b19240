// apps/catalog_admin/src/state.rs
use crate::config::AppConfig;
use crate::demo;
use crate::errors::Result;

use catalog::{CatalogBrowser, MemoryStore, ProductStore, RestStore, RestStoreConfig, UserPrompt};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ProductStore>,
  pub prompt: Arc<dyn UserPrompt>,
  pub browser: Arc<CatalogBrowser>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn build(config: AppConfig, prompt: Arc<dyn UserPrompt>) -> Result<Self> {
    let store: Arc<dyn ProductStore> = match (&config.api_url, &config.api_key) {
      (Some(url), Some(key)) => {
        let rest = RestStore::new(
          RestStoreConfig::new(url.clone(), key.clone())
            .with_table(config.table.clone())
            .with_timeout(config.request_timeout),
        )?;
        tracing::info!(table_url = %rest.table_url(), "Using remote catalog store.");
        Arc::new(rest)
      }
      _ => {
        let memory = MemoryStore::new();
        if config.seed_demo {
          let seeded = memory.seed(demo::products());
          tracing::info!(count = seeded.len(), "Seeded in-memory store with demo products.");
        }
        tracing::warn!("CATALOG_API_URL not set; changes are kept in memory only.");
        Arc::new(memory)
      }
    };

    let browser = Arc::new(CatalogBrowser::new(store.clone(), prompt.clone()));
    Ok(Self {
      store,
      prompt,
      browser,
      config: Arc::new(config),
    })
  }
}
