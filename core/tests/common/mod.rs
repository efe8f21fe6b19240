// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use catalog::{CatalogResult, MemoryStore, Product, ProductFields, ProductStore, UserPrompt};
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::Level;
use uuid::Uuid;

// --- Fixtures ---

pub fn fields(name: &str, category: &str) -> ProductFields {
  ProductFields {
    name: name.to_string(),
    description: format!("{} description", name),
    price: Decimal::new(1000, 2),
    sale_price: None,
    stock: 3,
    category: category.to_string(),
    images: Vec::new(),
    specifications: BTreeMap::new(),
    updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
  }
}

/// Seeds three products; the returned vector is in insertion order (oldest first).
pub fn seeded_store() -> (Arc<MemoryStore>, Vec<Product>) {
  let store = Arc::new(MemoryStore::new());
  let rows = store.seed(vec![
    fields("Trail Shoe", "Footwear"),
    fields("Rain Jacket", "Outerwear"),
    fields("Wool Sock", "footwear"),
  ]);
  (store, rows)
}

// --- Prompt that records what the user was asked and told ---

#[derive(Debug)]
pub struct RecordingPrompt {
  answer: bool,
  pub confirmations: Mutex<Vec<String>>,
  pub failures: Mutex<Vec<String>>,
}

impl RecordingPrompt {
  pub fn answering(answer: bool) -> Arc<Self> {
    Arc::new(Self {
      answer,
      confirmations: Mutex::new(Vec::new()),
      failures: Mutex::new(Vec::new()),
    })
  }

  pub fn failures(&self) -> Vec<String> {
    self.failures.lock().clone()
  }

  pub fn confirmations(&self) -> Vec<String> {
    self.confirmations.lock().clone()
  }
}

impl UserPrompt for RecordingPrompt {
  fn confirm(&self, message: &str) -> bool {
    self.confirmations.lock().push(message.to_string());
    self.answer
  }

  fn notify_failure(&self, message: &str) {
    self.failures.lock().push(message.to_string());
  }
}

// --- Fixed clock ---

pub struct FixedClock(pub DateTime<Utc>);

impl catalog::Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

// --- Store that holds every request until released ---

/// Wraps a `MemoryStore`; each request signals `entered` and then waits for `release`.
pub struct GatedStore {
  pub inner: MemoryStore,
  pub entered: Notify,
  pub release: Notify,
}

impl GatedStore {
  pub fn new(inner: MemoryStore) -> Arc<Self> {
    Arc::new(Self {
      inner,
      entered: Notify::new(),
      release: Notify::new(),
    })
  }

  async fn gate(&self) {
    self.entered.notify_one();
    self.release.notified().await;
  }
}

#[async_trait]
impl ProductStore for GatedStore {
  async fn list_newest_first(&self) -> CatalogResult<Vec<Product>> {
    self.gate().await;
    self.inner.list_newest_first().await
  }

  async fn insert(&self, fields: &ProductFields) -> CatalogResult<()> {
    self.gate().await;
    self.inner.insert(fields).await
  }

  async fn update(&self, id: Uuid, fields: &ProductFields) -> CatalogResult<()> {
    self.gate().await;
    self.inner.update(id, fields).await
  }

  async fn delete(&self, id: Uuid) -> CatalogResult<()> {
    self.gate().await;
    self.inner.delete(id).await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
