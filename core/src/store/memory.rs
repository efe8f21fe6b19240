// catalog/src/store/memory.rs

//! In-process `ProductStore`. Backs the offline demo mode of the admin console
//! and the integration tests, where it doubles as a call recorder.

use crate::clock::stamp_after;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductFields};
use crate::store::ProductStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{event, Level};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
  List,
  Insert,
  Update,
  Delete,
}

/// One request as the store received it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCall {
  pub op: StoreOp,
  pub id: Option<Uuid>,
  pub fields: Option<ProductFields>,
}

#[derive(Debug, Default)]
struct Inner {
  // Kept in insertion order; listing sorts.
  rows: Vec<Product>,
  last_created_at: Option<DateTime<Utc>>,
  scheduled_failures: HashMap<StoreOp, String>,
  calls: Vec<StoreCall>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: RwLock<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts rows directly, bypassing call recording. Returns the stored products.
  pub fn seed<I>(&self, rows: I) -> Vec<Product>
  where
    I: IntoIterator<Item = ProductFields>,
  {
    let mut inner = self.inner.write();
    rows
      .into_iter()
      .map(|fields| Self::store_row(&mut inner, fields))
      .collect()
  }

  /// Makes the next request of kind `op` fail with a store error.
  pub fn fail_next(&self, op: StoreOp, message: impl Into<String>) {
    self.inner.write().scheduled_failures.insert(op, message.into());
  }

  /// Current rows, in insertion order.
  pub fn rows(&self) -> Vec<Product> {
    self.inner.read().rows.clone()
  }

  pub fn get(&self, id: Uuid) -> Option<Product> {
    self.inner.read().rows.iter().find(|p| p.id == id).cloned()
  }

  pub fn calls(&self) -> Vec<StoreCall> {
    self.inner.read().calls.clone()
  }

  pub fn call_count(&self, op: StoreOp) -> usize {
    self.inner.read().calls.iter().filter(|c| c.op == op).count()
  }

  fn store_row(inner: &mut Inner, fields: ProductFields) -> Product {
    let created_at = stamp_after(Utc::now(), inner.last_created_at);
    inner.last_created_at = Some(created_at);
    let product = fields.into_product(Uuid::new_v4(), created_at);
    inner.rows.push(product.clone());
    product
  }

  /// Records the call and pops a scheduled failure for `op`, if any.
  fn begin(inner: &mut Inner, call: StoreCall) -> CatalogResult<()> {
    let op = call.op;
    inner.calls.push(call);
    match inner.scheduled_failures.remove(&op) {
      Some(message) => {
        event!(Level::DEBUG, ?op, "Memory store failing request on demand.");
        Err(CatalogError::Store(message))
      }
      None => Ok(()),
    }
  }
}

#[async_trait]
impl ProductStore for MemoryStore {
  async fn list_newest_first(&self) -> CatalogResult<Vec<Product>> {
    let mut inner = self.inner.write();
    Self::begin(
      &mut inner,
      StoreCall {
        op: StoreOp::List,
        id: None,
        fields: None,
      },
    )?;
    let mut rows = inner.rows.clone();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(rows)
  }

  async fn insert(&self, fields: &ProductFields) -> CatalogResult<()> {
    let mut inner = self.inner.write();
    Self::begin(
      &mut inner,
      StoreCall {
        op: StoreOp::Insert,
        id: None,
        fields: Some(fields.clone()),
      },
    )?;
    let product = Self::store_row(&mut inner, fields.clone());
    event!(Level::DEBUG, product_id = %product.id, "Memory store inserted product.");
    Ok(())
  }

  async fn update(&self, id: Uuid, fields: &ProductFields) -> CatalogResult<()> {
    let mut inner = self.inner.write();
    Self::begin(
      &mut inner,
      StoreCall {
        op: StoreOp::Update,
        id: Some(id),
        fields: Some(fields.clone()),
      },
    )?;
    // An unknown id matches no rows, which is still a successful request.
    if let Some(row) = inner.rows.iter_mut().find(|p| p.id == id) {
      let created_at = row.created_at;
      *row = fields.clone().into_product(id, created_at);
    }
    Ok(())
  }

  async fn delete(&self, id: Uuid) -> CatalogResult<()> {
    let mut inner = self.inner.write();
    Self::begin(
      &mut inner,
      StoreCall {
        op: StoreOp::Delete,
        id: Some(id),
        fields: None,
      },
    )?;
    inner.rows.retain(|p| p.id != id);
    Ok(())
  }
}
