// catalog/src/store/mod.rs

//! The data access seam between the catalog components and the backing store.
//!
//! A store is a thin wrapper over whatever actually persists products. Every
//! call is a single request with a single outcome; stores do not retry.

pub mod memory;
pub mod rest;

pub use memory::{MemoryStore, StoreCall, StoreOp};
pub use rest::{RestStore, RestStoreConfig};

use crate::error::CatalogResult;
use crate::model::{Product, ProductFields};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ProductStore: Send + Sync {
  /// `select * from products order by created_at desc`
  async fn list_newest_first(&self) -> CatalogResult<Vec<Product>>;

  /// `insert into products (..) values (..)`. The store assigns `id` and `created_at`.
  async fn insert(&self, fields: &ProductFields) -> CatalogResult<()>;

  /// `update products set .. where id = :id`. Full replacement of the mutable fields.
  async fn update(&self, id: Uuid, fields: &ProductFields) -> CatalogResult<()>;

  /// `delete from products where id = :id`
  async fn delete(&self, id: Uuid) -> CatalogResult<()>;
}
