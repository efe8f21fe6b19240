// catalog/src/browser.rs

//! The catalog browser: the loaded product list, free-text filtering and
//! deletion.
//!
//! State lives behind a `parking_lot::RwLock`. Lock guards are never held
//! across `.await`; every store call works on values copied out first.

use crate::error::{CatalogError, CatalogResult};
use crate::model::Product;
use crate::prompt::UserPrompt;
use crate::store::ProductStore;

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{event, instrument, Level};
use uuid::Uuid;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";
pub const DELETE_FAILED: &str = "Failed to delete product";

/// What the product list should currently show. Exactly one applies.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView {
  /// The first load has not finished yet.
  Loading,
  /// Nothing loaded and no search query: invite the user to add a product.
  EmptyNoQuery,
  /// The search query matched nothing.
  EmptyWithQuery,
  Populated(Vec<Product>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
  Deleted,
  /// The user declined the confirmation; nothing was sent.
  Cancelled,
}

/// Products whose name or category contains `query`, ignoring case.
/// An empty query keeps everything. Input order is preserved.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
  let needle = query.to_lowercase();
  products
    .iter()
    .filter(|p| needle.is_empty() || matches_query(p, &needle))
    .cloned()
    .collect()
}

fn matches_query(product: &Product, lowered_query: &str) -> bool {
  product.name.to_lowercase().contains(lowered_query) || product.category.to_lowercase().contains(lowered_query)
}

#[derive(Debug)]
struct BrowserState {
  products: Vec<Product>,
  loading: bool,
  pending_deletes: HashSet<Uuid>,
}

pub struct CatalogBrowser {
  store: Arc<dyn ProductStore>,
  prompt: Arc<dyn UserPrompt>,
  state: RwLock<BrowserState>,
}

impl CatalogBrowser {
  pub fn new(store: Arc<dyn ProductStore>, prompt: Arc<dyn UserPrompt>) -> Self {
    Self {
      store,
      prompt,
      state: RwLock::new(BrowserState {
        products: Vec::new(),
        loading: true,
        pending_deletes: HashSet::new(),
      }),
    }
  }

  /// Fetches every product, newest first, replacing the loaded set.
  ///
  /// On failure the previously loaded products are kept and the error is
  /// returned after being logged. Either way the browser leaves the loading state.
  #[instrument(name = "CatalogBrowser::load_all", skip(self))]
  pub async fn load_all(&self) -> CatalogResult<usize> {
    let result = self.store.list_newest_first().await;

    let mut state = self.state.write();
    state.loading = false;
    match result {
      Ok(products) => {
        let count = products.len();
        state.products = products;
        event!(Level::INFO, count, "Loaded products.");
        Ok(count)
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Error loading products.");
        Err(e)
      }
    }
  }

  pub fn filter(&self, query: &str) -> Vec<Product> {
    filter_products(&self.state.read().products, query)
  }

  pub fn view(&self, query: &str) -> CatalogView {
    let state = self.state.read();
    if state.loading {
      return CatalogView::Loading;
    }
    let matches = filter_products(&state.products, query);
    match (matches.is_empty(), query.is_empty()) {
      (true, true) => CatalogView::EmptyNoQuery,
      (true, false) => CatalogView::EmptyWithQuery,
      (false, _) => CatalogView::Populated(matches),
    }
  }

  pub fn is_loading(&self) -> bool {
    self.state.read().loading
  }

  pub fn products(&self) -> Vec<Product> {
    self.state.read().products.clone()
  }

  pub fn find(&self, id: Uuid) -> Option<Product> {
    self.state.read().products.iter().find(|p| p.id == id).cloned()
  }

  /// Deletes a product after the user confirms.
  ///
  /// A successful delete drops the product from the loaded set right away, no
  /// reload needed. A failed one leaves the set untouched and notifies the user.
  /// A second delete of the same id while the first is in flight is rejected.
  #[instrument(name = "CatalogBrowser::delete", skip(self), fields(product_id = %id))]
  pub async fn delete(&self, id: Uuid) -> CatalogResult<DeleteOutcome> {
    if !self.prompt.confirm(DELETE_CONFIRMATION) {
      event!(Level::DEBUG, "Delete cancelled by user.");
      return Ok(DeleteOutcome::Cancelled);
    }

    let _pending = PendingDelete::claim(&self.state, id)?;

    match self.store.delete(id).await {
      Ok(()) => {
        self.state.write().products.retain(|p| p.id != id);
        event!(Level::INFO, "Product deleted.");
        Ok(DeleteOutcome::Deleted)
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Error deleting product.");
        self.prompt.notify_failure(DELETE_FAILED);
        Err(e)
      }
    }
  }
}

/// Marks a product id as having a delete in flight until dropped.
struct PendingDelete<'a> {
  state: &'a RwLock<BrowserState>,
  id: Uuid,
}

impl<'a> PendingDelete<'a> {
  fn claim(state: &'a RwLock<BrowserState>, id: Uuid) -> CatalogResult<Self> {
    if !state.write().pending_deletes.insert(id) {
      event!(Level::WARN, product_id = %id, "Delete already in flight.");
      return Err(CatalogError::Busy { operation: "delete" });
    }
    Ok(Self { state, id })
  }
}

impl Drop for PendingDelete<'_> {
  fn drop(&mut self) {
    self.state.write().pending_deletes.remove(&self.id);
  }
}
