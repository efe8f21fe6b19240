// src/lib.rs

//! Catalog: client-side administration of a product catalog kept in a hosted
//! database service.
//!
//! The crate provides:
//!  - The `Product` record and the `ProductFields` write payload.
//!  - A `ProductStore` trait for the backing store, with a PostgREST client
//!    (`RestStore`) and an in-process implementation (`MemoryStore`).
//!  - `CatalogBrowser`: loads the product list, filters it by name/category
//!    and deletes products after confirmation.
//!  - `ProductEditor`: a create/edit form with image and specification lists
//!    that inserts or updates through the store.

pub mod browser;
pub mod clock;
pub mod editor;
pub mod error;
pub mod model;
pub mod prompt;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::browser::{filter_products, CatalogBrowser, CatalogView, DeleteOutcome};
pub use crate::clock::{Clock, SystemClock};
pub use crate::editor::{EditorMode, ProductEditor, ProductForm, SubmitOutcome};
pub use crate::error::{CatalogError, CatalogResult};
pub use crate::model::{Product, ProductFields, DEFAULT_CATEGORY};
pub use crate::prompt::{AutoPrompt, UserPrompt};
pub use crate::store::{MemoryStore, ProductStore, RestStore, RestStoreConfig, StoreCall, StoreOp};

/*
    Typical flow:
    1. Build a store (`RestStore::new(RestStoreConfig::new(url, key))`) and wrap it in an `Arc`.
    2. Create a `CatalogBrowser` and call `load_all().await`.
    3. Render `browser.view(query)`.
    4. To add or edit, open a `ProductEditor` (`ProductEditor::open(selected, ..)`),
       set fields, then `submit().await`.
    5. On `Ok(_)` close the editor and call `browser.load_all().await` again.
*/
