// catalog/src/editor.rs

//! The product editor: a form seeded from an existing product (edit mode) or
//! from defaults (create mode), written through to the store on submit.

use crate::clock::{stamp_after, Clock, SystemClock};
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductFields, DEFAULT_CATEGORY};
use crate::prompt::UserPrompt;
use crate::store::ProductStore;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{event, instrument, Level};
use uuid::Uuid;

pub const SAVE_FAILED: &str = "Failed to save product";

/// Raw form contents. Numeric fields hold the text as typed and are only
/// coerced when the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
  pub name: String,
  pub description: String,
  pub category: String,
  pub price: String,
  /// Blank or zero means "no sale".
  pub sale_price: String,
  pub stock: String,
  pub images: Vec<String>,
  pub specifications: BTreeMap<String, String>,
}

impl Default for ProductForm {
  fn default() -> Self {
    Self {
      name: String::new(),
      description: String::new(),
      category: DEFAULT_CATEGORY.to_string(),
      price: "0".to_string(),
      sale_price: "0".to_string(),
      stock: "0".to_string(),
      images: Vec::new(),
      specifications: BTreeMap::new(),
    }
  }
}

impl From<&Product> for ProductForm {
  fn from(product: &Product) -> Self {
    Self {
      name: product.name.clone(),
      description: product.description.clone(),
      category: product.category.clone(),
      price: product.price.to_string(),
      sale_price: product.sale_price.unwrap_or(Decimal::ZERO).to_string(),
      stock: product.stock.to_string(),
      images: product.images.clone(),
      specifications: product.specifications.clone(),
    }
  }
}

impl ProductForm {
  /// Checks required fields and coerces the numeric ones into a write payload.
  pub fn to_fields(&self, updated_at: DateTime<Utc>) -> CatalogResult<ProductFields> {
    let name = required_text("name", &self.name)?;
    let description = required_text("description", &self.description)?;
    let category = required_text("category", &self.category)?;
    let price = parse_amount("price", &self.price)?.ok_or_else(|| CatalogError::validation("price", "is required"))?;
    let sale_price = parse_amount("sale_price", &self.sale_price)?.filter(|sale| !sale.is_zero());
    let stock = parse_stock(&self.stock)?;

    Ok(ProductFields {
      name,
      description,
      price,
      sale_price,
      stock,
      category,
      images: self.images.clone(),
      specifications: self.specifications.clone(),
      updated_at,
    })
  }
}

fn required_text(field: &'static str, value: &str) -> CatalogResult<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(CatalogError::validation(field, "is required"));
  }
  Ok(trimmed.to_string())
}

// Blank input is `None`; callers decide whether that is allowed.
fn parse_amount(field: &'static str, raw: &str) -> CatalogResult<Option<Decimal>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(None);
  }
  let amount = Decimal::from_str(raw).map_err(|_| CatalogError::validation(field, format!("'{}' is not a number", raw)))?;
  if amount.is_sign_negative() && !amount.is_zero() {
    return Err(CatalogError::validation(field, "must not be negative"));
  }
  Ok(Some(amount))
}

fn parse_stock(raw: &str) -> CatalogResult<u32> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(CatalogError::validation("stock", "is required"));
  }
  raw
    .parse::<u32>()
    .map_err(|_| CatalogError::validation("stock", format!("'{}' is not a whole number of zero or more", raw)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
  Create,
  Edit { id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
  Created,
  Updated { id: Uuid },
}

#[derive(Debug)]
struct EditorState {
  form: ProductForm,
  submitting: bool,
  // Last `updated_at` known for the record; new stamps must be later.
  last_updated_at: Option<DateTime<Utc>>,
}

pub struct ProductEditor {
  store: Arc<dyn ProductStore>,
  prompt: Arc<dyn UserPrompt>,
  clock: Arc<dyn Clock>,
  mode: EditorMode,
  state: RwLock<EditorState>,
}

impl ProductEditor {
  /// Create mode, every field at its default.
  pub fn create(store: Arc<dyn ProductStore>, prompt: Arc<dyn UserPrompt>) -> Self {
    Self::with_form(store, prompt, EditorMode::Create, ProductForm::default(), None)
  }

  /// Edit mode, the form seeded from `product`.
  pub fn edit(product: &Product, store: Arc<dyn ProductStore>, prompt: Arc<dyn UserPrompt>) -> Self {
    Self::with_form(
      store,
      prompt,
      EditorMode::Edit { id: product.id },
      ProductForm::from(product),
      Some(product.updated_at),
    )
  }

  /// Opens `product` for editing when given one, otherwise starts a new product.
  pub fn open(product: Option<&Product>, store: Arc<dyn ProductStore>, prompt: Arc<dyn UserPrompt>) -> Self {
    match product {
      Some(product) => Self::edit(product, store, prompt),
      None => Self::create(store, prompt),
    }
  }

  fn with_form(
    store: Arc<dyn ProductStore>,
    prompt: Arc<dyn UserPrompt>,
    mode: EditorMode,
    form: ProductForm,
    last_updated_at: Option<DateTime<Utc>>,
  ) -> Self {
    Self {
      store,
      prompt,
      clock: Arc::new(SystemClock),
      mode,
      state: RwLock::new(EditorState {
        form,
        submitting: false,
        last_updated_at,
      }),
    }
  }

  pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = clock;
    self
  }

  pub fn mode(&self) -> EditorMode {
    self.mode
  }

  pub fn title(&self) -> &'static str {
    match self.mode {
      EditorMode::Create => "Add New Product",
      EditorMode::Edit { .. } => "Edit Product",
    }
  }

  pub fn form(&self) -> ProductForm {
    self.state.read().form.clone()
  }

  /// True while a submit is waiting on the store; the submit action is inert meanwhile.
  pub fn is_submitting(&self) -> bool {
    self.state.read().submitting
  }

  pub fn set_name(&self, value: impl Into<String>) {
    self.state.write().form.name = value.into();
  }

  pub fn set_description(&self, value: impl Into<String>) {
    self.state.write().form.description = value.into();
  }

  pub fn set_category(&self, value: impl Into<String>) {
    self.state.write().form.category = value.into();
  }

  pub fn set_price(&self, value: impl Into<String>) {
    self.state.write().form.price = value.into();
  }

  pub fn set_sale_price(&self, value: impl Into<String>) {
    self.state.write().form.sale_price = value.into();
  }

  pub fn set_stock(&self, value: impl Into<String>) {
    self.state.write().form.stock = value.into();
  }

  /// Appends `url` (trimmed) to the image list. Blank input is ignored.
  /// No URL validation and no deduplication.
  pub fn add_image(&self, url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
      return false;
    }
    self.state.write().form.images.push(url.to_string());
    true
  }

  pub fn remove_image(&self, index: usize) -> Option<String> {
    let mut state = self.state.write();
    if index < state.form.images.len() {
      Some(state.form.images.remove(index))
    } else {
      None
    }
  }

  /// Sets `key` to `value`, both trimmed, overwriting an existing entry.
  /// Ignored when either is blank.
  pub fn add_specification(&self, key: &str, value: &str) -> bool {
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
      return false;
    }
    self
      .state
      .write()
      .form
      .specifications
      .insert(key.to_string(), value.to_string());
    true
  }

  pub fn remove_specification(&self, key: &str) -> Option<String> {
    self.state.write().form.specifications.remove(key)
  }

  /// Validates the form and writes it through to the store.
  ///
  /// Edit mode updates the record by id; create mode inserts a new one. On
  /// any failure the user is notified and the form keeps its contents so the
  /// submit can be retried by hand.
  #[instrument(name = "ProductEditor::submit", skip(self), fields(mode = ?self.mode))]
  pub async fn submit(&self) -> CatalogResult<SubmitOutcome> {
    let (form, last_updated_at) = {
      let mut state = self.state.write();
      if state.submitting {
        event!(Level::WARN, "Submit ignored, a save is already in flight.");
        return Err(CatalogError::Busy { operation: "submit" });
      }
      state.submitting = true;
      (state.form.clone(), state.last_updated_at)
    };
    let _submitting = Submitting(&self.state);

    let updated_at = stamp_after(self.clock.now(), last_updated_at);
    let fields = match form.to_fields(updated_at) {
      Ok(fields) => fields,
      Err(e) => {
        event!(Level::WARN, error = %e, "Product form is incomplete.");
        self.prompt.notify_failure(&e.to_string());
        return Err(e);
      }
    };

    let result = match self.mode {
      EditorMode::Edit { id } => self.store.update(id, &fields).await.map(|()| SubmitOutcome::Updated { id }),
      EditorMode::Create => self.store.insert(&fields).await.map(|()| SubmitOutcome::Created),
    };

    match result {
      Ok(outcome) => {
        self.state.write().last_updated_at = Some(updated_at);
        event!(Level::INFO, ?outcome, "Product saved.");
        Ok(outcome)
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Error saving product.");
        self.prompt.notify_failure(SAVE_FAILED);
        Err(e)
      }
    }
  }
}

/// Clears the in-flight flag when the submit finishes, however it finishes.
struct Submitting<'a>(&'a RwLock<EditorState>);

impl Drop for Submitting<'_> {
  fn drop(&mut self) {
    self.0.write().submitting = false;
  }
}
