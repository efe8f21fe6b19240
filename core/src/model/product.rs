// catalog/src/model/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Category a freshly created product starts out with.
pub const DEFAULT_CATEGORY: &str = "general";

/// A product row as returned by the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  #[serde(default, with = "rust_decimal::serde::float_option")]
  pub sale_price: Option<Decimal>,
  pub stock: u32,
  pub category: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub images: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub specifications: BTreeMap<String, String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  /// Price shown to shoppers: the sale price when one is set, the regular price otherwise.
  pub fn display_price(&self) -> Decimal {
    match self.active_sale_price() {
      Some(sale) => sale,
      None => self.price,
    }
  }

  /// A zero sale price counts as "no sale".
  pub fn is_on_sale(&self) -> bool {
    self.active_sale_price().is_some()
  }

  pub fn thumbnail(&self) -> Option<&str> {
    self.images.first().map(String::as_str)
  }

  /// The mutable part of this record, e.g. to seed a full-replacement update.
  pub fn fields(&self) -> ProductFields {
    ProductFields {
      name: self.name.clone(),
      description: self.description.clone(),
      price: self.price,
      sale_price: self.sale_price,
      stock: self.stock,
      category: self.category.clone(),
      images: self.images.clone(),
      specifications: self.specifications.clone(),
      updated_at: self.updated_at,
    }
  }

  fn active_sale_price(&self) -> Option<Decimal> {
    self.sale_price.filter(|sale| !sale.is_zero())
  }
}

/// Every client-writable column of a product. Sent as the body of inserts and
/// updates; `id` and `created_at` are owned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
  pub name: String,
  pub description: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  #[serde(with = "rust_decimal::serde::float_option")]
  pub sale_price: Option<Decimal>,
  pub stock: u32,
  pub category: String,
  pub images: Vec<String>,
  pub specifications: BTreeMap<String, String>,
  pub updated_at: DateTime<Utc>,
}

impl ProductFields {
  /// Materializes a stored row. Used by stores that assign ids themselves.
  pub fn into_product(self, id: Uuid, created_at: DateTime<Utc>) -> Product {
    Product {
      id,
      name: self.name,
      description: self.description,
      price: self.price,
      sale_price: self.sale_price,
      stock: self.stock,
      category: self.category,
      images: self.images,
      specifications: self.specifications,
      created_at,
      updated_at: self.updated_at,
    }
  }
}

// The store may hand back `null` for empty json/array columns.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
