// catalog/src/store/rest.rs

//! `ProductStore` over a hosted PostgREST endpoint (the REST layer Supabase
//! and similar database services expose under `/rest/v1`).

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductFields};
use crate::store::ProductStore;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{event, instrument, Level};
use uuid::Uuid;

const DEFAULT_TABLE: &str = "products";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct RestStoreConfig {
  /// Project root, e.g. `https://abc.supabase.co`. `/rest/v1` is appended.
  pub base_url: String,
  /// Sent both as `apikey` and as the bearer token.
  pub api_key: String,
  pub table: String,
  pub timeout: Duration,
}

impl RestStoreConfig {
  pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      api_key: api_key.into(),
      table: DEFAULT_TABLE.to_string(),
      timeout: DEFAULT_TIMEOUT,
    }
  }

  pub fn with_table(mut self, table: impl Into<String>) -> Self {
    self.table = table.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

// PostgREST error bodies look like {"code": "...", "message": "...", "details": ...}
#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String,
}

#[derive(Debug, Clone)]
pub struct RestStore {
  client: Client,
  table_url: String,
}

impl RestStore {
  pub fn new(config: RestStoreConfig) -> CatalogResult<Self> {
    let base_url = config.base_url.trim().trim_end_matches('/');
    if base_url.is_empty() {
      return Err(CatalogError::Config("store base URL is empty".to_string()));
    }
    if config.table.trim().is_empty() {
      return Err(CatalogError::Config("store table name is empty".to_string()));
    }

    let mut headers = HeaderMap::new();
    let api_key = HeaderValue::from_str(&config.api_key)
      .map_err(|e| CatalogError::Config(format!("API key is not a valid header value: {}", e)))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
      .map_err(|e| CatalogError::Config(format!("API key is not a valid header value: {}", e)))?;
    headers.insert("apikey", api_key);
    headers.insert(AUTHORIZATION, bearer);

    let client = Client::builder()
      .default_headers(headers)
      .timeout(config.timeout)
      .build()?;

    Ok(Self {
      client,
      table_url: format!("{}/rest/v1/{}", base_url, config.table.trim()),
    })
  }

  pub fn table_url(&self) -> &str {
    &self.table_url
  }

  fn by_id(&self, builder: RequestBuilder, id: Uuid) -> RequestBuilder {
    builder.query(&[("id", format!("eq.{}", id))])
  }

  async fn send(builder: RequestBuilder) -> CatalogResult<Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
      Ok(parsed) => parsed.message,
      Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or("unknown error").to_string(),
      Err(_) => body,
    };
    event!(Level::WARN, status = status.as_u16(), %message, "Catalog store returned an error status.");
    Err(CatalogError::Status {
      status: status.as_u16(),
      message,
    })
  }
}

#[async_trait]
impl ProductStore for RestStore {
  #[instrument(name = "RestStore::list_newest_first", skip(self), err(Display))]
  async fn list_newest_first(&self) -> CatalogResult<Vec<Product>> {
    let request = self
      .client
      .get(&self.table_url)
      .query(&[("select", "*"), ("order", "created_at.desc")]);
    let body = Self::send(request).await?.text().await?;
    let products: Vec<Product> = serde_json::from_str(&body)?;
    event!(Level::DEBUG, count = products.len(), "Fetched products.");
    Ok(products)
  }

  #[instrument(name = "RestStore::insert", skip_all, err(Display))]
  async fn insert(&self, fields: &ProductFields) -> CatalogResult<()> {
    let request = self
      .client
      .post(&self.table_url)
      .header("Prefer", "return=minimal")
      .json(&[fields]);
    Self::send(request).await?;
    Ok(())
  }

  #[instrument(name = "RestStore::update", skip(self, fields), fields(product_id = %id), err(Display))]
  async fn update(&self, id: Uuid, fields: &ProductFields) -> CatalogResult<()> {
    let request = self
      .by_id(self.client.patch(&self.table_url), id)
      .header("Prefer", "return=minimal")
      .json(fields);
    Self::send(request).await?;
    Ok(())
  }

  #[instrument(name = "RestStore::delete", skip(self), fields(product_id = %id), err(Display))]
  async fn delete(&self, id: Uuid) -> CatalogResult<()> {
    let request = self.by_id(self.client.delete(&self.table_url), id);
    Self::send(request).await?;
    Ok(())
  }
}
