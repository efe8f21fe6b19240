// apps/catalog_admin/src/errors.rs

use catalog::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Catalog Error: {0}")]
  Catalog(#[from] CatalogError),

  #[error("Console I/O Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Unknown command: {0}")]
  UnknownCommand(String),

  #[error("{0}")]
  Usage(&'static str),

  #[error("No product matches '{0}'")]
  NoSuchProduct(String),
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
