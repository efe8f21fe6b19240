// catalog/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request to the catalog store failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Catalog store rejected the request (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Could not decode catalog store payload: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    #[error("Catalog store error: {0}")]
    Store(String),

    #[error("Invalid value for '{field}': {message}")]
    Validation { field: &'static str, message: String },

    #[error("A {operation} request is already in flight")]
    Busy { operation: &'static str },

    #[error("Catalog configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field,
            message: message.into(),
        }
    }

    /// True for every failure that came from talking to the backing store.
    /// These all collapse into the same user-facing failure notice.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Transport { .. }
                | CatalogError::Status { .. }
                | CatalogError::Decode { .. }
                | CatalogError::Store(_)
        )
    }
}

// Opaque failures from custom store implementations.
impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<CatalogError>() {
            Ok(inner) => inner,
            Err(err) => CatalogError::Store(format!("{:#}", err)),
        }
    }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
