// catalog/src/model/mod.rs

//! Data structures exchanged with the catalog store.

pub mod product;

pub use product::{Product, ProductFields, DEFAULT_CATEGORY};
