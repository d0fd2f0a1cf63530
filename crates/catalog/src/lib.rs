pub mod client;
pub mod errors;
pub mod loader;
pub mod wire;

pub use client::{CatalogSource, HttpCatalogSource};
pub use errors::CatalogError;
pub use loader::{CatalogLoader, LoadReport};
pub use wire::{decode_products, ProductRecord};
