pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;

pub use catalog::{ApplyOutcome, CatalogStatus, CatalogStore, LoadToken};
pub use domain::cart::{Cart, CartEntry};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, InterfaceError};
