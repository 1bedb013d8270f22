pub mod client;
pub mod error;
pub mod types;

pub use client::{TmdbClient, TmdbSettings};
pub use error::CatalogError;
