pub mod catalog;
pub mod config;
pub mod error;
pub mod server;
mod utils;

pub use catalog::{CatalogHandle, CatalogSnapshot};
pub use error::PrismError;
