//! Product catalog module.
//!
//! Contains the product data and stock levels served by the store API.

mod product;
mod stock;

pub use product::Product;
pub use stock::StockLevel;
