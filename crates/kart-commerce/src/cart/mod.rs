//! Shopping cart module.
//!
//! Contains the cart sequence, the store that owns it, and the
//! notification messages it reports failures with.

mod cart;
mod notify;
mod store;

pub use cart::{Cart, CartLine};
pub use notify::{Messages, RecordingSink, TracingSink};
pub use store::{CartStore, CartStoreBuilder, UpdateProductAmount};
