//! Shopping cart module.
//!
//! Contains the cart line type, the aggregate state, and the store that
//! enforces quantity limits and mirrors the items to durable storage.

mod item;
mod store;

pub use item::{CartItem, NewCartItem, SellingMode};
pub use store::{CartState, CartStore};
