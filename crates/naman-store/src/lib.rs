//! Client-side state containers for the Naman storefront.
//!
//! This crate provides the state a storefront client keeps between page
//! renders:
//!
//! - **Cart**: line items with per-selling-mode quantity limits, mirrored to
//!   durable storage after every change
//! - **UI**: transient overlay flags (mobile menu, search, filter drawer, modal)
//! - **Select**: subscriptions that re-deliver a projection of a store's state
//!   only when the projection actually changes
//!
//! # Example
//!
//! ```rust
//! use naman_store::prelude::*;
//! use naman_storage::MemoryStorage;
//!
//! let mut cart = CartStore::new(MemoryStorage::new());
//! cart.hydrate();
//!
//! let badge = select(&mut cart, |state: &CartState| state.line_count());
//! assert_eq!(badge.get(), 0);
//!
//! let linen = NewCartItem::new("linen-01", "Washed Linen", SellingMode::Meter, 12.5)
//!     .with_min_order_quantity(0.5);
//! cart.add_item(linen, 2.0);
//!
//! assert_eq!(badge.get(), 1);
//! assert!(cart.is_open());
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ids;
pub mod select;
pub mod ui;

pub use error::ConfigError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::ConfigError;
    pub use crate::ids::*;

    // Cart
    pub use crate::cart::{CartItem, CartState, CartStore, NewCartItem, SellingMode};

    // Config
    pub use crate::config::{
        QuantityLimits, StoreConfig, CART_STORAGE_KEY, MAX_METER_ORDER_QUANTITY,
        MAX_PIECE_ORDER_QUANTITY,
    };

    // UI
    pub use crate::ui::{UiState, UiStore};

    // Select
    pub use crate::select::{select, Observable, Selection, SubscriptionId, Subscribers};
}
