//! The cart state container.

use naman_storage::{JsonStore, Storage};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cart::{CartItem, NewCartItem};
use crate::config::{QuantityLimits, StoreConfig};
use crate::ids::ProductId;
use crate::select::{Listener, Observable, SubscriptionId, Subscribers};

/// Snapshot of the cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Lines in insertion order, unique by product id.
    pub items: Vec<CartItem>,
    /// Whether the cart drawer is showing.
    pub is_open: bool,
    /// Advisory flag for work happening outside the store (checkout, say).
    pub is_loading: bool,
}

impl CartState {
    /// Find the line for a product.
    pub fn find(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart store: the in-memory cart plus its durable mirror.
///
/// No operation returns an error. Out-of-range quantities are clamped,
/// unknown product ids are ignored, and storage failures are logged and
/// otherwise swallowed; the in-memory state stays authoritative for the rest
/// of the session.
///
/// Every operation that changes `items` writes the full item list to storage
/// before returning. Subscribers are notified after every operation.
pub struct CartStore<S> {
    state: CartState,
    limits: QuantityLimits,
    storage_key: String,
    storage: JsonStore<S>,
    subscribers: Subscribers<CartState>,
}

impl<S: Storage> CartStore<S> {
    /// Create an empty cart using the default limits and storage key.
    ///
    /// The cart starts empty; call [`hydrate`](Self::hydrate) to load the
    /// stored items.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    /// Create an empty cart with explicit limits and storage key.
    pub fn with_config(storage: S, config: StoreConfig) -> Self {
        Self {
            state: CartState::default(),
            limits: config.limits,
            storage_key: config.storage_key,
            storage: JsonStore::new(storage),
            subscribers: Subscribers::new(),
        }
    }

    // -- reads --

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.state.find(product_id)
    }

    pub fn limits(&self) -> &QuantityLimits {
        &self.limits
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The durable medium backing this cart.
    pub fn storage(&self) -> &S {
        self.storage.storage()
    }

    // -- operations --

    /// Replace the items with whatever is stored.
    ///
    /// Missing, unreadable or unparseable storage all load as an empty cart.
    /// Safe to call repeatedly; each call re-reads and overwrites, never
    /// merges. Drawer and loading flags are untouched.
    pub fn hydrate(&mut self) {
        let stored = match self.storage.get::<Vec<CartItem>>(&self.storage_key) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "discarding unreadable stored cart");
                Vec::new()
            }
        };

        let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());
        for mut item in stored {
            if items.iter().any(|i| i.product_id == item.product_id) {
                continue;
            }
            let max = self.limits.max_for(item.selling_mode);
            item.quantity = clamp_quantity(item.quantity, item.min_order_quantity, max);
            items.push(item);
        }

        debug!(lines = items.len(), "cart hydrated");
        self.state.items = items;
        self.notify();
    }

    /// Add `quantity` of a product, merging into an existing line.
    ///
    /// An existing line grows up to its mode's ceiling. A new line is
    /// appended, clamped to `[min_order_quantity, ceiling]`. The drawer opens
    /// either way, even when a non-positive quantity leaves the items alone.
    pub fn add_item(&mut self, item: NewCartItem, quantity: f64) {
        self.state.is_open = true;

        if !quantity.is_finite() || quantity <= 0.0 {
            debug!(product_id = %item.product_id, quantity, "ignoring non-positive add");
            self.persist();
            self.notify();
            return;
        }

        let limits = self.limits;
        if let Some(existing) = self
            .state
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            let mode = existing.selling_mode;
            let merged = mode.normalize(existing.quantity + mode.normalize(quantity));
            existing.quantity = merged.min(limits.max_for(mode));
            debug!(product_id = %existing.product_id, quantity = existing.quantity, "cart line merged");
        } else {
            let max = limits.max_for(item.selling_mode);
            let quantity = clamp_quantity(
                item.selling_mode.normalize(quantity),
                item.min_order_quantity,
                max,
            );
            debug!(product_id = %item.product_id, quantity, "cart line added");
            self.state.items.push(item.with_quantity(quantity));
        }

        self.persist();
        self.notify();
    }

    /// Set a line's quantity, clamped to `[min_order_quantity, ceiling]`.
    ///
    /// Unknown product ids and non-finite quantities change nothing.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: f64) {
        if quantity.is_finite() {
            let limits = self.limits;
            if let Some(item) = self.item_mut(product_id) {
                let max = limits.max_for(item.selling_mode);
                item.quantity = clamp_quantity(
                    item.selling_mode.normalize(quantity),
                    item.min_order_quantity,
                    max,
                );
                debug!(%product_id, quantity = item.quantity, "cart line updated");
            }
        } else {
            debug!(%product_id, quantity, "ignoring non-finite quantity");
        }

        self.persist();
        self.notify();
    }

    /// Step a line up by one, stopping at the ceiling.
    pub fn increment_quantity(&mut self, product_id: &ProductId) {
        let limits = self.limits;
        if let Some(item) = self.item_mut(product_id) {
            let max = limits.max_for(item.selling_mode);
            item.quantity = (item.quantity + 1.0).min(max);
            debug!(%product_id, quantity = item.quantity, "cart line incremented");
        }

        self.persist();
        self.notify();
    }

    /// Step a line down by one.
    ///
    /// A step that would go below the line's minimum removes the line
    /// instead of pinning it at the minimum. This differs from
    /// [`update_quantity`](Self::update_quantity), which clamps.
    pub fn decrement_quantity(&mut self, product_id: &ProductId) {
        if let Some(pos) = self
            .state
            .items
            .iter()
            .position(|i| &i.product_id == product_id)
        {
            let item = &mut self.state.items[pos];
            let next = item.quantity - 1.0;
            if next < item.min_order_quantity {
                self.state.items.remove(pos);
                debug!(%product_id, "cart line removed by decrement");
            } else {
                item.quantity = next;
                debug!(%product_id, quantity = next, "cart line decremented");
            }
        }

        self.persist();
        self.notify();
    }

    /// Drop a line.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.state.items.retain(|i| &i.product_id != product_id);
        debug!(%product_id, "cart line removed");

        self.persist();
        self.notify();
    }

    /// Drop every line.
    pub fn clear_cart(&mut self) {
        self.state.items.clear();
        debug!("cart cleared");

        self.persist();
        self.notify();
    }

    pub fn toggle_cart(&mut self) {
        self.state.is_open = !self.state.is_open;
        self.notify();
    }

    pub fn open_cart(&mut self) {
        self.state.is_open = true;
        self.notify();
    }

    pub fn close_cart(&mut self) {
        self.state.is_open = false;
        self.notify();
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.state.is_loading = is_loading;
        self.notify();
    }

    fn item_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.state
            .items
            .iter_mut()
            .find(|i| &i.product_id == product_id)
    }

    /// Best-effort write of the items; failures are logged only.
    fn persist(&self) {
        if let Err(e) = self.storage.set(&self.storage_key, &self.state.items) {
            warn!(key = %self.storage_key, error = %e, "failed to persist cart");
        }
    }

    fn notify(&mut self) {
        self.subscribers.notify(&self.state);
    }
}

impl<S: Storage> Observable for CartStore<S> {
    type State = CartState;

    fn state(&self) -> &CartState {
        &self.state
    }

    fn subscribe(&mut self, listener: Listener<CartState>) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

impl<S> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("limits", &self.limits)
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

/// `min(max, max(min, quantity))`. Unlike `f64::clamp` this never panics when
/// a line's minimum exceeds the ceiling; the ceiling wins.
fn clamp_quantity(quantity: f64, min: f64, max: f64) -> f64 {
    max.min(min.max(quantity))
}
