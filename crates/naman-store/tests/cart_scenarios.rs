//! End-to-end cart behavior across hydrate, mutation and selection.

use std::cell::RefCell;
use std::rc::Rc;

use naman_storage::{FileStorage, MemoryStorage, Storage};
use naman_store::prelude::*;

fn buttons() -> NewCartItem {
    NewCartItem::new("A", "Brass Buttons", SellingMode::Piece, 2.5)
        .with_slug("brass-buttons")
        .with_image("/img/brass-buttons.jpg")
}

fn assert_in_bounds(cart: &CartStore<impl Storage>) {
    for item in cart.items() {
        let max = cart.limits().max_for(item.selling_mode);
        assert!(
            item.min_order_quantity <= item.quantity && item.quantity <= max,
            "{} out of bounds: {}",
            item.product_id,
            item.quantity
        );
    }
}

#[test]
fn add_merge_clamp_then_decrement_to_removal() {
    let mut cart = CartStore::new(MemoryStorage::new());

    cart.add_item(buttons(), 3.0);
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].product_id, "A");
    assert_eq!(cart.items()[0].quantity, 3.0);
    assert!(cart.is_open());

    cart.add_item(buttons(), MAX_PIECE_ORDER_QUANTITY);
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, MAX_PIECE_ORDER_QUANTITY);

    let id = ProductId::new("A");
    while cart.find(&id).map(|i| i.quantity) > Some(1.0) {
        cart.decrement_quantity(&id);
        assert_in_bounds(&cart);
    }
    assert_eq!(cart.find(&id).unwrap().quantity, 1.0);

    cart.decrement_quantity(&id);
    assert!(cart.items().is_empty());
}

#[test]
fn update_missing_id_on_empty_cart() {
    let mut cart = CartStore::new(MemoryStorage::new());
    cart.update_quantity(&ProductId::new("missing-id"), 5.0);
    assert!(cart.items().is_empty());
    assert!(!cart.is_open());
}

#[test]
fn mixed_operations_keep_every_line_in_bounds() {
    let config = StoreConfig::default().with_limits(QuantityLimits::new(12.0, 8.0));
    let mut cart = CartStore::with_config(MemoryStorage::new(), config);
    let linen = NewCartItem::new("linen", "Washed Linen", SellingMode::Meter, 14.0)
        .with_min_order_quantity(1.5);

    let quantities = [0.3, 4.0, 19.0, 2.75, 100.0, 1.0, 7.5];
    for (step, q) in quantities.iter().enumerate() {
        cart.add_item(buttons(), *q);
        cart.add_item(linen.clone(), *q);
        cart.update_quantity(&"linen".into(), *q - 3.0);
        if step % 2 == 0 {
            cart.increment_quantity(&"A".into());
        } else {
            cart.update_quantity(&"A".into(), *q * 2.0);
        }
        assert_in_bounds(&cart);
        assert!(cart.items().len() <= 2);
    }
}

#[test]
fn persisted_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let before = {
        let mut cart = CartStore::new(FileStorage::open(dir.path()).unwrap());
        cart.hydrate();
        cart.add_item(buttons(), 4.0);
        cart.add_item(
            NewCartItem::new("velvet", "Crushed Velvet", SellingMode::Meter, 22.0)
                .with_min_order_quantity(0.5),
            2.25,
        );
        cart.decrement_quantity(&"A".into());
        cart.items().to_vec()
    };

    let mut restarted = CartStore::new(FileStorage::open(dir.path()).unwrap());
    restarted.hydrate();
    assert_eq!(restarted.items(), before.as_slice());

    restarted.hydrate();
    assert_eq!(restarted.items(), before.as_slice());
}

#[test]
fn custom_storage_key_is_honored() {
    let storage = MemoryStorage::new();
    let config = StoreConfig::default().with_storage_key("naman:cart:guest");
    let mut cart = CartStore::with_config(storage.clone(), config);
    cart.add_item(buttons(), 1.0);

    assert_eq!(storage.keys().unwrap(), vec!["naman:cart:guest"]);
    assert!(storage.get_item(CART_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn badge_selection_tracks_only_line_count() {
    let mut cart = CartStore::new(MemoryStorage::new());
    cart.add_item(buttons(), 1.0);
    cart.close_cart();

    // Selected before any later emission: the current value is already there.
    let badge = select(&mut cart, |state: &CartState| state.line_count());
    assert_eq!(badge.get(), 1);

    let renders = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&renders);
    badge.on_change(move |_| *counter.borrow_mut() += 1);

    cart.increment_quantity(&"A".into());
    cart.toggle_cart();
    cart.set_loading(true);
    assert_eq!(*renders.borrow(), 0);

    cart.add_item(NewCartItem::new("B", "Snap Fasteners", SellingMode::Piece, 0.8), 10.0);
    assert_eq!(badge.get(), 2);
    assert_eq!(*renders.borrow(), 1);

    cart.clear_cart();
    assert_eq!(badge.get(), 0);
    assert_eq!(*renders.borrow(), 2);
}

#[test]
fn drawer_selection_and_items_selection_are_independent() {
    let mut cart = CartStore::new(MemoryStorage::new());
    let open = select(&mut cart, |state: &CartState| state.is_open);
    let items = select(&mut cart, |state: &CartState| state.items.clone());

    cart.toggle_cart();
    cart.toggle_cart();
    assert_eq!(open.version(), 2);
    assert_eq!(items.version(), 0);

    cart.add_item(buttons(), 2.0);
    assert!(open.get());
    assert_eq!(items.get().len(), 1);
    assert_eq!(items.version(), 1);

    // Re-adding zero changes nothing in the items projection.
    cart.add_item(buttons(), 0.0);
    assert_eq!(items.version(), 1);
}
