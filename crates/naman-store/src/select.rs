//! Subscriptions and change-filtered selectors over store state.
//!
//! Stores notify every listener after every operation, whether or not the
//! operation changed anything a given view cares about. A [`Selection`]
//! narrows that stream down to one projected value and only re-delivers it
//! when the projection differs by value from the previous one.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handle returned by [`Subscribers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// A state listener. Returning `false` unsubscribes it.
pub type Listener<S> = Box<dyn FnMut(&S) -> bool>;

/// Listener registry owned by a store.
pub struct Subscribers<S> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
}

impl<S> Subscribers<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: Listener<S>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() < before
    }

    /// Deliver `state` to every listener in registration order.
    pub fn notify(&mut self, state: &S) {
        self.listeners.retain_mut(|(_, listener)| listener(state));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<S> Default for Subscribers<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Subscribers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A store whose state can be read and observed.
pub trait Observable {
    /// The store's state snapshot.
    type State;

    /// Current state.
    fn state(&self) -> &Self::State;

    /// Register a listener called with the new state after every operation.
    fn subscribe(&mut self, listener: Listener<Self::State>) -> SubscriptionId;

    /// Remove a listener.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

type ChangeCallback<T> = Box<dyn FnMut(&T)>;

struct Slot<T> {
    value: T,
    version: u64,
    on_change: Option<ChangeCallback<T>>,
}

/// A projected value kept in sync with a store.
///
/// Created by [`select`]. Cloning yields another handle onto the same value.
pub struct Selection<T> {
    slot: Rc<RefCell<Slot<T>>>,
    subscription: SubscriptionId,
}

impl<T: Clone> Selection<T> {
    /// Current projected value.
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Number of times the projected value has changed since selection.
    pub fn version(&self) -> u64 {
        self.slot.borrow().version
    }

    /// Call `callback` with the new value each time it changes.
    ///
    /// Replaces any previously registered callback.
    pub fn on_change(&self, callback: impl FnMut(&T) + 'static) {
        self.slot.borrow_mut().on_change = Some(Box::new(callback));
    }

    /// Stop tracking the store. The last value stays readable.
    pub fn detach<O: Observable + ?Sized>(&self, store: &mut O) -> bool {
        store.unsubscribe(self.subscription)
    }
}

impl<T> Clone for Selection<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
            subscription: self.subscription,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Selection")
            .field("value", &slot.value)
            .field("version", &slot.version)
            .finish()
    }
}

/// Project a store's state through `selector` and track the result.
///
/// The current state is read immediately, so the selection holds a real value
/// even if the store never emits. Afterwards the value is only replaced (and
/// the change callback only fires) when the new projection is not equal to
/// the previous one.
///
/// Once every handle to the selection is dropped, its listener unsubscribes
/// itself on the next notification.
pub fn select<O, T, F>(store: &mut O, selector: F) -> Selection<T>
where
    O: Observable + ?Sized,
    O::State: 'static,
    T: Clone + PartialEq + 'static,
    F: Fn(&O::State) -> T + 'static,
{
    let slot = Rc::new(RefCell::new(Slot {
        value: selector(store.state()),
        version: 0,
        on_change: None,
    }));

    let weak: Weak<RefCell<Slot<T>>> = Rc::downgrade(&slot);
    let subscription = store.subscribe(Box::new(move |state: &O::State| {
        let Some(slot) = weak.upgrade() else {
            return false;
        };

        let next = selector(state);
        let callback = {
            let mut slot = slot.borrow_mut();
            if slot.value == next {
                return true;
            }
            slot.value = next.clone();
            slot.version += 1;
            slot.on_change.take()
        };

        // No borrow of the slot is held while the callback runs, so it may
        // read the selection or register a new callback.
        if let Some(mut callback) = callback {
            callback(&next);
            let mut slot = slot.borrow_mut();
            // Keep a callback registered from inside the one that just ran.
            if slot.on_change.is_none() {
                slot.on_change = Some(callback);
            }
        }
        true
    }));

    Selection { slot, subscription }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter {
        count: u32,
        label: String,
    }

    #[derive(Default)]
    struct CounterStore {
        state: Counter,
        subscribers: Subscribers<Counter>,
    }

    impl CounterStore {
        fn bump(&mut self) {
            self.state.count += 1;
            self.subscribers.notify(&self.state);
        }

        fn relabel(&mut self, label: &str) {
            self.state.label = label.to_string();
            self.subscribers.notify(&self.state);
        }
    }

    impl Observable for CounterStore {
        type State = Counter;

        fn state(&self) -> &Counter {
            &self.state
        }

        fn subscribe(&mut self, listener: Listener<Counter>) -> SubscriptionId {
            self.subscribers.subscribe(listener)
        }

        fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
            self.subscribers.unsubscribe(id)
        }
    }

    #[test]
    fn test_initial_value_pulled_without_emission() {
        let mut store = CounterStore::default();
        store.state.count = 7;

        let count = select(&mut store, |s: &Counter| s.count);
        assert_eq!(count.get(), 7);
        assert_eq!(count.version(), 0);
    }

    #[test]
    fn test_unrelated_change_not_redelivered() {
        let mut store = CounterStore::default();
        let count = select(&mut store, |s: &Counter| s.count);

        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        count.on_change(move |v| sink.borrow_mut().push(*v));

        store.relabel("sale");
        store.relabel("clearance");
        assert!(hits.borrow().is_empty());

        store.bump();
        assert_eq!(*hits.borrow(), vec![1]);
        assert_eq!(count.version(), 1);
    }

    #[test]
    fn test_structurally_equal_projection_is_not_a_change() {
        let mut store = CounterStore::default();
        // A fresh Vec every time; equal contents must not count as a change.
        let labels = select(&mut store, |s: &Counter| vec![s.label.clone()]);

        store.bump();
        store.bump();
        assert_eq!(labels.version(), 0);

        store.relabel("new");
        assert_eq!(labels.get(), vec!["new".to_string()]);
        assert_eq!(labels.version(), 1);
    }

    #[test]
    fn test_detach_stops_updates() {
        let mut store = CounterStore::default();
        let count = select(&mut store, |s: &Counter| s.count);

        assert!(count.detach(&mut store));
        store.bump();
        assert_eq!(count.get(), 0);
        assert!(store.subscribers.is_empty());
    }

    #[test]
    fn test_dropped_selection_unsubscribes_itself() {
        let mut store = CounterStore::default();
        let count = select(&mut store, |s: &Counter| s.count);
        assert_eq!(store.subscribers.len(), 1);

        drop(count);
        store.bump();
        assert!(store.subscribers.is_empty());
    }

    #[test]
    fn test_callback_may_reenter_selection() {
        let mut store = CounterStore::default();
        let count = select(&mut store, |s: &Counter| s.count);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let handle = count.clone();
        let sink = Rc::clone(&seen);
        count.on_change(move |v| {
            sink.borrow_mut().push((*v, handle.get()));
            let sink = Rc::clone(&sink);
            handle.on_change(move |v| sink.borrow_mut().push((*v, 0)));
        });

        store.bump();
        assert_eq!(*seen.borrow(), vec![(1, 1)]);

        // The callback registered from inside the first one replaced it.
        store.bump();
        assert_eq!(*seen.borrow(), vec![(1, 1), (2, 0)]);
        assert_eq!(count.version(), 2);
    }

    #[test]
    fn test_listener_returning_false_is_removed() {
        let mut subscribers: Subscribers<u32> = Subscribers::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        subscribers.subscribe(Box::new(move |_: &u32| {
            *sink.borrow_mut() += 1;
            false
        }));

        subscribers.notify(&1);
        subscribers.notify(&2);
        assert_eq!(*seen.borrow(), 1);
        assert!(subscribers.is_empty());
    }
}
