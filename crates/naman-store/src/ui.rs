//! Transient view-state flags.

use serde::Serialize;
use tracing::debug;

use crate::ids::ModalId;
use crate::select::{Listener, Observable, SubscriptionId, Subscribers};

/// Overlay flags consumed by navigation components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub is_mobile_menu_open: bool,
    pub is_search_open: bool,
    pub is_filter_drawer_open: bool,
    /// At most one modal shows at a time.
    pub active_modal: Option<ModalId>,
}

impl UiState {
    /// Whether any overlay is showing.
    pub fn any_open(&self) -> bool {
        self.is_mobile_menu_open
            || self.is_search_open
            || self.is_filter_drawer_open
            || self.active_modal.is_some()
    }
}

/// UI store. Nothing here is persisted; every operation is total.
#[derive(Debug, Default)]
pub struct UiStore {
    state: UiState,
    subscribers: Subscribers<UiState>,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.update(|s| s.is_mobile_menu_open = !s.is_mobile_menu_open);
    }

    pub fn open_mobile_menu(&mut self) {
        self.update(|s| s.is_mobile_menu_open = true);
    }

    pub fn close_mobile_menu(&mut self) {
        self.update(|s| s.is_mobile_menu_open = false);
    }

    pub fn toggle_search(&mut self) {
        self.update(|s| s.is_search_open = !s.is_search_open);
    }

    pub fn open_search(&mut self) {
        self.update(|s| s.is_search_open = true);
    }

    pub fn close_search(&mut self) {
        self.update(|s| s.is_search_open = false);
    }

    pub fn toggle_filter_drawer(&mut self) {
        self.update(|s| s.is_filter_drawer_open = !s.is_filter_drawer_open);
    }

    pub fn open_filter_drawer(&mut self) {
        self.update(|s| s.is_filter_drawer_open = true);
    }

    pub fn close_filter_drawer(&mut self) {
        self.update(|s| s.is_filter_drawer_open = false);
    }

    /// Show a modal, replacing any modal already showing.
    pub fn open_modal(&mut self, modal_id: impl Into<ModalId>) {
        let modal_id = modal_id.into();
        self.update(|s| s.active_modal = Some(modal_id));
    }

    pub fn close_modal(&mut self) {
        self.update(|s| s.active_modal = None);
    }

    /// Reset every flag.
    pub fn close_all(&mut self) {
        self.update(|s| *s = UiState::default());
    }

    fn update(&mut self, apply: impl FnOnce(&mut UiState)) {
        apply(&mut self.state);
        debug!(state = ?self.state, "ui state changed");
        self.subscribers.notify(&self.state);
    }
}

impl Observable for UiStore {
    type State = UiState;

    fn state(&self) -> &UiState {
        &self.state
    }

    fn subscribe(&mut self, listener: Listener<UiState>) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
