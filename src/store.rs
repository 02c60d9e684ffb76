//! Reactive View Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The engine owns
//! the real state; this is a rendering snapshot refreshed after every change.

use leptos::prelude::*;
use reactive_stores::Store;
use shoplist_sync::{AddForm, DialogState, ItemView, NotificationQueue, ProgressSnapshot};

use crate::context::Engine;

/// Everything the page renders, field-level reactive
#[derive(Clone, Debug, Store)]
pub struct ViewState {
    /// Rows in display order
    pub items: Vec<ItemView>,
    pub progress: ProgressSnapshot,
    pub form: AddForm,
    pub dialog: DialogState,
    pub toasts: NotificationQueue,
    /// Mutating controls are disabled
    pub read_only: bool,
    /// The add form is enabled
    pub can_add: bool,
}

impl ViewState {
    pub fn new(toast_duration_ms: u32) -> Self {
        Self {
            items: Vec::new(),
            progress: ProgressSnapshot::from_counts(0, 0),
            form: AddForm::default(),
            dialog: DialogState::Closed,
            toasts: NotificationQueue::new(toast_duration_ms),
            read_only: false,
            can_add: false,
        }
    }
}

/// Type alias for the store
pub type ViewStore = Store<ViewState>;

/// Get the view store from context
pub fn use_view_store() -> ViewStore {
    expect_context::<ViewStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy the engine's current state into the store
pub fn store_sync(store: &ViewStore, engine: &Engine) {
    *store.items().write() = engine.items();
    *store.progress().write() = engine.progress();
    *store.form().write() = engine.form();
    *store.dialog().write() = engine.dialog();
    *store.read_only().write() = engine.is_read_only();
    *store.can_add().write() = engine.can_add();
}

/// Row for `id`, if it is still listed
pub fn store_item(store: &ViewStore, id: shoplist_sync::ItemId) -> Option<ItemView> {
    store.items().with(|items| items.iter().find(|v| v.id() == id).cloned())
}

/// Drop a toast; a no-op once the store is disposed
pub fn store_dismiss_toast(store: &ViewStore, id: u64) {
    store.toasts().try_update(|queue| {
        queue.dismiss(id);
    });
}
