//! Shopping List Synchronization Engine
//!
//! Keeps each list item's view-model consistent with the server across
//! overlapping toggle, add, rename and delete round trips.
//!
//! Layers (leaves first):
//! - models / error / config: data and wire types
//! - notify: transient user messages
//! - progress: derived purchased/total indicator
//! - view_state / list: per-item view-model
//! - gate: confirm-then-execute dispatcher for destructive actions
//! - api: server contract
//! - engine: orchestrators tying it all together

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod list;
pub mod models;
pub mod notify;
pub mod progress;
pub mod view_state;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ListApi, Routes};
pub use config::{PageBootstrap, SyncConfig, ToggleStyles};
pub use engine::{AddForm, ListSync};
pub use error::{decode_envelope, SyncError};
pub use gate::{ActionCompleted, ActionKind, ConfirmationGate, DialogState, GateOutcome, PendingAction};
pub use list::{ItemView, ListState};
pub use models::{
    ActionResponse, AddItemResponse, AddedBy, Item, ItemDraft, ItemId, NewItem, RenameResponse,
    ToggleResponse,
};
pub use notify::{Category, Notification, NotificationQueue, Notifier, ToastEntry};
pub use progress::{ProgressSegments, ProgressSnapshot};
pub use view_state::{EditState, SaveDecision};
