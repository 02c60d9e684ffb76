//! Item collection view-model
//!
//! The single source of truth for what the list shows. The DOM is rendered
//! from this, never read back.

use log::warn;

use crate::error::SyncError;
use crate::models::{Item, ItemId};
use crate::progress::ProgressSnapshot;
use crate::view_state::EditState;

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub item: Item,
    pub edit: EditState,
    /// Toggle request in flight; the control is disabled
    pub toggle_busy: bool,
    /// A confirmed delete is in flight for this item
    pub delete_pending: bool,
}

impl ItemView {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            edit: EditState::Display,
            toggle_busy: false,
            delete_pending: false,
        }
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }
}

/// Items in display (insertion) order, unique by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    items: Vec<ItemView>,
}

impl ListState {
    /// Build from the server-rendered list, dropping repeated ids.
    pub fn new(items: Vec<Item>) -> Self {
        let mut state = Self::default();
        for item in items {
            if let Err(e) = state.insert(item) {
                warn!("skipping initial item: {e}");
            }
        }
        state
    }

    /// Append a new row. An id already present is rejected.
    pub fn insert(&mut self, item: Item) -> Result<(), SyncError> {
        if self.get(item.id).is_some() {
            return Err(SyncError::Rejected(format!("item {} is already listed", item.id)));
        }
        self.items.push(ItemView::new(item));
        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemView> {
        self.items.iter().find(|v| v.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut ItemView> {
        self.items.iter_mut().find(|v| v.id() == id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<ItemView> {
        let idx = self.items.iter().position(|v| v.id() == id)?;
        Some(self.items.remove(idx))
    }

    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Drives the "empty list" placeholder
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot::compute(self.items.iter().map(|v| &v.item))
    }
}
