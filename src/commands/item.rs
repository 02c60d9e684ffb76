//! Item Commands
//!
//! Frontend bindings for item-related endpoints.

use shoplist_sync::api::RenameBody;
use shoplist_sync::{AddItemResponse, ItemId, NewItem, RenameResponse, Routes, SyncError, ToggleResponse};

use super::{post, post_json};

// ========================
// Commands
// ========================

pub async fn toggle_purchase(
    routes: &Routes,
    csrf_token: &str,
    id: ItemId,
) -> Result<ToggleResponse, SyncError> {
    post(&routes.toggle_purchase(id), csrf_token).await
}

pub async fn add_item(
    routes: &Routes,
    csrf_token: &str,
    list_id: u64,
    item: &NewItem,
) -> Result<AddItemResponse, SyncError> {
    post_json(&routes.add_item(list_id), csrf_token, item).await
}

pub async fn update_item_name(
    routes: &Routes,
    csrf_token: &str,
    id: ItemId,
    new_name: &str,
) -> Result<RenameResponse, SyncError> {
    post_json(&routes.update_name(id), csrf_token, &RenameBody { new_name }).await
}
