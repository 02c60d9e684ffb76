//! Server Contract
//!
//! Routes, headers and the async trait the orchestrators call through.

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::SyncError;
use crate::models::{
    ActionResponse, AddItemResponse, ItemId, NewItem, RenameResponse, ToggleResponse,
};

/// Anti-forgery header, value sourced from page metadata
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Lets the server tell AJAX calls from full-page requests
pub const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Headers every request carries
pub fn ajax_headers(csrf_token: &str) -> [(&'static str, &str); 2] {
    [(CSRF_HEADER, csrf_token), AJAX_HEADER]
}

/// Body of `POST /list/item/{id}/update_name`
#[derive(Debug, Serialize)]
pub struct RenameBody<'a> {
    pub new_name: &'a str,
}

/// Transport used by the orchestrators.
///
/// Implementations decode replies with [`crate::decode_envelope`] so every
/// backend agrees on what counts as success.
#[async_trait(?Send)]
pub trait ListApi {
    async fn toggle_purchase(&self, id: ItemId) -> Result<ToggleResponse, SyncError>;
    async fn add_item(&self, list_id: u64, item: &NewItem) -> Result<AddItemResponse, SyncError>;
    async fn rename_item(&self, id: ItemId, new_name: &str) -> Result<RenameResponse, SyncError>;
    /// POST with no body to a caller-supplied URL
    async fn post_action(&self, url: &str) -> Result<ActionResponse, SyncError>;
}

#[async_trait(?Send)]
impl<T: ListApi + ?Sized> ListApi for Rc<T> {
    async fn toggle_purchase(&self, id: ItemId) -> Result<ToggleResponse, SyncError> {
        (**self).toggle_purchase(id).await
    }

    async fn add_item(&self, list_id: u64, item: &NewItem) -> Result<AddItemResponse, SyncError> {
        (**self).add_item(list_id, item).await
    }

    async fn rename_item(&self, id: ItemId, new_name: &str) -> Result<RenameResponse, SyncError> {
        (**self).rename_item(id, new_name).await
    }

    async fn post_action(&self, url: &str) -> Result<ActionResponse, SyncError> {
        (**self).post_action(url).await
    }
}

/// Path builder rooted at the configured base path
#[derive(Debug, Clone, PartialEq)]
pub struct Routes {
    base: String,
}

impl Routes {
    pub fn new(base_path: &str) -> Self {
        Self {
            base: base_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn toggle_purchase(&self, id: ItemId) -> String {
        format!("{}/list/item/{id}/toggle_purchase", self.base)
    }

    pub fn add_item(&self, list_id: u64) -> String {
        format!("{}/list/{list_id}", self.base)
    }

    pub fn update_name(&self, id: ItemId) -> String {
        format!("{}/list/item/{id}/update_name", self.base)
    }

    pub fn delete_item(&self, id: ItemId) -> String {
        format!("{}/list/item/{id}/delete", self.base)
    }

    /// Full-page edit form (quantity and measure)
    pub fn edit_item(&self, id: ItemId) -> String {
        format!("{}/list/item/{id}/edit", self.base)
    }
}
