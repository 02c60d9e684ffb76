//! Server Command Wrappers
//!
//! Frontend bindings to the list's HTTP endpoints, organized by domain.

mod action;
mod item;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shoplist_sync::api::ajax_headers;
use shoplist_sync::{
    decode_envelope, ActionResponse, AddItemResponse, ItemId, ListApi, NewItem, RenameResponse,
    Routes, SyncError, ToggleResponse,
};

// Re-export all public items
pub use action::*;
pub use item::*;

/// `POST` with the AJAX and anti-forgery headers set
fn ajax_post(url: &str, csrf_token: &str) -> RequestBuilder {
    ajax_headers(csrf_token)
        .into_iter()
        .fold(Request::post(url), |builder, (name, value)| builder.header(name, value))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SyncError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| SyncError::Decode {
        status,
        detail: e.to_string(),
    })?;
    decode_envelope(status, &body)
}

fn network(error: gloo_net::Error) -> SyncError {
    SyncError::Network(error.to_string())
}

/// POST without a body
async fn post<T: DeserializeOwned>(url: &str, csrf_token: &str) -> Result<T, SyncError> {
    let response = ajax_post(url, csrf_token).send().await.map_err(network)?;
    decode(response).await
}

/// POST a JSON body
async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    csrf_token: &str,
    body: &B,
) -> Result<T, SyncError> {
    let request = ajax_post(url, csrf_token).json(body).map_err(network)?;
    let response = request.send().await.map_err(network)?;
    decode(response).await
}

/// [`ListApi`] over `fetch`
pub struct HttpListApi {
    routes: Routes,
    csrf_token: String,
}

impl HttpListApi {
    pub fn new(routes: Routes, csrf_token: String) -> Self {
        Self { routes, csrf_token }
    }
}

#[async_trait(?Send)]
impl ListApi for HttpListApi {
    async fn toggle_purchase(&self, id: ItemId) -> Result<ToggleResponse, SyncError> {
        toggle_purchase(&self.routes, &self.csrf_token, id).await
    }

    async fn add_item(&self, list_id: u64, item: &NewItem) -> Result<AddItemResponse, SyncError> {
        add_item(&self.routes, &self.csrf_token, list_id, item).await
    }

    async fn rename_item(&self, id: ItemId, new_name: &str) -> Result<RenameResponse, SyncError> {
        update_item_name(&self.routes, &self.csrf_token, id, new_name).await
    }

    async fn post_action(&self, url: &str) -> Result<ActionResponse, SyncError> {
        post_action(url, &self.csrf_token).await
    }
}
