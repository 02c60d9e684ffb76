//! Page Anchors
//!
//! Reads the server-rendered bootstrap data out of the host document.

use leptos::prelude::document;
use shoplist_sync::{PageBootstrap, SyncConfig};
use wasm_bindgen::JsCast;

pub const CONFIG_SCRIPT_ID: &str = "shoplist-config";
pub const ITEMS_SCRIPT_ID: &str = "shoplist-items";

fn meta_content(name: &str) -> Option<String> {
    document()
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
}

fn script_text(id: &str) -> Option<String> {
    document().get_element_by_id(id).and_then(|el| el.text_content())
}

pub fn read_config() -> SyncConfig {
    SyncConfig::from_json_or_default(script_text(CONFIG_SCRIPT_ID).as_deref())
}

pub fn read_bootstrap() -> PageBootstrap {
    PageBootstrap::from_parts(
        meta_content("csrf-token"),
        meta_content("list-id").as_deref(),
        script_text(ITEMS_SCRIPT_ID).as_deref(),
    )
}

pub fn read_list_name() -> String {
    meta_content("list-name")
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "Shopping List".to_string())
}
