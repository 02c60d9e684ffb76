//! Engine Configuration
//!
//! Tunables plus the page bootstrap the server renders into the document.

use log::warn;
use serde::Deserialize;

use crate::error::SyncError;
use crate::models::Item;

/// Toggle button appearance per purchased state.
///
/// Different pages style the control differently; that is configuration,
/// not separate logic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToggleStyles {
    pub purchased_class: String,
    pub unpurchased_class: String,
    pub purchased_icon: String,
    pub unpurchased_icon: String,
    pub purchased_label: String,
    pub unpurchased_label: String,
}

impl Default for ToggleStyles {
    fn default() -> Self {
        Self {
            purchased_class: "btn-outline-secondary".to_string(),
            unpurchased_class: "btn-success".to_string(),
            purchased_icon: "bi-arrow-counterclockwise".to_string(),
            unpurchased_icon: "bi-check-circle".to_string(),
            purchased_label: "Undo".to_string(),
            unpurchased_label: "Mark as Purchased".to_string(),
        }
    }
}

impl ToggleStyles {
    pub fn class(&self, purchased: bool) -> &str {
        if purchased { &self.purchased_class } else { &self.unpurchased_class }
    }

    pub fn icon(&self, purchased: bool) -> &str {
        if purchased { &self.purchased_icon } else { &self.unpurchased_icon }
    }

    pub fn label(&self, purchased: bool) -> &str {
        if purchased { &self.purchased_label } else { &self.unpurchased_label }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Prefix for every list route
    pub base_path: String,
    /// Default notification lifetime; 0 keeps toasts until dismissed
    pub toast_duration_ms: u32,
    /// Grace period before following a post-action redirect
    pub redirect_delay_ms: u32,
    /// Delay between an edit input losing focus and the save attempt
    pub blur_grace_ms: u32,
    /// Fixed divider width in the progress track
    pub gap_width_px: u32,
    pub max_name_len: usize,
    pub toggle_styles: ToggleStyles,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_path: "/shopping".to_string(),
            toast_duration_ms: 5000,
            redirect_delay_ms: 1000,
            blur_grace_ms: 150,
            gap_width_px: 4,
            max_name_len: 100,
            toggle_styles: ToggleStyles::default(),
        }
    }
}

impl SyncConfig {
    /// Parse an optional JSON override block; defaults on absence or error.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring malformed list config: {e}");
                Self::default()
            }
        }
    }
}

/// Server-rendered data the list starts from.
///
/// Each anchor gates only the features that need it: without a CSRF token
/// nothing can be mutated, without a list id only adding is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBootstrap {
    pub list_id: Option<u64>,
    pub csrf_token: Option<String>,
    pub items: Vec<Item>,
    /// Set when some or all of the items block could not be read
    pub items_error: Option<SyncError>,
}

impl PageBootstrap {
    /// Assemble from raw page anchors. An absent items block just means the
    /// list starts empty; unreadable entries are skipped one by one.
    pub fn from_parts(
        csrf_token: Option<String>,
        list_id: Option<&str>,
        items_json: Option<&str>,
    ) -> Self {
        let csrf_token = csrf_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let list_id = list_id.and_then(|raw| raw.trim().parse::<u64>().ok());
        let (items, items_error) = match items_json.map(str::trim).filter(|r| !r.is_empty()) {
            Some(raw) => parse_items(raw),
            None => (Vec::new(), None),
        };

        Self {
            list_id,
            csrf_token,
            items,
            items_error,
        }
    }

    /// Reason every mutation must be refused, if any
    pub fn csrf_error(&self) -> Option<SyncError> {
        self.csrf_token
            .is_none()
            .then(|| SyncError::MissingPrecondition("CSRF token missing".to_string()))
    }

    /// Reason the add form must be disabled, if any
    pub fn list_id_error(&self) -> Option<SyncError> {
        self.list_id
            .is_none()
            .then(|| SyncError::MissingPrecondition("list id missing".to_string()))
    }
}

fn parse_items(raw: &str) -> (Vec<Item>, Option<SyncError>) {
    let entries = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("items block unreadable: {e}");
            return (
                Vec::new(),
                Some(SyncError::PageData("The list items could not be loaded.".to_string())),
            );
        }
    };

    let total = entries.len();
    let items: Vec<Item> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Item>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("skipping unreadable item: {e}");
                None
            }
        })
        .collect();

    let skipped = total - items.len();
    let error = match skipped {
        0 => None,
        1 => Some(SyncError::PageData("1 list item could not be loaded.".to_string())),
        n => Some(SyncError::PageData(format!("{n} list items could not be loaded."))),
    };
    (items, error)
}
