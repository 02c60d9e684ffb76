//! List Models
//!
//! Data structures matching the server's JSON entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Avatar shown when the server does not supply one
pub const DEFAULT_AVATAR_URL: &str = "/static/images/default_avatar.png";

/// Server-assigned item identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who added an item (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedBy {
    #[serde(default = "default_adder_name")]
    pub name: String,
    #[serde(default, alias = "url")]
    pub avatar_url: Option<String>,
}

fn default_adder_name() -> String {
    "N/A".to_string()
}

impl Default for AddedBy {
    fn default() -> Self {
        Self {
            name: default_adder_name(),
            avatar_url: None,
        }
    }
}

impl AddedBy {
    pub fn avatar(&self) -> &str {
        self.avatar_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_AVATAR_URL)
    }
}

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub purchased: bool,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub measure: Option<String>,
    #[serde(default)]
    pub added_by: AddedBy,
}

impl Item {
    /// "(qty measure)" column text, `None` when the item has neither.
    /// Quantity falls back to 1 when only a measure is known.
    pub fn quantity_label(&self) -> Option<String> {
        let measure = self.measure.as_deref().map(str::trim).unwrap_or("");
        if self.quantity.is_none() && measure.is_empty() {
            return None;
        }
        let qty = self.quantity.unwrap_or(1);
        if measure.is_empty() {
            Some(format!("({qty})"))
        } else {
            Some(format!("({qty} {measure})"))
        }
    }
}

/// Raw add-item form text, exactly as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: String,
    pub measure: String,
}

/// Longest measure the server stores
const MAX_MEASURE_LEN: usize = 10;

impl ItemDraft {
    /// Trim and validate the draft into a request body.
    pub fn validate(&self, max_name_len: usize) -> Result<NewItem, SyncError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SyncError::Validation("Please enter an item name.".to_string()));
        }
        if name.chars().count() > max_name_len {
            return Err(SyncError::Validation(format!(
                "Item name cannot be longer than {max_name_len} characters."
            )));
        }

        let quantity = match self.quantity.trim() {
            "" => None,
            raw => match raw.parse::<u32>() {
                Ok(q) if q > 0 => Some(q),
                _ => {
                    return Err(SyncError::Validation(
                        "Quantity must be a positive whole number.".to_string(),
                    ))
                }
            },
        };

        let measure = match self.measure.trim() {
            "" => None,
            m if m.chars().count() > MAX_MEASURE_LEN => {
                return Err(SyncError::Validation(format!(
                    "Measure cannot be longer than {MAX_MEASURE_LEN} characters."
                )))
            }
            m => Some(m.to_string()),
        };

        Ok(NewItem {
            name: name.to_string(),
            quantity,
            measure,
        })
    }
}

/// Body of `POST /list/{listId}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub quantity: Option<u32>,
    pub measure: Option<String>,
}

// ========================
// Response Payloads
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToggleResponse {
    pub purchased_status: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddItemResponse {
    pub item: Item,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenameResponse {
    pub new_name: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a generic confirmed action (e.g. delete)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}
