//! Item View State Machine (inline rename)
//!
//! `Display -> Editing -> Saving -> Display`, with `Editing -> Display` on
//! cancel and `Saving -> Editing` when the server refuses the new name.

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Display,
    Editing {
        draft: String,
        /// Displayed name captured on entry
        rollback: String,
        /// Inline error under the input
        error: Option<String>,
    },
    Saving {
        draft: String,
        rollback: String,
    },
}

/// What a save attempt should do
#[derive(Debug, Clone, PartialEq)]
pub enum SaveDecision {
    /// Not editing, or a save for this item is already in flight
    Ignore,
    /// Rejected locally; state stays `Editing` with the message set
    Invalid(String),
    /// Trimmed draft equals the rollback value; back to `Display`
    Unchanged,
    /// Now `Saving`; send this trimmed name
    Submit(String),
}

impl EditState {
    /// Enter editing from display. Returns false from any other state.
    pub fn begin(&mut self, current_name: &str) -> bool {
        if !matches!(self, EditState::Display) {
            return false;
        }
        let rollback = current_name.trim().to_string();
        *self = EditState::Editing {
            draft: rollback.clone(),
            rollback,
            error: None,
        };
        true
    }

    pub fn set_draft(&mut self, text: &str) {
        if let EditState::Editing { draft, .. } = self {
            *draft = text.to_string();
        }
    }

    /// Discard the draft. Only valid while `Editing`.
    pub fn cancel(&mut self) -> bool {
        if matches!(self, EditState::Editing { .. }) {
            *self = EditState::Display;
            true
        } else {
            false
        }
    }

    pub fn prepare_save(&mut self, max_len: usize) -> SaveDecision {
        let EditState::Editing { draft, rollback, error } = self else {
            return SaveDecision::Ignore;
        };

        let name = draft.trim().to_string();
        if name.is_empty() {
            let msg = "Item name cannot be empty.".to_string();
            *error = Some(msg.clone());
            return SaveDecision::Invalid(msg);
        }
        if name.chars().count() > max_len {
            let msg = format!("Item name cannot be longer than {max_len} characters.");
            *error = Some(msg.clone());
            return SaveDecision::Invalid(msg);
        }
        if name == *rollback {
            *self = EditState::Display;
            return SaveDecision::Unchanged;
        }

        *self = EditState::Saving {
            draft: draft.clone(),
            rollback: rollback.clone(),
        };
        SaveDecision::Submit(name)
    }

    pub fn save_succeeded(&mut self) {
        if matches!(self, EditState::Saving { .. }) {
            *self = EditState::Display;
        }
    }

    /// Back to `Editing` with the draft intact and the error shown.
    pub fn save_failed(&mut self, message: String) {
        if let EditState::Saving { draft, rollback } = self {
            *self = EditState::Editing {
                draft: std::mem::take(draft),
                rollback: std::mem::take(rollback),
                error: Some(message),
            };
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditState::Editing { .. })
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, EditState::Saving { .. })
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditState::Editing { draft, .. } | EditState::Saving { draft, .. } => Some(draft),
            EditState::Display => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EditState::Editing { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}
