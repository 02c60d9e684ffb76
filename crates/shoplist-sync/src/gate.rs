//! Confirmation Gate
//!
//! Two-phase confirm-then-execute for destructive actions. The gate knows
//! nothing about what an action means: it holds one pending context, tracks
//! the busy confirm control, and reports completion to typed observers.

use std::rc::Rc;

use log::{debug, warn};

use crate::error::SyncError;
use crate::models::{ActionResponse, Item, ItemId};

pub const DEFAULT_TITLE: &str = "Confirm Action";
pub const DEFAULT_BODY: &str = "Are you sure?";
pub const DEFAULT_CONFIRM_LABEL: &str = "Confirm";
pub const DEFAULT_CONFIRM_STYLE: &str = "btn-danger";

/// What a confirmed action does, for observers that only care about some
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    DeleteItem,
    Other,
}

/// Context for one dialog lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub action_url: String,
    pub redirect_url: Option<String>,
    /// Row the action applies to
    pub target: Option<ItemId>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub confirm_label: Option<String>,
    pub confirm_style: Option<String>,
}

impl PendingAction {
    pub fn new(kind: ActionKind, action_url: impl Into<String>) -> Self {
        Self {
            kind,
            action_url: action_url.into(),
            redirect_url: None,
            target: None,
            title: None,
            body: None,
            confirm_label: None,
            confirm_style: None,
        }
    }

    pub fn delete_item(item: &Item, action_url: String) -> Self {
        Self {
            target: Some(item.id),
            title: Some("Confirm Item Deletion".to_string()),
            body: Some(format!("Are you sure you want to delete the item '{}'?", item.name)),
            confirm_label: Some("Delete Item".to_string()),
            confirm_style: Some(DEFAULT_CONFIRM_STYLE.to_string()),
            ..Self::new(ActionKind::DeleteItem, action_url)
        }
    }

    pub fn with_redirect(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or(DEFAULT_BODY)
    }

    pub fn confirm_label(&self) -> &str {
        self.confirm_label.as_deref().unwrap_or(DEFAULT_CONFIRM_LABEL)
    }

    pub fn confirm_style(&self) -> &str {
        self.confirm_style.as_deref().unwrap_or(DEFAULT_CONFIRM_STYLE)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogState {
    #[default]
    Closed,
    Open {
        action: PendingAction,
        /// Request in flight; confirm control disabled and showing a spinner
        busy: bool,
    },
}

/// Payload delivered to success observers
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCompleted {
    pub kind: ActionKind,
    pub action_url: String,
    pub response: ActionResponse,
    pub target: Option<ItemId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// No live context, or a confirm was already in flight
    Ignored,
    /// Dialog closed; observers have been told
    Completed {
        event: ActionCompleted,
        message: String,
        redirect: Option<String>,
    },
    /// Dialog still open with the control re-enabled
    Failed { message: String },
}

pub type SuccessHook = Rc<dyn Fn(&ActionCompleted)>;

#[derive(Default)]
pub struct ConfirmationGate {
    state: DialogState,
    hooks: Vec<SuccessHook>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a completion observer.
    pub fn on_success(&mut self, hook: impl Fn(&ActionCompleted) + 'static) {
        self.hooks.push(Rc::new(hook));
    }

    /// Hooks to run once the caller has released any borrows of the gate
    pub fn hooks(&self) -> Vec<SuccessHook> {
        self.hooks.clone()
    }

    /// Show the dialog for `action`, replacing any previous context.
    /// While a confirm is in flight the new request is ignored so the
    /// response settles the action that was actually sent.
    pub fn open(&mut self, action: PendingAction) {
        if let DialogState::Open { action: old, busy } = &self.state {
            if *busy {
                warn!("confirmation for {} still in flight; ignoring new dialog", old.action_url);
                return;
            }
            debug!("replacing pending action {}", old.action_url);
        }
        self.state = DialogState::Open { action, busy: false };
    }

    /// Close and discard the context. Refused while a confirm is in flight.
    pub fn close(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.state = DialogState::Closed;
        true
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn current(&self) -> Option<&PendingAction> {
        match &self.state {
            DialogState::Open { action, .. } => Some(action),
            DialogState::Closed => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, DialogState::Open { busy: true, .. })
    }

    /// Mark the confirm control busy and hand back the context to execute.
    pub fn begin_confirm(&mut self) -> Option<PendingAction> {
        match &mut self.state {
            DialogState::Open { action, busy } if !*busy => {
                *busy = true;
                Some(action.clone())
            }
            _ => None,
        }
    }

    /// Settle the in-flight confirm.
    ///
    /// Observers are NOT run here; the caller runs [`Self::hooks`] on the
    /// returned event after dropping its borrow of the gate.
    pub fn finish(&mut self, result: Result<ActionResponse, SyncError>) -> GateOutcome {
        let DialogState::Open { action, busy: true } = &self.state else {
            warn!("confirm result arrived with no in-flight action");
            return GateOutcome::Ignored;
        };

        match result {
            Ok(response) => {
                let action = action.clone();
                self.state = DialogState::Closed;
                let message = response
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Action completed successfully.".to_string());
                let redirect = response.redirect_url.clone().or(action.redirect_url);
                GateOutcome::Completed {
                    event: ActionCompleted {
                        kind: action.kind,
                        action_url: action.action_url,
                        response,
                        target: action.target,
                    },
                    message,
                    redirect,
                }
            }
            Err(e) => {
                if let DialogState::Open { busy, .. } = &mut self.state {
                    *busy = false;
                }
                GateOutcome::Failed {
                    message: e.user_message("Action failed"),
                }
            }
        }
    }
}
