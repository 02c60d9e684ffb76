//! Toggle / Add / Rename / Delete Orchestrators
//!
//! Each operation applies its local transition, awaits one round trip and
//! reconciles. State lives behind a `RefCell` that is never borrowed across
//! an await, so overlapping operations on the same event loop interleave
//! safely.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, error, info, warn};

use crate::api::{ListApi, Routes};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::gate::{ActionCompleted, ActionKind, ConfirmationGate, DialogState, GateOutcome, PendingAction};
use crate::list::{ItemView, ListState};
use crate::models::{ItemDraft, ItemId};
use crate::notify::{Notification, Notifier};
use crate::progress::ProgressSnapshot;
use crate::view_state::SaveDecision;

/// Add-item form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddForm {
    pub draft: ItemDraft,
    /// Request in flight; the add control shows "Adding..."
    pub busy: bool,
}

struct Shared {
    list: ListState,
    form: AddForm,
    gate: ConfirmationGate,
    /// Set when a page precondition is missing; all mutations refuse
    read_only: Option<SyncError>,
}

struct Inner<A, N> {
    /// Only adding needs it
    list_id: Option<u64>,
    config: SyncConfig,
    routes: Routes,
    api: A,
    notifier: N,
    state: RefCell<Shared>,
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

/// Handle to the list engine. Clones share state.
pub struct ListSync<A, N> {
    inner: Rc<Inner<A, N>>,
}

impl<A, N> Clone for ListSync<A, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: ListApi + 'static, N: Notifier + 'static> ListSync<A, N> {
    pub fn new(list_id: Option<u64>, list: ListState, config: SyncConfig, api: A, notifier: N) -> Self {
        let routes = Routes::new(&config.base_path);
        let inner = Rc::new(Inner {
            list_id,
            config,
            routes,
            api,
            notifier,
            state: RefCell::new(Shared {
                list,
                form: AddForm::default(),
                gate: ConfirmationGate::new(),
                read_only: None,
            }),
            listeners: RefCell::new(Vec::new()),
        });

        let weak = Rc::downgrade(&inner);
        inner
            .state
            .borrow_mut()
            .gate
            .on_success(move |event| remove_deleted_item(&weak, event));

        Self { inner }
    }

    /// Disable every mutation; `reason` is reported once, here.
    pub fn set_read_only(&self, reason: SyncError) {
        error!("list disabled: {reason}");
        self.inner
            .notifier
            .notify(Notification::error(reason.user_message("")).with_duration(0));
        self.inner.state.borrow_mut().read_only = Some(reason);
        self.changed();
    }

    // ========================
    // Observation
    // ========================

    /// Run `listener` after every state change.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Register an observer for confirmed actions.
    pub fn on_action_completed(&self, hook: impl Fn(&ActionCompleted) + 'static) {
        self.inner.state.borrow_mut().gate.on_success(hook);
    }

    fn changed(&self) {
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    pub fn routes(&self) -> &Routes {
        &self.inner.routes
    }

    pub fn items(&self) -> Vec<ItemView> {
        self.inner.state.borrow().list.items().to_vec()
    }

    pub fn item(&self, id: ItemId) -> Option<ItemView> {
        self.inner.state.borrow().list.get(id).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().list.is_empty()
    }

    pub fn progress(&self) -> ProgressSnapshot {
        self.inner.state.borrow().list.progress()
    }

    pub fn form(&self) -> AddForm {
        self.inner.state.borrow().form.clone()
    }

    pub fn dialog(&self) -> DialogState {
        self.inner.state.borrow().gate.state().clone()
    }

    pub fn is_read_only(&self) -> bool {
        self.inner.state.borrow().read_only.is_some()
    }

    /// The add form is usable: the page named a list and mutations are allowed
    pub fn can_add(&self) -> bool {
        self.inner.list_id.is_some() && !self.is_read_only()
    }

    fn ensure_writable(&self) -> Result<(), SyncError> {
        match &self.inner.state.borrow().read_only {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }

    fn notify(&self, notification: Notification) {
        self.inner.notifier.notify(notification);
    }

    // ========================
    // Toggle
    // ========================

    /// Flip an item's purchased state on the server, then locally.
    ///
    /// Refused while a delete of the same item is in flight. A second toggle
    /// while the first is pending is dropped.
    pub async fn toggle(&self, id: ItemId) -> Result<bool, SyncError> {
        self.ensure_writable()?;
        let refusal = {
            let mut state = self.inner.state.borrow_mut();
            match state.list.get_mut(id) {
                None => Some((
                    Notification::error("Could not perform action: item details missing."),
                    format!("item {id} is not listed"),
                )),
                Some(view) if view.delete_pending => Some((
                    Notification::warning("This item is being deleted."),
                    format!("item {id} is being deleted"),
                )),
                Some(view) if view.toggle_busy => {
                    debug!("toggle of item {id} dropped: already in flight");
                    return Err(SyncError::Rejected(format!("item {id} toggle in flight")));
                }
                Some(view) => {
                    view.toggle_busy = true;
                    None
                }
            }
        };
        if let Some((notification, reason)) = refusal {
            warn!("toggle refused: {reason}");
            self.notify(notification);
            return Err(SyncError::Rejected(reason));
        }
        self.changed();

        let result = self.inner.api.toggle_purchase(id).await;

        {
            let mut state = self.inner.state.borrow_mut();
            match state.list.get_mut(id) {
                Some(view) => {
                    view.toggle_busy = false;
                    if let Ok(response) = &result {
                        view.item.purchased = response.purchased_status;
                    }
                }
                None => warn!("toggle reply for item {id} arrived after removal"),
            }
        }
        self.changed();

        match result {
            Ok(response) => {
                info!("item {id} purchased={}", response.purchased_status);
                let message = response.message.unwrap_or_else(|| "Status updated!".to_string());
                self.notify(Notification::success(message));
                Ok(response.purchased_status)
            }
            Err(e) => {
                warn!("toggle of item {id} failed: {e}");
                self.notify(Notification::error(e.user_message("Could not update purchase status.")));
                Err(e)
            }
        }
    }

    // ========================
    // Add
    // ========================

    pub fn update_form(&self, edit: impl FnOnce(&mut ItemDraft)) {
        edit(&mut self.inner.state.borrow_mut().form.draft);
        self.changed();
    }

    /// Validate the form, post it, and append the server's canonical item.
    ///
    /// On failure the form keeps its contents for a retry.
    pub async fn add(&self) -> Result<ItemId, SyncError> {
        self.ensure_writable()?;
        let Some(list_id) = self.inner.list_id else {
            let err = SyncError::MissingPrecondition("list id missing".to_string());
            warn!("add refused: {err}");
            self.notify(Notification::error(err.user_message("")));
            return Err(err);
        };
        let new_item = {
            let mut state = self.inner.state.borrow_mut();
            if state.form.busy {
                debug!("add dropped: already in flight");
                return Err(SyncError::Rejected("add in flight".to_string()));
            }
            let validated = state.form.draft.validate(self.inner.config.max_name_len);
            match validated {
                Ok(new_item) => {
                    state.form.busy = true;
                    new_item
                }
                Err(e) => {
                    drop(state);
                    self.notify(Notification::warning(e.user_message("")));
                    return Err(e);
                }
            }
        };
        self.changed();

        let result = self
            .inner
            .api
            .add_item(list_id, &new_item)
            .await
            .and_then(|response| {
                if response.item.name.trim().is_empty() {
                    Err(SyncError::Decode {
                        status: 200,
                        detail: "item without a name".to_string(),
                    })
                } else {
                    Ok(response)
                }
            });

        let outcome = {
            let mut state = self.inner.state.borrow_mut();
            state.form.busy = false;
            result.and_then(|response| {
                let id = response.item.id;
                state.list.insert(response.item)?;
                state.form.draft = ItemDraft::default();
                Ok((id, response.message))
            })
        };
        self.changed();

        match outcome {
            Ok((id, message)) => {
                info!("item {id} added to list {list_id}");
                self.notify(Notification::success(message.unwrap_or_else(|| "Item added!".to_string())));
                Ok(id)
            }
            Err(e) => {
                warn!("add failed: {e}");
                let text = match &e {
                    SyncError::Decode { .. } => "Error processing server response.".to_string(),
                    other => other.user_message("Failed to add item."),
                };
                self.notify(Notification::error(text));
                Err(e)
            }
        }
    }

    // ========================
    // Inline rename
    // ========================

    /// Display -> Editing. False when the item is missing or not displayed.
    pub fn begin_edit(&self, id: ItemId) -> bool {
        if self.ensure_writable().is_err() {
            return false;
        }
        let entered = {
            let mut state = self.inner.state.borrow_mut();
            match state.list.get_mut(id) {
                Some(view) => {
                    let name = view.item.name.clone();
                    view.edit.begin(&name)
                }
                None => false,
            }
        };
        if entered {
            debug!("item {id} editing");
            self.changed();
        }
        entered
    }

    pub fn set_draft(&self, id: ItemId, text: &str) {
        if let Some(view) = self.inner.state.borrow_mut().list.get_mut(id) {
            view.edit.set_draft(text);
        }
        self.changed();
    }

    /// Editing -> Display, discarding the draft. No request is made.
    pub fn cancel_edit(&self, id: ItemId) {
        let cancelled = self
            .inner
            .state
            .borrow_mut()
            .list
            .get_mut(id)
            .is_some_and(|view| view.edit.cancel());
        if cancelled {
            debug!("item {id} edit cancelled");
            self.changed();
        }
    }

    /// Submit the draft name.
    ///
    /// `Ok(Some(name))` is the server's canonical name; `Ok(None)` means
    /// nothing was sent (unchanged name, not editing, or a save for this
    /// item already in flight). Validation failures stay inline.
    pub async fn save_edit(&self, id: ItemId) -> Result<Option<String>, SyncError> {
        self.ensure_writable()?;
        let decision = {
            let mut state = self.inner.state.borrow_mut();
            match state.list.get_mut(id) {
                Some(view) => view.edit.prepare_save(self.inner.config.max_name_len),
                None => SaveDecision::Ignore,
            }
        };

        let name = match decision {
            SaveDecision::Ignore => return Ok(None),
            SaveDecision::Unchanged => {
                self.changed();
                return Ok(None);
            }
            SaveDecision::Invalid(msg) => {
                self.changed();
                return Err(SyncError::Validation(msg));
            }
            SaveDecision::Submit(name) => name,
        };
        self.changed();

        let result = self.inner.api.rename_item(id, &name).await;

        let settled = {
            let mut state = self.inner.state.borrow_mut();
            match (state.list.get_mut(id), &result) {
                (Some(view), Ok(response)) => {
                    view.item.name = response.new_name.clone();
                    view.edit.save_succeeded();
                    true
                }
                (Some(view), Err(e)) => {
                    view.edit.save_failed(e.user_message("Failed to save."));
                    true
                }
                (None, _) => false,
            }
        };
        self.changed();

        match result {
            Ok(response) => {
                info!("item {id} renamed to {:?}", response.new_name);
                self.notify(Notification::success(format!(
                    "Item renamed to \"{}\".",
                    response.new_name
                )));
                Ok(Some(response.new_name))
            }
            Err(e) => {
                warn!("rename of item {id} failed: {e}");
                if !settled {
                    // no inline anchor left to show it
                    self.notify(Notification::error(e.user_message("Failed to save item name.")));
                }
                Err(e)
            }
        }
    }

    /// Focus left the input. The caller waits the blur grace period first,
    /// so an Escape pressed in the meantime has already cancelled.
    pub async fn blur_edit(&self, id: ItemId) -> Result<Option<String>, SyncError> {
        let editing = self
            .inner
            .state
            .borrow()
            .list
            .get(id)
            .is_some_and(|view| view.edit.is_editing());
        if !editing {
            return Ok(None);
        }
        self.save_edit(id).await
    }

    // ========================
    // Confirmation Gate / Delete
    // ========================

    pub fn open_confirmation(&self, action: PendingAction) {
        self.inner.state.borrow_mut().gate.open(action);
        self.changed();
    }

    /// Ask to delete an item through the confirmation dialog.
    pub fn request_delete(&self, id: ItemId) -> Result<(), SyncError> {
        self.ensure_writable()?;
        let action = {
            let state = self.inner.state.borrow();
            state
                .list
                .get(id)
                .map(|view| PendingAction::delete_item(&view.item, self.inner.routes.delete_item(id)))
        };
        let Some(action) = action else {
            warn!("delete refused: item {id} is not listed");
            self.notify(Notification::error("Could not perform action: item details missing."));
            return Err(SyncError::Rejected(format!("item {id} is not listed")));
        };
        self.open_confirmation(action);
        Ok(())
    }

    /// Cancel the dialog. Refused while the confirm request is in flight.
    pub fn dismiss(&self) -> bool {
        let closed = self.inner.state.borrow_mut().gate.close();
        if closed {
            self.changed();
        }
        closed
    }

    /// Execute the pending action.
    pub async fn confirm(&self) -> Result<GateOutcome, SyncError> {
        self.ensure_writable()?;
        let action = {
            let mut state = self.inner.state.borrow_mut();
            let Some(action) = state.gate.begin_confirm() else {
                return Ok(GateOutcome::Ignored);
            };
            if let Some(id) = action.target {
                if let Some(view) = state.list.get_mut(id) {
                    view.delete_pending = true;
                }
            }
            action
        };
        self.changed();

        let result = self.inner.api.post_action(&action.action_url).await;

        let (outcome, hooks) = {
            let mut state = self.inner.state.borrow_mut();
            let outcome = state.gate.finish(result);
            if let (GateOutcome::Failed { .. }, Some(id)) = (&outcome, action.target) {
                if let Some(view) = state.list.get_mut(id) {
                    view.delete_pending = false;
                }
            }
            (outcome, state.gate.hooks())
        };

        match &outcome {
            GateOutcome::Completed { event, message, .. } => {
                info!("action {} completed", event.action_url);
                self.notify(Notification::success(message.clone()));
                for hook in hooks {
                    hook(event);
                }
            }
            GateOutcome::Failed { message } => {
                warn!("action {} failed: {message}", action.action_url);
                self.notify(Notification::error(message.clone()));
            }
            GateOutcome::Ignored => {}
        }
        self.changed();
        Ok(outcome)
    }
}

/// Delete reaction: drop the confirmed row from the list.
fn remove_deleted_item<A, N>(weak: &Weak<Inner<A, N>>, event: &ActionCompleted) {
    if event.kind != ActionKind::DeleteItem {
        return;
    }
    let (Some(inner), Some(target)) = (weak.upgrade(), event.target) else {
        return;
    };
    let removed = inner.state.borrow_mut().list.remove(target);
    match removed {
        Some(_) => info!("item {target} removed"),
        None => warn!("deleted item {target} was already gone"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionResponse, AddItemResponse, RenameResponse, ToggleResponse};
    use crate::notify::Category;
    use crate::testing::{held, make_item, RecordingNotifier, Reply, ScriptedApi};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    type Engine = ListSync<Rc<ScriptedApi>, Rc<RecordingNotifier>>;

    fn setup(items: Vec<crate::models::Item>) -> (Engine, Rc<ScriptedApi>, Rc<RecordingNotifier>) {
        let api = ScriptedApi::new();
        let notes = RecordingNotifier::new();
        let engine = ListSync::new(
            Some(9),
            ListState::new(items),
            SyncConfig::default(),
            api.clone(),
            notes.clone(),
        );
        (engine, api, notes)
    }

    fn toggled(purchased: bool) -> Reply<ToggleResponse> {
        Reply::Ready(Ok(ToggleResponse {
            purchased_status: purchased,
            message: None,
        }))
    }

    fn deleted() -> Reply<ActionResponse> {
        Reply::Ready(Ok(ActionResponse {
            message: Some("\"Bread\" deleted.".to_string()),
            redirect_url: None,
        }))
    }

    // ---- toggle ----

    #[test]
    fn test_toggle_twice_restores_state_and_progress() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false), make_item(2, "Eggs", true)]);
        let before = engine.progress();
        api.push_toggle(toggled(true));
        api.push_toggle(toggled(false));

        assert_eq!(block_on(engine.toggle(ItemId(1))), Ok(true));
        assert_eq!(engine.progress().rounded(), 100);
        assert_eq!(block_on(engine.toggle(ItemId(1))), Ok(false));

        assert!(!engine.item(ItemId(1)).unwrap().item.purchased);
        assert_eq!(engine.progress(), before);
        assert_eq!(notes.count(Category::Success), 2);
    }

    #[test]
    fn test_toggle_failure_restores_control() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false)]);
        api.push_toggle(Reply::Ready(Err(SyncError::Request {
            status: 500,
            message: Some("Error updating item status.".to_string()),
        })));

        assert!(block_on(engine.toggle(ItemId(1))).is_err());
        let view = engine.item(ItemId(1)).unwrap();
        assert!(!view.item.purchased);
        assert!(!view.toggle_busy);
        assert_eq!(notes.last().unwrap().message, "Error updating item status.");
        assert_eq!(notes.last().unwrap().category, Category::Error);
    }

    #[test]
    fn test_toggle_in_flight_drops_second() {
        let (engine, api, _) = setup(vec![make_item(1, "Milk", false)]);
        let (tx, reply) = held();
        api.push_toggle(reply);

        let mut pool = LocalPool::new();
        let first = engine.clone();
        pool.spawner()
            .spawn_local(async move {
                let _ = first.toggle(ItemId(1)).await;
            })
            .unwrap();
        pool.run_until_stalled();
        assert!(engine.item(ItemId(1)).unwrap().toggle_busy);

        assert!(block_on(engine.toggle(ItemId(1))).is_err());
        assert_eq!(api.calls().len(), 1);

        tx.send(Ok(ToggleResponse {
            purchased_status: true,
            message: None,
        }))
        .unwrap();
        pool.run();
        let view = engine.item(ItemId(1)).unwrap();
        assert!(view.item.purchased);
        assert!(!view.toggle_busy);
    }

    #[test]
    fn test_toggle_refused_while_delete_in_flight() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false)]);
        let (tx, reply) = held();
        api.push_action(reply);
        engine.request_delete(ItemId(1)).unwrap();

        let mut pool = LocalPool::new();
        let confirming = engine.clone();
        pool.spawner()
            .spawn_local(async move {
                let _ = confirming.confirm().await;
            })
            .unwrap();
        pool.run_until_stalled();

        let err = block_on(engine.toggle(ItemId(1))).unwrap_err();
        assert!(matches!(err, SyncError::Rejected(_)));
        assert_eq!(notes.last().unwrap().category, Category::Warning);
        assert_eq!(api.calls(), vec!["action /shopping/list/item/1/delete".to_string()]);

        tx.send(Ok(ActionResponse::default())).unwrap();
        pool.run();
        assert!(engine.is_empty());
    }

    #[test]
    fn test_toggle_reply_after_delete_is_ignored() {
        let (engine, api, _) = setup(vec![make_item(1, "Milk", false), make_item(2, "Tea", false)]);
        let (tx, reply) = held();
        api.push_toggle(reply);
        api.push_action(deleted());

        let mut pool = LocalPool::new();
        let toggler = engine.clone();
        pool.spawner()
            .spawn_local(async move {
                let _ = toggler.toggle(ItemId(1)).await;
            })
            .unwrap();
        pool.run_until_stalled();

        engine.request_delete(ItemId(1)).unwrap();
        block_on(engine.confirm()).unwrap();
        assert!(engine.item(ItemId(1)).is_none());

        tx.send(Ok(ToggleResponse {
            purchased_status: true,
            message: None,
        }))
        .unwrap();
        pool.run();
        assert!(engine.item(ItemId(1)).is_none());
        assert_eq!(engine.items().len(), 1);
    }

    // ---- add ----

    #[test]
    fn test_add_appends_canonical_item() {
        let (engine, api, notes) = setup(vec![make_item(1, "Eggs", true)]);
        api.push_add(Reply::Ready(Ok(serde_json::from_str::<AddItemResponse>(
            r#"{"success":true,"message":"Item \"Milk\" added!","item":{"id":42,"name":"Milk","purchased":false,"quantity":2,"measure":"L","added_by":{"name":"Ana","url":"/a.png"}}}"#,
        )
        .unwrap())));

        engine.update_form(|d| {
            d.name = "Milk".to_string();
            d.quantity = "2".to_string();
            d.measure = "L".to_string();
        });
        assert_eq!(block_on(engine.add()), Ok(ItemId(42)));

        assert_eq!(
            api.calls(),
            vec![r#"add 9 {"name":"Milk","quantity":2,"measure":"L"}"#.to_string()]
        );
        let items = engine.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().filter(|v| v.id() == ItemId(42)).count(), 1);
        assert_eq!(items[1].item.quantity_label().as_deref(), Some("(2 L)"));
        assert_eq!(engine.form(), AddForm::default());
        assert_eq!(engine.progress().total, 2);
        assert_eq!(engine.progress().rounded(), 50);
        assert_eq!(notes.last().unwrap().message, "Item \"Milk\" added!");
    }

    #[test]
    fn test_add_empty_name_sends_nothing() {
        let (engine, api, notes) = setup(vec![]);
        engine.update_form(|d| d.name = "   ".to_string());
        assert!(block_on(engine.add()).unwrap_err().is_validation());
        assert!(api.calls().is_empty());
        assert_eq!(notes.last().unwrap().category, Category::Warning);
        assert_eq!(notes.last().unwrap().message, "Please enter an item name.");
    }

    #[test]
    fn test_add_in_flight_drops_second() {
        let (engine, api, _) = setup(vec![]);
        let (tx, reply) = held();
        api.push_add(reply);
        engine.update_form(|d| d.name = "Milk".to_string());

        let mut pool = LocalPool::new();
        let first = engine.clone();
        pool.spawner()
            .spawn_local(async move {
                let _ = first.add().await;
            })
            .unwrap();
        pool.run_until_stalled();
        assert!(engine.form().busy);

        let err = block_on(engine.add()).unwrap_err();
        assert!(matches!(err, SyncError::Rejected(_)));
        assert_eq!(api.calls().len(), 1);

        tx.send(Ok(AddItemResponse {
            item: make_item(5, "Milk", false),
            message: None,
        }))
        .unwrap();
        pool.run();
        assert_eq!(engine.items().len(), 1);
        assert!(!engine.form().busy);
    }

    #[test]
    fn test_missing_list_id_only_disables_add() {
        let api = ScriptedApi::new();
        let notes = RecordingNotifier::new();
        let engine = ListSync::new(
            None,
            ListState::new(vec![make_item(1, "Milk", false)]),
            SyncConfig::default(),
            api.clone(),
            notes.clone(),
        );
        assert!(!engine.can_add());
        assert!(!engine.is_read_only());

        engine.update_form(|d| d.name = "Bread".to_string());
        let err = block_on(engine.add()).unwrap_err();
        assert!(matches!(err, SyncError::MissingPrecondition(_)));
        assert_eq!(notes.last().unwrap().message, "Error: list id missing. Please refresh.");
        assert!(api.calls().is_empty());

        api.push_toggle(toggled(true));
        assert_eq!(block_on(engine.toggle(ItemId(1))), Ok(true));
        assert!(engine.begin_edit(ItemId(1)));
        assert_eq!(api.calls(), vec!["toggle 1".to_string()]);
    }

    #[test]
    fn test_add_failure_keeps_form() {
        let (engine, api, notes) = setup(vec![]);
        api.push_add(Reply::Ready(Err(SyncError::Network("offline".to_string()))));
        engine.update_form(|d| d.name = "Bread".to_string());

        assert!(block_on(engine.add()).is_err());
        let form = engine.form();
        assert_eq!(form.draft.name, "Bread");
        assert!(!form.busy);
        assert!(engine.is_empty());
        assert_eq!(notes.last().unwrap().category, Category::Error);
    }

    #[test]
    fn test_add_duplicate_id_rejected() {
        let (engine, api, _) = setup(vec![make_item(42, "Milk", false)]);
        api.push_add(Reply::Ready(Ok(AddItemResponse {
            item: make_item(42, "Milk", false),
            message: None,
        })));
        engine.update_form(|d| d.name = "Milk".to_string());
        assert!(block_on(engine.add()).is_err());
        assert_eq!(engine.items().len(), 1);
        assert_eq!(engine.form().draft.name, "Milk");
    }

    // ---- rename ----

    #[test]
    fn test_rename_to_same_name_skips_network() {
        let (engine, api, _) = setup(vec![make_item(1, "Milk", false)]);
        assert!(engine.begin_edit(ItemId(1)));
        engine.set_draft(ItemId(1), "  Milk ");
        assert_eq!(block_on(engine.save_edit(ItemId(1))), Ok(None));
        assert!(api.calls().is_empty());
        assert!(!engine.item(ItemId(1)).unwrap().edit.is_editing());
    }

    #[test]
    fn test_rename_to_empty_stays_editing() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false)]);
        engine.begin_edit(ItemId(1));
        engine.set_draft(ItemId(1), "");
        assert!(block_on(engine.save_edit(ItemId(1))).unwrap_err().is_validation());
        assert!(api.calls().is_empty());
        let view = engine.item(ItemId(1)).unwrap();
        assert!(view.edit.is_editing());
        assert_eq!(view.edit.error(), Some("Item name cannot be empty."));
        assert!(notes.all().is_empty());
    }

    #[test]
    fn test_rename_uses_server_canonical_name() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false)]);
        api.push_rename(Reply::Ready(Ok(RenameResponse {
            new_name: "Oat Milk".to_string(),
            message: None,
        })));
        engine.begin_edit(ItemId(1));
        engine.set_draft(ItemId(1), "oat milk ");

        assert_eq!(block_on(engine.save_edit(ItemId(1))), Ok(Some("Oat Milk".to_string())));
        assert_eq!(api.calls(), vec!["rename 1 oat milk".to_string()]);
        let view = engine.item(ItemId(1)).unwrap();
        assert_eq!(view.item.name, "Oat Milk");
        assert!(!view.edit.is_editing());
        assert_eq!(notes.last().unwrap().message, "Item renamed to \"Oat Milk\".");
    }

    #[test]
    fn test_second_save_while_in_flight_is_noop() {
        let (engine, api, _) = setup(vec![make_item(1, "Milk", false)]);
        let (tx, reply) = held();
        api.push_rename(reply);
        engine.begin_edit(ItemId(1));
        engine.set_draft(ItemId(1), "Cream");

        let mut pool = LocalPool::new();
        let saver = engine.clone();
        pool.spawner()
            .spawn_local(async move {
                let _ = saver.save_edit(ItemId(1)).await;
            })
            .unwrap();
        pool.run_until_stalled();
        assert!(engine.item(ItemId(1)).unwrap().edit.is_saving());

        assert_eq!(block_on(engine.save_edit(ItemId(1))), Ok(None));
        assert_eq!(block_on(engine.blur_edit(ItemId(1))), Ok(None));
        assert!(!engine.begin_edit(ItemId(1)));
        assert_eq!(api.calls().len(), 1);

        tx.send(Ok(RenameResponse {
            new_name: "Cream".to_string(),
            message: None,
        }))
        .unwrap();
        pool.run();
        assert_eq!(engine.item(ItemId(1)).unwrap().item.name, "Cream");
    }

    #[test]
    fn test_saves_on_different_items_overlap() {
        let (engine, api, _) = setup(vec![make_item(1, "Milk", false), make_item(2, "Tea", false)]);
        let (tx1, r1) = held();
        let (tx2, r2) = held();
        api.push_rename(r1);
        api.push_rename(r2);

        let mut pool = LocalPool::new();
        for (id, name) in [(1, "Cream"), (2, "Coffee")] {
            engine.begin_edit(ItemId(id));
            engine.set_draft(ItemId(id), name);
            let saver = engine.clone();
            pool.spawner()
                .spawn_local(async move {
                    let _ = saver.save_edit(ItemId(id)).await;
                })
                .unwrap();
            pool.run_until_stalled();
        }
        assert_eq!(api.calls().len(), 2);

        tx2.send(Ok(RenameResponse { new_name: "Coffee".to_string(), message: None })).unwrap();
        tx1.send(Err(SyncError::Request { status: 403, message: Some("Forbidden".to_string()) })).unwrap();
        pool.run();

        assert_eq!(engine.item(ItemId(2)).unwrap().item.name, "Coffee");
        let first = engine.item(ItemId(1)).unwrap();
        assert_eq!(first.item.name, "Milk");
        assert!(first.edit.is_editing());
        assert_eq!(first.edit.error(), Some("Forbidden"));
        assert_eq!(first.edit.draft(), Some("Cream"));
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        let (engine, api, _) = setup(vec![make_item(1, "Milk", false)]);
        engine.begin_edit(ItemId(1));
        engine.set_draft(ItemId(1), "Juice");
        engine.cancel_edit(ItemId(1));
        assert_eq!(block_on(engine.blur_edit(ItemId(1))), Ok(None));
        assert!(api.calls().is_empty());
        assert_eq!(engine.item(ItemId(1)).unwrap().item.name, "Milk");
    }

    // ---- delete / gate ----

    #[test]
    fn test_delete_removes_only_target() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false), make_item(2, "Bread", false)]);
        api.push_action(deleted());
        engine.request_delete(ItemId(2)).unwrap();

        let DialogState::Open { action, busy } = engine.dialog() else {
            panic!("dialog should be open");
        };
        assert!(!busy);
        assert_eq!(action.body(), "Are you sure you want to delete the item 'Bread'?");
        assert_eq!(action.confirm_label(), "Delete Item");

        let outcome = block_on(engine.confirm()).unwrap();
        assert!(matches!(outcome, GateOutcome::Completed { redirect: None, .. }));
        let ids: Vec<ItemId> = engine.items().iter().map(ItemView::id).collect();
        assert_eq!(ids, vec![ItemId(1)]);
        assert_eq!(engine.dialog(), DialogState::Closed);
        assert_eq!(notes.last().unwrap().message, "\"Bread\" deleted.");
    }

    #[test]
    fn test_delete_of_unlisted_item_is_reported() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false)]);
        assert!(matches!(engine.request_delete(ItemId(7)), Err(SyncError::Rejected(_))));
        assert_eq!(engine.dialog(), DialogState::Closed);
        assert_eq!(notes.last().unwrap().category, Category::Error);
        assert_eq!(
            notes.last().unwrap().message,
            "Could not perform action: item details missing."
        );
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_cancel_dialog_clears_context() {
        let (engine, api, _) = setup(vec![make_item(1, "Milk", false)]);
        engine.request_delete(ItemId(1)).unwrap();
        assert!(engine.dismiss());
        assert_eq!(engine.dialog(), DialogState::Closed);
        assert_eq!(block_on(engine.confirm()), Ok(GateOutcome::Ignored));
        assert!(api.calls().is_empty());
        assert_eq!(engine.items().len(), 1);
    }

    #[test]
    fn test_failed_delete_keeps_item_and_dialog() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false)]);
        api.push_action(Reply::Ready(Err(SyncError::Request {
            status: 500,
            message: Some("Error deleting item.".to_string()),
        })));
        engine.request_delete(ItemId(1)).unwrap();

        let outcome = block_on(engine.confirm()).unwrap();
        assert!(matches!(outcome, GateOutcome::Failed { .. }));
        assert!(matches!(engine.dialog(), DialogState::Open { busy: false, .. }));
        assert!(!engine.item(ItemId(1)).unwrap().delete_pending);
        assert_eq!(notes.last().unwrap().message, "Error deleting item.");
    }

    #[test]
    fn test_external_observer_sees_completion() {
        let (engine, api, _) = setup(vec![make_item(1, "Milk", false)]);
        api.push_action(deleted());
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        engine.on_action_completed(move |event| *sink.borrow_mut() = event.target);

        engine.request_delete(ItemId(1)).unwrap();
        block_on(engine.confirm()).unwrap();
        assert_eq!(*seen.borrow(), Some(ItemId(1)));
    }

    // ---- scenario ----

    #[test]
    fn test_progress_scenario() {
        let (engine, api, _) = setup(vec![
            make_item(1, "Milk", true),
            make_item(2, "Eggs", false),
            make_item(3, "Bread", false),
        ]);
        assert_eq!(engine.progress().label(), "33%");

        api.push_toggle(toggled(true));
        block_on(engine.toggle(ItemId(2))).unwrap();
        assert_eq!(engine.progress().label(), "67%");

        api.push_action(deleted());
        engine.request_delete(ItemId(3)).unwrap();
        block_on(engine.confirm()).unwrap();

        let progress = engine.progress();
        assert_eq!(progress.total, 2);
        assert_eq!(progress.label(), "100%");
        assert!(!progress.segments(4).gap_visible);
    }

    // ---- read-only ----

    #[test]
    fn test_read_only_refuses_mutations() {
        let (engine, api, notes) = setup(vec![make_item(1, "Milk", false)]);
        engine.set_read_only(SyncError::MissingPrecondition("CSRF token missing".to_string()));
        assert_eq!(notes.all().len(), 1);
        assert_eq!(notes.last().unwrap().message, "Error: CSRF token missing. Please refresh.");

        assert!(matches!(block_on(engine.toggle(ItemId(1))), Err(SyncError::MissingPrecondition(_))));
        assert!(!engine.begin_edit(ItemId(1)));
        assert!(engine.request_delete(ItemId(1)).is_err());
        assert!(api.calls().is_empty());
        assert_eq!(notes.all().len(), 1);
    }

    #[test]
    fn test_listeners_fire_on_change() {
        let (engine, _, _) = setup(vec![make_item(1, "Milk", false)]);
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        engine.subscribe(move || *counter.borrow_mut() += 1);
        engine.begin_edit(ItemId(1));
        engine.cancel_edit(ItemId(1));
        assert_eq!(*hits.borrow(), 2);
    }
}
