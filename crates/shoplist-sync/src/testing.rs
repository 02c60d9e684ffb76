//! Test doubles: a scripted transport and a recording notifier.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::api::ListApi;
use crate::error::SyncError;
use crate::models::{
    ActionResponse, AddItemResponse, Item, ItemId, NewItem, RenameResponse, ToggleResponse,
};
use crate::notify::{Category, Notification, Notifier};

pub fn make_item(id: u64, name: &str, purchased: bool) -> Item {
    Item {
        id: ItemId(id),
        name: name.to_string(),
        purchased,
        quantity: None,
        measure: None,
        added_by: Default::default(),
    }
}

/// A reply available immediately, or one the test releases later
pub enum Reply<T> {
    Ready(Result<T, SyncError>),
    Held(oneshot::Receiver<Result<T, SyncError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, SyncError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Held(rx) => rx
                .await
                .unwrap_or_else(|_| Err(SyncError::Network("reply dropped".to_string()))),
        }
    }
}

/// Hold a reply open; send on the returned sender to release it.
pub fn held<T>() -> (oneshot::Sender<Result<T, SyncError>>, Reply<T>) {
    let (tx, rx) = oneshot::channel();
    (tx, Reply::Held(rx))
}

#[derive(Default)]
pub struct ScriptedApi {
    toggles: RefCell<VecDeque<Reply<ToggleResponse>>>,
    adds: RefCell<VecDeque<Reply<AddItemResponse>>>,
    renames: RefCell<VecDeque<Reply<RenameResponse>>>,
    actions: RefCell<VecDeque<Reply<ActionResponse>>>,
    calls: RefCell<Vec<String>>,
}

fn unscripted<T>() -> Reply<T> {
    Reply::Ready(Err(SyncError::Network("no scripted reply".to_string())))
}

impl ScriptedApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push_toggle(&self, reply: Reply<ToggleResponse>) {
        self.toggles.borrow_mut().push_back(reply);
    }

    pub fn push_add(&self, reply: Reply<AddItemResponse>) {
        self.adds.borrow_mut().push_back(reply);
    }

    pub fn push_rename(&self, reply: Reply<RenameResponse>) {
        self.renames.borrow_mut().push_back(reply);
    }

    pub fn push_action(&self, reply: Reply<ActionResponse>) {
        self.actions.borrow_mut().push_back(reply);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl ListApi for ScriptedApi {
    async fn toggle_purchase(&self, id: ItemId) -> Result<ToggleResponse, SyncError> {
        self.record(format!("toggle {id}"));
        let reply = self.toggles.borrow_mut().pop_front().unwrap_or_else(unscripted);
        reply.resolve().await
    }

    async fn add_item(&self, list_id: u64, item: &NewItem) -> Result<AddItemResponse, SyncError> {
        self.record(format!("add {list_id} {}", serde_json::to_string(item).unwrap()));
        let reply = self.adds.borrow_mut().pop_front().unwrap_or_else(unscripted);
        reply.resolve().await
    }

    async fn rename_item(&self, id: ItemId, new_name: &str) -> Result<RenameResponse, SyncError> {
        self.record(format!("rename {id} {new_name}"));
        let reply = self.renames.borrow_mut().pop_front().unwrap_or_else(unscripted);
        reply.resolve().await
    }

    async fn post_action(&self, url: &str) -> Result<ActionResponse, SyncError> {
        self.record(format!("action {url}"));
        let reply = self.actions.borrow_mut().pop_front().unwrap_or_else(unscripted);
        reply.resolve().await
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.borrow().last().cloned()
    }

    pub fn count(&self, category: Category) -> usize {
        self.seen.borrow().iter().filter(|n| n.category == category).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}
