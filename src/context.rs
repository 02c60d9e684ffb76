//! Application Context
//!
//! Shared engine handle provided via Leptos Context API.

use leptos::prelude::*;
use shoplist_sync::ListSync;

use crate::commands::HttpListApi;
use crate::notifier::ToastNotifier;

/// The engine as wired for the browser
pub type Engine = ListSync<HttpListApi, ToastNotifier>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Engine lives in the local arena; it is `!Send`
    engine: StoredValue<Engine, LocalStorage>,
}

impl AppContext {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: StoredValue::new_local(engine),
        }
    }

    /// Cheap clone of the engine handle for event handlers and tasks
    pub fn engine(&self) -> Engine {
        self.engine.get_value()
    }

    /// Like [`Self::engine`] but `None` once the owner is disposed
    pub fn try_engine(&self) -> Option<Engine> {
        self.engine.try_get_value()
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
