//! Shopping List App
//!
//! Wires the engine to the page: bootstrap, context, store sync, layout.

use leptos::prelude::*;
use reactive_stores::Store;
use shoplist_sync::{ListState, ListSync, Notification, Notifier, Routes, SyncConfig};

use crate::commands::HttpListApi;
use crate::components::{ConfirmModal, ItemList, NewItemForm, ProgressHeader, ToastStack};
use crate::context::{AppContext, Engine};
use crate::notifier::ToastNotifier;
use crate::page;
use crate::store::{store_sync, ViewState};

fn build_engine(config: SyncConfig, notifier: ToastNotifier) -> Engine {
    let routes = Routes::new(&config.base_path);
    let boot = page::read_bootstrap();

    if let Some(err) = &boot.items_error {
        log::error!("page items: {err}");
        notifier.notify(Notification::error(err.user_message("")).with_duration(0));
    }
    let csrf_error = boot.csrf_error();
    let list_id_error = boot.list_id_error();

    let api = HttpListApi::new(routes, boot.csrf_token.unwrap_or_default());
    let engine = ListSync::new(boot.list_id, ListState::new(boot.items), config, api, notifier);
    log::info!("list {:?} loaded with {} items", boot.list_id, engine.items().len());

    match (csrf_error, list_id_error) {
        (Some(err), _) => engine.set_read_only(err),
        (None, Some(err)) => {
            log::error!("adding disabled: {err}");
            notifier.notify(Notification::error(err.user_message("")).with_duration(0));
        }
        (None, None) => {}
    }
    engine
}

#[component]
pub fn App() -> impl IntoView {
    let config = page::read_config();
    let store = Store::new(ViewState::new(config.toast_duration_ms));
    provide_context(store);

    let engine = build_engine(config, ToastNotifier::new(store));
    let ctx = AppContext::new(engine.clone());
    provide_context(ctx);

    engine.subscribe(move || {
        if let Some(engine) = ctx.try_engine() {
            store_sync(&store, &engine);
        }
    });
    store_sync(&store, &engine);

    let list_name = page::read_list_name();

    view! {
        <div class="container py-4 shopping-list-page">
            <ProgressHeader title=list_name />
            <NewItemForm />
            <div class="card">
                <ItemList />
            </div>
        </div>
        <ConfirmModal />
        <ToastStack />
    }
}
