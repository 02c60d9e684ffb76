//! Toast Notifier
//!
//! Pushes notifications into the view store and schedules their removal.
//! Falls back to a blocking alert when the store is gone.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use shoplist_sync::{Notification, Notifier};

use crate::store::{store_dismiss_toast, ViewState, ViewStateStoreFields};

#[derive(Clone, Copy)]
pub struct ToastNotifier {
    store: Store<ViewState>,
}

impl ToastNotifier {
    pub fn new(store: Store<ViewState>) -> Self {
        Self { store }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let store = self.store;
        let pushed = store
            .toasts()
            .try_update(|queue| queue.push(notification.clone()));

        let Some(entry) = pushed else {
            log::warn!("toast host unavailable, alerting instead");
            if let Some(win) = web_sys::window() {
                let _ = win.alert_with_message(&notification.alert_text());
            }
            return;
        };

        if entry.duration_ms > 0 {
            spawn_local(async move {
                TimeoutFuture::new(entry.duration_ms).await;
                store_dismiss_toast(&store, entry.id);
            });
        }
    }
}
