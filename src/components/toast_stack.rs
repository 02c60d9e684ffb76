//! Toast Stack Component
//!
//! Renders the notification queue. Identical messages stack.

use leptos::prelude::*;
use shoplist_sync::ToastEntry;

use crate::store::{store_dismiss_toast, use_view_store, ViewStateStoreFields};

#[component]
pub fn ToastStack() -> impl IntoView {
    let store = use_view_store();

    let entries = move || store.toasts().with(|q| q.active().to_vec());

    view! {
        <div class="toast-container position-fixed bottom-0 end-0 p-3">
            <For
                each=entries
                key=|entry: &ToastEntry| entry.id
                children=move |entry: ToastEntry| {
                    let id = entry.id;
                    let category = entry.notification.category;
                    let class = format!(
                        "toast show border-0 bg-{} {}",
                        category.css_suffix(),
                        category.text_class(),
                    );
                    let close_class = if category.text_class() == "text-white" {
                        "btn-close btn-close-white"
                    } else {
                        "btn-close"
                    };
                    let title = entry.notification.title().to_string();
                    let message = entry.notification.message;
                    view! {
                        <div class=class role="alert" aria-live="assertive" aria-atomic="true" data-category=category.as_str()>
                            <div class="toast-header">
                                <strong class="me-auto toast-title">{title}</strong>
                                <small class="toast-timestamp">"Just now"</small>
                                <button
                                    type="button"
                                    class=close_class
                                    aria-label="Close"
                                    on:click=move |_| store_dismiss_toast(&store, id)
                                ></button>
                            </div>
                            <div class="toast-body">{message}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
