//! Confirm Modal Component
//!
//! Single shared confirmation dialog. Content comes from the pending
//! action; the confirm button posts it and may redirect afterwards.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shoplist_sync::{DialogState, GateOutcome, PendingAction};

use crate::context::use_app_context;
use crate::store::{use_view_store, ViewStateStoreFields};

fn navigate(url: &str) {
    if let Some(win) = web_sys::window() {
        if let Err(err) = win.location().set_href(url) {
            log::error!("redirect to {url} failed: {err:?}");
        }
    }
}

#[component]
pub fn ConfirmModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_view_store();

    let action = move || {
        store.dialog().with(|d| match d {
            DialogState::Open { action, .. } => Some(action.clone()),
            DialogState::Closed => None,
        })
    };
    let is_open = move || store.dialog().with(|d| matches!(d, DialogState::Open { .. }));
    let busy = move || store.dialog().with(|d| matches!(d, DialogState::Open { busy: true, .. }));
    let text = move |f: fn(&PendingAction) -> &str| {
        move || action().map(|a| f(&a).to_string()).unwrap_or_default()
    };

    let on_confirm = move |_| {
        let engine = ctx.engine();
        let delay = engine.config().redirect_delay_ms;
        spawn_local(async move {
            if let Ok(GateOutcome::Completed {
                redirect: Some(url),
                ..
            }) = engine.confirm().await
            {
                TimeoutFuture::new(delay).await;
                navigate(&url);
            }
        });
    };

    let on_dismiss = move |_| {
        ctx.engine().dismiss();
    };

    view! {
        <div
            id="confirmationModal"
            class=move || if is_open() { "modal fade show d-block" } else { "modal fade" }
            tabindex="-1"
            role="dialog"
            aria-labelledby="confirmationModalLabel"
            aria-hidden=move || (!is_open()).to_string()
        >
            <div class="modal-dialog modal-dialog-centered">
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title" id="confirmationModalLabel">{text(PendingAction::title)}</h5>
                        <button
                            type="button"
                            class="btn-close"
                            aria-label="Close"
                            prop:disabled=busy
                            on:click=on_dismiss
                        ></button>
                    </div>
                    <div class="modal-body">{text(PendingAction::body)}</div>
                    <div class="modal-footer">
                        <button
                            type="button"
                            class="btn btn-secondary"
                            prop:disabled=busy
                            on:click=on_dismiss
                        >
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            id="confirmActionButton"
                            class=move || format!("btn {}", text(PendingAction::confirm_style)())
                            prop:disabled=busy
                            on:click=on_confirm
                        >
                            {move || {
                                if busy() {
                                    view! {
                                        <span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span>
                                        " Processing..."
                                    }
                                        .into_any()
                                } else {
                                    text(PendingAction::confirm_label)().into_any()
                                }
                            }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
        <Show when=is_open>
            <div class="modal-backdrop fade show"></div>
        </Show>
    }
}
