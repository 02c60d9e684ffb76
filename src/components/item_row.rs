//! Item Row Component
//!
//! One list entry: inline-editable name, quantity, adder, and the
//! toggle / edit / delete controls.

use gloo_timers::future::TimeoutFuture;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shoplist_sync::models::DEFAULT_AVATAR_URL;
use shoplist_sync::{ItemId, ItemView};

use crate::context::use_app_context;
use crate::store::{store_item, use_view_store, ViewStateStoreFields};

/// Select and focus the edit input once it is visible
fn focus_input(input_ref: NodeRef<Input>) {
    request_animation_frame(move || {
        if let Some(input) = input_ref.get() {
            input.select();
            let _ = input.focus();
        }
    });
}

fn has_focus(input_ref: NodeRef<Input>) -> bool {
    let Some(input) = input_ref.get() else {
        return false;
    };
    let element: &web_sys::Element = input.as_ref();
    document().active_element().as_ref() == Some(element)
}

/// A single item row in the list
#[component]
pub fn ItemRow(id: ItemId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_view_store();
    let (styles, blur_grace_ms, edit_url) = {
        let engine = ctx.engine();
        let config = engine.config();
        (config.toggle_styles.clone(), config.blur_grace_ms, engine.routes().edit_item(id))
    };

    let input_ref = NodeRef::<Input>::new();

    let row = Memo::new(move |_| store_item(&store, id));
    let read = move |f: fn(&ItemView) -> bool| move || row.with(|v| v.as_ref().is_some_and(f));
    let purchased = read(|v| v.item.purchased);
    let editing = read(|v| !matches!(v.edit, shoplist_sync::EditState::Display));
    let saving = read(|v| v.edit.is_saving());
    let toggle_busy = read(|v| v.toggle_busy);
    let delete_pending = read(|v| v.delete_pending);
    let read_only = move || store.read_only().get();

    let name = move || row.with(|v| v.as_ref().map(|v| v.item.name.clone()).unwrap_or_default());
    let draft = move || {
        row.with(|v| {
            v.as_ref()
                .and_then(|v| v.edit.draft().map(str::to_string))
                .unwrap_or_default()
        })
    };
    let edit_error = move || row.with(|v| v.as_ref().and_then(|v| v.edit.error().map(str::to_string)));
    let quantity = move || row.with(|v| v.as_ref().and_then(|v| v.item.quantity_label()));
    let adder = move || {
        row.with(|v| {
            v.as_ref()
                .map(|v| (v.item.added_by.name.clone(), v.item.added_by.avatar().to_string()))
                .unwrap_or_else(|| ("N/A".to_string(), DEFAULT_AVATAR_URL.to_string()))
        })
    };

    // Rename
    let save = move || {
        let engine = ctx.engine();
        spawn_local(async move {
            if engine.save_edit(id).await.is_err()
                && engine.item(id).is_some_and(|v| v.edit.is_editing())
            {
                focus_input(input_ref);
            }
        });
    };

    let on_name_click = move |_| {
        if ctx.engine().begin_edit(id) {
            focus_input(input_ref);
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            save();
        }
        "Escape" => ctx.engine().cancel_edit(id),
        _ => {}
    };

    let on_blur = move |_| {
        let engine = ctx.engine();
        spawn_local(async move {
            TimeoutFuture::new(blur_grace_ms).await;
            if has_focus(input_ref) {
                return;
            }
            if engine.blur_edit(id).await.is_err()
                && engine.item(id).is_some_and(|v| v.edit.is_editing())
            {
                focus_input(input_ref);
            }
        });
    };

    // Toggle
    let on_toggle = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let engine = ctx.engine();
        spawn_local(async move {
            let _ = engine.toggle(id).await;
        });
    };

    let toggle_class = {
        let styles = styles.clone();
        move || format!("btn btn-sm {} toggle-purchase-btn me-1 mb-1 mb-md-0", styles.class(purchased()))
    };
    let toggle_content = move || {
        if toggle_busy() {
            view! { <span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span> }
                .into_any()
        } else {
            let done = purchased();
            let icon = format!("bi {}", styles.icon(done));
            let label = format!(" {}", styles.label(done));
            view! {
                <i class=icon></i>
                <span class="d-none d-md-inline">{label}</span>
            }
            .into_any()
        }
    };

    view! {
        <li
            class=move || if purchased() { "list-group-item item-row item-purchased" } else { "list-group-item item-row" }
            data-item-id=id.to_string()
        >
            <div class="row w-100 align-items-center gy-2">
                <div class="col-md-5 col-12 item-name-column">
                    <div class=move || if editing() { "item-name-line d-none" } else { "item-name-line" }>
                        <span
                            class=move || if purchased() { "item-name editable text-decoration-line-through" } else { "item-name editable" }
                            style="cursor: pointer;"
                            on:click=on_name_click
                        >
                            {name}
                        </span>
                    </div>
                    <input
                        type="text"
                        node_ref=input_ref
                        class=move || if editing() { "form-control item-edit-input" } else { "form-control item-edit-input d-none" }
                        prop:value=draft
                        prop:disabled=saving
                        on:input=move |ev| ctx.engine().set_draft(id, &event_target_value(&ev))
                        on:keydown=on_keydown
                        on:blur=on_blur
                    />
                    <small class="item-details-text d-block mt-1">
                        "Added by: "
                        <span class="added-by-pill bg-secondary">
                            <img src=move || adder().1 class="profile-pic-thumb" alt=move || format!("{}'s profile picture", adder().0) />
                            <span class="added-by-name">{move || adder().0}</span>
                        </span>
                    </small>
                    <Show when=move || edit_error().is_some()>
                        <div class="edit-error text-danger mt-1 w-100">{move || edit_error().unwrap_or_default()}</div>
                    </Show>
                </div>
                <div class="col-md-3 col-6 item-quantity-column">
                    {move || match quantity() {
                        Some(label) => view! { <span class="item-quantity-measure">{label}</span> }.into_any(),
                        None => view! { <span class="item-quantity-measure text-muted">"-"</span> }.into_any(),
                    }}
                </div>
                <div class="col-md-4 col-6 item-actions-column">
                    <a href=edit_url class="btn btn-sm btn-outline-secondary me-1 mb-1 mb-md-0">
                        <i class="bi bi-pencil-square"></i>
                        <span class="d-none d-md-inline">" Edit"</span>
                    </a>
                    <button
                        type="button"
                        class=toggle_class
                        prop:disabled=move || toggle_busy() || delete_pending() || read_only()
                        on:click=on_toggle
                    >
                        {toggle_content}
                    </button>
                    <button
                        type="button"
                        class="btn btn-sm btn-outline-danger delete-item-btn mb-1 mb-md-0"
                        prop:disabled=move || delete_pending() || read_only()
                        on:click=move |_| {
                            if let Err(err) = ctx.engine().request_delete(id) {
                                log::warn!("delete of item {id} not started: {err}");
                            }
                        }
                    >
                        <i class="bi bi-trash"></i>
                        <span class="d-none d-md-inline">" Delete"</span>
                    </button>
                </div>
            </div>
        </li>
    }
}
