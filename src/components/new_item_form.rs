//! New Item Form Component
//!
//! Name / quantity / measure inputs posting through the add orchestrator.

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{use_view_store, ViewStateStoreFields};

/// Form for adding an item to the current list
#[component]
pub fn NewItemForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_view_store();
    let name_ref = NodeRef::<Input>::new();

    let busy = move || store.form().with(|f| f.busy);
    let can_add = move || store.can_add().get();

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let engine = ctx.engine();
        spawn_local(async move {
            if let Err(err) = engine.add().await {
                if err.is_validation() {
                    if let Some(input) = name_ref.get() {
                        let _ = input.focus();
                    }
                }
            }
        });
    };

    view! {
        <form id="addItemForm" class="new-item-form mb-4" on:submit=add_item novalidate=true>
            <div class="row g-2 align-items-end">
                <div class="col-md-5 col-12">
                    <label for="itemName" class="form-label">"Item Name"</label>
                    <input
                        id="itemName"
                        type="text"
                        class="form-control"
                        placeholder="e.g. Milk"
                        node_ref=name_ref
                        prop:value=move || store.form().with(|f| f.draft.name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            ctx.engine().update_form(|draft| draft.name = value);
                        }
                    />
                </div>
                <div class="col-md-2 col-6">
                    <label for="itemQuantity" class="form-label">"Quantity"</label>
                    <input
                        id="itemQuantity"
                        type="number"
                        min="1"
                        class="form-control"
                        prop:value=move || store.form().with(|f| f.draft.quantity.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            ctx.engine().update_form(|draft| draft.quantity = value);
                        }
                    />
                </div>
                <div class="col-md-2 col-6">
                    <label for="itemMeasure" class="form-label">"Measure"</label>
                    <input
                        id="itemMeasure"
                        type="text"
                        maxlength="10"
                        class="form-control"
                        placeholder="e.g. kg"
                        prop:value=move || store.form().with(|f| f.draft.measure.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            ctx.engine().update_form(|draft| draft.measure = value);
                        }
                    />
                </div>
                <div class="col-md-3 col-12 d-grid">
                    <button
                        type="submit"
                        class="btn btn-primary"
                        prop:disabled=move || busy() || !can_add()
                    >
                        {move || {
                            if busy() {
                                view! {
                                    <span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span>
                                    " Adding..."
                                }
                                    .into_any()
                            } else {
                                view! { <i class="bi bi-plus-circle"></i> " Add Item" }.into_any()
                            }
                        }}
                    </button>
                </div>
            </div>
        </form>
    }
}
