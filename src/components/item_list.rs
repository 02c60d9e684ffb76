//! Item List Component
//!
//! Keyed list of rows with an empty-list placeholder.

use leptos::prelude::*;
use shoplist_sync::ItemId;

use super::ItemRow;
use crate::store::{use_view_store, ViewStateStoreFields};

#[component]
pub fn ItemList() -> impl IntoView {
    let store = use_view_store();

    let ids = move || {
        store
            .items()
            .with(|items| items.iter().map(|v| v.id()).collect::<Vec<ItemId>>())
    };
    let is_empty = move || store.items().with(|items| items.is_empty());

    view! {
        <ul id="itemList" class="list-group list-group-flush">
            <For
                each=ids
                key=|id| *id
                children=move |id| view! { <ItemRow id=id /> }
            />
        </ul>
        <p
            id="emptyListPlaceholder"
            class=move || if is_empty() { "text-muted text-center py-3" } else { "text-muted text-center py-3 d-none" }
        >
            "This shopping list is empty. Add some items!"
        </p>
    }
}
