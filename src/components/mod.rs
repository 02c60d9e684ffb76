//! UI Components
//!
//! Leptos components rendering the engine's view store.

mod confirm_modal;
mod item_list;
mod item_row;
mod new_item_form;
mod progress_header;
mod toast_stack;

pub use confirm_modal::ConfirmModal;
pub use item_list::ItemList;
pub use item_row::ItemRow;
pub use new_item_form::NewItemForm;
pub use progress_header::ProgressHeader;
pub use toast_stack::ToastStack;
