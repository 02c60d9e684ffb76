//! Progress Header Component
//!
//! Three-segment purchased/remaining track with a percentage label.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_view_store, ViewStateStoreFields};

fn segment_style(basis: &str) -> String {
    format!("width: {basis}; flex-basis: {basis};")
}

#[component]
pub fn ProgressHeader(#[prop(into)] title: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_view_store();
    let gap_px = ctx.engine().config().gap_width_px;

    let snapshot = move || store.progress().get();
    let segments = Memo::new(move |_| snapshot().segments(gap_px));

    view! {
        <div class="list-header mb-3">
            <h2 class="h4 mb-2">{title}</h2>
            <div class="d-flex align-items-center gap-2">
                <div
                    class="custom-progress-track flex-grow-1"
                    role="progressbar"
                    aria-label="Purchased items"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow=move || snapshot().rounded().to_string()
                >
                    <div
                        class="custom-progress-filled"
                        style=move || segments.with(|s| segment_style(&s.filled_basis))
                    ></div>
                    <div
                        class="custom-progress-gap"
                        style=move || {
                            segments
                                .with(|s| {
                                    if s.gap_visible {
                                        format!("display: block; {}", segment_style(&s.gap_basis))
                                    } else {
                                        "display: none;".to_string()
                                    }
                                })
                        }
                    ></div>
                    <div
                        class=move || {
                            if segments.with(|s| s.unfilled_empty) {
                                "custom-progress-unfilled is-empty"
                            } else {
                                "custom-progress-unfilled"
                            }
                        }
                        style=move || segments.with(|s| segment_style(&s.unfilled_basis))
                    ></div>
                </div>
                <span id="progressPercentageLabel" class="small text-muted">
                    {move || snapshot().label()}
                </span>
            </div>
            <small class="text-muted">
                {move || {
                    let s = snapshot();
                    format!("{} of {} purchased", s.purchased, s.total)
                }}
            </small>
        </div>
    }
}
