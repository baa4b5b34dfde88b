//! Notice Region
//!
//! Shows success and error messages. Notices raised while this component is
//! not mounted are dropped.

use leptos::*;

use crate::state::global::GlobalState;

/// Notice container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    state.notice_region.set(true);
    on_cleanup(move || state.notice_region.set(false));

    view! {
        <div class="notices" role="status">
            {move || {
                state.success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success />
                })
            }}

            {move || {
                state.error.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Error />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
) -> impl IntoView {
    let (icon, class) = match variant {
        ToastVariant::Success => ("✓", "notice success-message"),
        ToastVariant::Error => ("✕", "notice error-message"),
    };

    view! {
        <div class=class>
            <span class="notice-icon">{icon}</span>
            <span class="notice-text">{message}</span>
        </div>
    }
}
