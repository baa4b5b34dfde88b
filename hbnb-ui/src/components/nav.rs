//! Navigation Component
//!
//! Header with the logo and the login link.

use leptos::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <header>
            <nav class="nav">
                <a href="index.html" class="logo-link">
                    <img src="images/logo.png" alt="HBnB" class="logo" />
                </a>
                <a
                    href="login.html"
                    id="login-link"
                    class="login-button"
                    style:display=move || {
                        if state.login_link_visible.get() { "block" } else { "none" }
                    }
                >
                    "Login"
                </a>
            </nav>
        </header>
    }
}
