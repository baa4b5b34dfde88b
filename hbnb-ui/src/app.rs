//! App Root Component
//!
//! Layout, routing and global providers. Pages are served as separate HTML
//! files, so each path maps to one page component.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, ShadowCanvas, Toast};
use crate::pages::{IndexPage, LoginPage, PlacePage};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <ShadowCanvas />

            <Nav />

            // Notices
            <Toast />

            <Routes>
                <Route path="/" view=IndexPage />
                <Route path="/index.html" view=IndexPage />
                <Route path="/login.html" view=LoginPage />
                <Route path="/place.html" view=PlacePage />
                <Route path="/*any" view=NotFound />
            </Routes>

            <footer>
                <p>"© HBnB"</p>
            </footer>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <main class="not-found">
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <a href="index.html" class="details-button">"Back to places"</a>
        </main>
    }
}
