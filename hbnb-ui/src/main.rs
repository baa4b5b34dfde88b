//! HBnB Pages
//!
//! Browser front end for the HBnB listings API built with Leptos (WASM).
//!
//! # Pages
//!
//! - `index.html`: places list with a client-side price filter
//! - `login.html`: email/password login storing the `token` cookie
//! - `place.html?id=...`: place details, reviews and the add-review form
//!
//! Every page draws the ambient shadow animation on a full-window canvas
//! behind its content.
//!
//! # Architecture
//!
//! Page behaviour lives in `hbnb::controller`; components here only collect
//! input, hand it to a per-page controller and apply the returned paints to
//! signals.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
