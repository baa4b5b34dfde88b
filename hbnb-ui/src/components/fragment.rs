//! Fragment Component
//!
//! Builds Leptos elements from the controller's rendered fragments.

use leptos::html::{custom, Custom};
use leptos::*;

use hbnb::render::{Fragment, Node};

/// Element tree for one fragment; text and attribute values are set through
/// the DOM, never parsed as markup
pub fn fragment_view(fragment: &Fragment) -> View {
    let mut el = custom(Custom::new(fragment.tag()));
    for (name, value) in fragment.attrs() {
        el = el.attr(name.to_string(), value.to_string());
    }
    for node in fragment.nodes() {
        el = match node {
            Node::Element(child) => el.child(fragment_view(child)),
            Node::Text(text) => el.child(text.clone()),
        };
    }
    el.into_view()
}

/// A list of fragments that re-renders when the signal changes
#[component]
pub fn Fragments(#[prop(into)] items: Signal<Vec<Fragment>>) -> impl IntoView {
    move || items.with(|items| items.iter().map(fragment_view).collect_view())
}
