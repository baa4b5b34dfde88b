//! Index Page
//!
//! Places list with the price filter.

use leptos::*;

use hbnb::controller::{PageElements, PriceFilter};

use crate::components::Fragments;
use crate::state::{page_controller, GlobalState, PageView};

#[component]
pub fn IndexPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let page = PageView::new();
    let controller = page_controller();

    // Fetch places on mount
    let ctl = controller.clone();
    create_effect(move |_| {
        let ctl = ctl.clone();
        let elements = PageElements {
            error_region: state.notice_region.get_untracked(),
            ..PageElements::index()
        };
        spawn_local(async move {
            let paints = ctl.load(elements, None).await;
            page.apply(&state, paints);
        });
    });

    let on_filter = move |ev: ev::Event| match event_target_value(&ev).parse::<PriceFilter>() {
        Ok(filter) => page.apply(&state, controller.set_price_filter(filter)),
        Err(e) => web_sys::console::warn_1(&e.to_string().into()),
    };

    view! {
        <main>
            <section id="filter">
                <label for="price-filter">"Max price:"</label>
                <select id="price-filter" on:change=on_filter>
                    {move || {
                        page.price_options
                            .get()
                            .into_iter()
                            .map(|option| {
                                let label = option.to_string();
                                view! { <option value=label.clone()>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </section>

            <section id="places-list">
                <Fragments items=page.places />
            </section>
        </main>
    }
}
