//! Place Page
//!
//! Place details, its reviews and the add-review form. The place comes from
//! the `id` query parameter.

use leptos::*;
use leptos_router::use_query_map;

use hbnb::controller::PageElements;
use hbnb::models::{MAX_RATING, MIN_RATING};

use crate::components::Fragments;
use crate::state::{page_controller, GlobalState, PageView};

/// Rating select value; anything unparsable is sent on as 0 and rejected by
/// validation
fn parse_rating(value: &str) -> u8 {
    value.trim().parse().unwrap_or(0)
}

#[component]
pub fn PlacePage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let page = PageView::new();
    let controller = page_controller();
    let query = use_query_map();
    let (submitting, set_submitting) = create_signal(false);

    let ctl = controller.clone();
    create_effect(move |_| {
        let ctl = ctl.clone();
        let place_id = query.with_untracked(|q| q.get("id").cloned());
        let elements = PageElements {
            error_region: state.notice_region.get_untracked(),
            ..PageElements::place()
        };
        spawn_local(async move {
            let paints = ctl.load(elements, place_id.as_deref()).await;
            page.apply(&state, paints);
        });
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.clear_notices();
        set_submitting.set(true);

        let ctl = controller.clone();
        let text = page.review_text.get_untracked();
        let rating = parse_rating(&page.review_rating.get_untracked());
        spawn_local(async move {
            let paints = ctl.submit_review(&text, rating).await;
            page.apply(&state, paints);
            set_submitting.set(false);
        });
    };

    view! {
        <main>
            <section id="place-details">
                <Fragments items=page.details />
            </section>

            <section id="reviews">
                <h2>"Reviews"</h2>
                <div id="reviews-list">
                    <Fragments items=page.reviews />
                </div>
            </section>

            <section
                id="add-review"
                style:display=move || if page.review_form_visible.get() { "block" } else { "none" }
            >
                <h2>"Add a Review"</h2>
                <form id="review-form" class="form" on:submit=on_submit>
                    <label for="review-text">"Your review"</label>
                    <textarea
                        id="review-text"
                        name="review-text"
                        required
                        prop:value=move || page.review_text.get()
                        on:input=move |ev| page.review_text.set(event_target_value(&ev))
                    />

                    <label for="rating">"Rating"</label>
                    <select
                        id="rating"
                        name="rating"
                        prop:value=move || page.review_rating.get()
                        on:change=move |ev| page.review_rating.set(event_target_value(&ev))
                    >
                        <option value="">"Select a rating"</option>
                        {(MIN_RATING..=MAX_RATING)
                            .map(|n| view! { <option value=n.to_string()>{n}</option> })
                            .collect_view()}
                    </select>

                    <button type="submit" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Submitting..." } else { "Submit Review" }}
                    </button>
                </form>
            </section>
        </main>
    }
}
