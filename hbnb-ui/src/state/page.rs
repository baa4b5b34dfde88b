//! Per-page view state
//!
//! A [`PageView`] holds the signals a page renders from. Controller paints
//! are applied to it in order.

use std::rc::Rc;

use leptos::*;

use hbnb::controller::{PageController, Paint, PriceFilter};
use hbnb::render::Fragment;

use super::global::GlobalState;
use super::session::DocumentCookies;
use crate::api::{ui_config, GlooApi};

pub type Controller = PageController<GlooApi, DocumentCookies>;

/// Fresh controller for the page being mounted
pub fn page_controller() -> Rc<Controller> {
    let config = ui_config();
    Rc::new(PageController::new(
        GlooApi::new(&config),
        DocumentCookies::new(config.session.clone()),
        config.ui,
    ))
}

#[derive(Clone, Copy)]
pub struct PageView {
    pub places: RwSignal<Vec<Fragment>>,
    pub price_options: RwSignal<Vec<PriceFilter>>,
    pub details: RwSignal<Vec<Fragment>>,
    pub reviews: RwSignal<Vec<Fragment>>,
    pub review_form_visible: RwSignal<bool>,
    pub review_text: RwSignal<String>,
    pub review_rating: RwSignal<String>,
}

impl PageView {
    pub fn new() -> Self {
        Self {
            places: create_rw_signal(Vec::new()),
            price_options: create_rw_signal(Vec::new()),
            details: create_rw_signal(Vec::new()),
            reviews: create_rw_signal(Vec::new()),
            review_form_visible: create_rw_signal(false),
            review_text: create_rw_signal(String::new()),
            review_rating: create_rw_signal(String::new()),
        }
    }

    pub fn apply(&self, state: &GlobalState, paints: Vec<Paint>) {
        for paint in paints {
            match paint {
                Paint::LoginLink { visible } => state.login_link_visible.set(visible),
                Paint::ReviewForm { visible } => self.review_form_visible.set(visible),
                Paint::PriceOptions(options) => self.price_options.set(options),
                Paint::Places(cards) => self.places.set(cards),
                Paint::PlaceDetails(details) => self.details.set(vec![details]),
                Paint::Reviews(cards) => self.reviews.set(cards),
                Paint::Notice(notice) => state.show_notice(&notice),
                Paint::ClearReviewForm => {
                    self.review_text.set(String::new());
                    self.review_rating.set(String::new());
                }
                Paint::Redirect(target) => navigate(&target),
            }
        }
    }
}

/// Full page navigation, relative to the current page
fn navigate(target: &str) {
    if let Err(e) = window().location().set_href(target) {
        web_sys::console::error_2(&"Navigation failed:".into(), &e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::provide_global_state;

    #[test]
    fn test_apply_updates_signals_in_order() {
        let runtime = create_runtime();
        provide_global_state();
        let state = use_context::<GlobalState>().unwrap();
        let view = PageView::new();
        view.review_text.set("draft".into());

        view.apply(
            &state,
            vec![
                Paint::LoginLink { visible: true },
                Paint::Places(vec![Fragment::new("div").class("place-card")]),
                Paint::PlaceDetails(Fragment::new("section").class("place-details")),
                Paint::Reviews(vec![]),
                Paint::ReviewForm { visible: true },
                Paint::ClearReviewForm,
            ],
        );

        assert!(state.login_link_visible.get_untracked());
        assert_eq!(view.places.get_untracked().len(), 1);
        assert!(view.details.get_untracked()[0].has_class("place-details"));
        assert!(view.reviews.get_untracked().is_empty());
        assert!(view.review_form_visible.get_untracked());
        assert_eq!(view.review_text.get_untracked(), "");
        runtime.dispose();
    }
}
