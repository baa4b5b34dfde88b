//! Page Controller
//!
//! Per-page orchestration between the session, the API and the renderer.
//! The controller never touches a document directly; every operation returns
//! a list of [`Paint`] commands for the host to apply, in order.
//!
//! One controller is created per page load and owns all page state: the
//! places cache, the active price filter and the place id.

mod cache;
mod filter;

pub use cache::PlaceCache;
pub use filter::{apply_price_filter, InvalidPriceFilter, PriceFilter};

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::client::{ClientError, PlacesApi};
use crate::config::UiConfig;
use crate::models::NewReview;
use crate::render::{place_details, places_unavailable, review_cards, Fragment};
use crate::session::SessionStore;

pub const REVIEW_SUBMITTED: &str = "Review submitted successfully!";
pub const MISSING_PLACE_ID: &str = "No place selected.";

/// Which optional regions the current page contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageElements {
    pub login_link: bool,
    pub login_form: bool,
    pub places_list: bool,
    pub price_filter: bool,
    pub place_details: bool,
    pub reviews: bool,
    pub review_form: bool,
    pub error_region: bool,
}

impl PageElements {
    pub fn index() -> Self {
        Self {
            login_link: true,
            places_list: true,
            price_filter: true,
            error_region: true,
            ..Self::default()
        }
    }

    pub fn login() -> Self {
        Self {
            login_form: true,
            error_region: true,
            ..Self::default()
        }
    }

    pub fn place() -> Self {
        Self {
            login_link: true,
            place_details: true,
            reviews: true,
            review_form: true,
            error_region: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// Message for the page's notice region
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// `None` keeps the notice up until the next action
    pub hide_after: Option<Duration>,
}

/// Rendering command emitted by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    LoginLink { visible: bool },
    ReviewForm { visible: bool },
    PriceOptions(Vec<PriceFilter>),
    /// Full replacement of the places list
    Places(Vec<Fragment>),
    PlaceDetails(Fragment),
    /// Full replacement of the reviews list
    Reviews(Vec<Fragment>),
    Notice(Notice),
    ClearReviewForm,
    Redirect(String),
}

pub struct PageController<A, S> {
    api: A,
    session: S,
    settings: UiConfig,
    elements: Cell<PageElements>,
    places: RefCell<PlaceCache>,
    place_id: RefCell<Option<String>>,
}

impl<A: PlacesApi, S: SessionStore> PageController<A, S> {
    pub fn new(api: A, session: S, settings: UiConfig) -> Self {
        Self {
            api,
            session,
            settings,
            elements: Cell::new(PageElements::default()),
            places: RefCell::new(PlaceCache::new()),
            place_id: RefCell::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn settings(&self) -> &UiConfig {
        &self.settings
    }

    pub fn place_id(&self) -> Option<String> {
        self.place_id.borrow().clone()
    }

    pub fn price_filter(&self) -> PriceFilter {
        self.places.borrow().filter()
    }

    /// Number of places in the cache
    pub fn place_count(&self) -> usize {
        self.places.borrow().places().len()
    }

    /// Initial paint for a page.
    ///
    /// `place_id` is the `id` query parameter, if any.
    pub async fn load(&self, elements: PageElements, place_id: Option<&str>) -> Vec<Paint> {
        self.elements.set(elements);
        let place_id = place_id.map(str::trim).filter(|id| !id.is_empty());
        *self.place_id.borrow_mut() = place_id.map(str::to_string);

        let token = self.session.token();
        let mut paints = Vec::new();

        if elements.login_link {
            paints.push(Paint::LoginLink {
                visible: token.is_none(),
            });
        }

        if elements.price_filter {
            paints.push(Paint::PriceOptions(PriceFilter::options(
                &self.settings.price_options,
            )));
        }

        if elements.places_list {
            paints.extend(self.load_places(token.as_deref()).await);
        }

        if elements.place_details {
            match place_id {
                Some(id) => paints.extend(self.load_place(id, token.as_deref()).await),
                None => paints.extend(self.notice(NoticeKind::Error, MISSING_PLACE_ID, None)),
            }
        }

        if elements.review_form {
            paints.push(Paint::ReviewForm {
                visible: token.is_some() && place_id.is_some(),
            });
        }

        paints
    }

    async fn load_places(&self, token: Option<&str>) -> Vec<Paint> {
        match self.api.list_places(token).await {
            Ok(places) => {
                tracing::debug!(count = places.len(), "places loaded");
                let mut cache = self.places.borrow_mut();
                cache.replace(places);
                vec![Paint::Places(cache.cards())]
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load places");
                let mut paints = vec![Paint::Places(vec![places_unavailable()])];
                paints.extend(self.client_error(&e, None));
                paints
            }
        }
    }

    async fn load_place(&self, id: &str, token: Option<&str>) -> Vec<Paint> {
        let mut paints = Vec::new();

        match self.api.get_place(id, token).await {
            Ok(place) => paints.push(Paint::PlaceDetails(place_details(&place))),
            Err(e) => {
                tracing::warn!(place_id = %id, error = %e, "failed to load place");
                paints.extend(self.client_error(&e, Some("Failed to load place details")));
                return paints;
            }
        }

        if self.elements.get().reviews {
            paints.extend(self.load_reviews(id, token).await);
        }
        paints
    }

    async fn load_reviews(&self, place_id: &str, token: Option<&str>) -> Vec<Paint> {
        match self.api.list_reviews(place_id, token).await {
            Ok(reviews) => vec![Paint::Reviews(review_cards(&reviews))],
            Err(e) => {
                tracing::warn!(place_id = %place_id, error = %e, "failed to load reviews");
                self.client_error(&e, Some("Failed to load reviews"))
            }
        }
    }

    /// Exchange credentials for a token and navigate away on success
    pub async fn login(&self, email: &str, password: &str) -> Vec<Paint> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return self.notice(
                NoticeKind::Error,
                "Please enter both email and password",
                Some(self.hide_after()),
            );
        }

        match self.api.login(email, password).await {
            Ok(response) => {
                self.session.store_token(&response.access_token);
                tracing::info!("login succeeded");
                vec![Paint::Redirect(self.settings.login_redirect.clone())]
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                let hide_after = (!e.is_network()).then(|| self.hide_after());
                self.notice(
                    NoticeKind::Error,
                    &format!("Login failed: {}", e.user_message()),
                    hide_after,
                )
            }
        }
    }

    /// Change the price filter and repaint the cached cards
    pub fn set_price_filter(&self, filter: PriceFilter) -> Vec<Paint> {
        let mut cache = self.places.borrow_mut();
        cache.set_filter(filter);
        if !cache.is_loaded() {
            return Vec::new();
        }
        vec![Paint::Places(cache.cards())]
    }

    /// Validate, post and refresh the review list
    pub async fn submit_review(&self, text: &str, rating: u8) -> Vec<Paint> {
        let Some(token) = self.session.token() else {
            return vec![Paint::Redirect(self.settings.home_page.clone())];
        };

        let place_id = self.place_id().unwrap_or_default();
        let review = match NewReview::new(text, rating, &place_id) {
            Ok(review) => review,
            Err(e) => {
                return self.notice(NoticeKind::Error, &e.to_string(), Some(self.hide_after()))
            }
        };

        if let Err(e) = self.api.create_review(&review, &token).await {
            tracing::warn!(place_id = %place_id, error = %e, "failed to submit review");
            if matches!(e, ClientError::MissingToken) {
                return vec![Paint::Redirect(self.settings.home_page.clone())];
            }
            return self.client_error(&e, Some("Failed to submit review"));
        }

        tracing::info!(place_id = %place_id, rating, "review submitted");
        let mut paints = vec![Paint::ClearReviewForm];
        paints.extend(self.notice(
            NoticeKind::Success,
            REVIEW_SUBMITTED,
            Some(self.hide_after()),
        ));
        if self.elements.get().reviews {
            paints.extend(self.load_reviews(&place_id, Some(&token)).await);
        }
        paints
    }

    fn hide_after(&self) -> Duration {
        Duration::from_millis(self.settings.error_hide_ms)
    }

    /// Network failures stay up; API errors are transient
    fn client_error(&self, error: &ClientError, context: Option<&str>) -> Vec<Paint> {
        if error.is_network() {
            return self.notice(NoticeKind::Error, &error.user_message(), None);
        }
        let text = match context {
            Some(context) => format!("{}: {}", context, error.user_message()),
            None => error.user_message(),
        };
        self.notice(NoticeKind::Error, &text, Some(self.hide_after()))
    }

    /// Notices for a page without an error region are dropped
    fn notice(&self, kind: NoticeKind, text: &str, hide_after: Option<Duration>) -> Vec<Paint> {
        if !self.elements.get().error_region {
            tracing::debug!(text, "no notice region, message dropped");
            return Vec::new();
        }
        vec![Paint::Notice(Notice {
            kind,
            text: text.to_string(),
            hide_after,
        })]
    }
}
