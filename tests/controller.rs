//! Page controller against an in-memory API

use std::cell::RefCell;
use std::time::Duration;

use async_trait::async_trait;

use hbnb::client::{ClientError, PlacesApi};
use hbnb::config::{SessionConfig, UiConfig};
use hbnb::controller::{
    Notice, NoticeKind, PageController, PageElements, Paint, PriceFilter, REVIEW_SUBMITTED,
};
use hbnb::models::{LoginResponse, NewReview, Place, Review};
use hbnb::session::{CookieJar, SessionStore};

#[derive(Default)]
struct FakeApi {
    places: Vec<Place>,
    reviews: RefCell<Vec<Review>>,
    login_error: Option<ClientError>,
    posted: RefCell<Vec<(NewReview, String)>>,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeApi {
    fn with_prices(prices: &[f64]) -> Self {
        Self {
            places: prices
                .iter()
                .enumerate()
                .map(|(i, price)| Place {
                    id: format!("p{}", i + 1),
                    title: Some(format!("Place {}", i + 1)),
                    price: Some(*price),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn calls(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == name).count()
    }
}

#[async_trait(?Send)]
impl PlacesApi for FakeApi {
    async fn login(&self, email: &str, _password: &str) -> Result<LoginResponse, ClientError> {
        self.calls.borrow_mut().push("login");
        match &self.login_error {
            Some(err) => Err(err.clone()),
            None => Ok(LoginResponse {
                access_token: format!("token-for-{}", email),
            }),
        }
    }

    async fn list_places(&self, _token: Option<&str>) -> Result<Vec<Place>, ClientError> {
        self.calls.borrow_mut().push("list_places");
        Ok(self.places.clone())
    }

    async fn get_place(&self, id: &str, _token: Option<&str>) -> Result<Place, ClientError> {
        self.calls.borrow_mut().push("get_place");
        self.places
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                message: "Place not found".into(),
            })
    }

    async fn list_reviews(
        &self,
        _place_id: &str,
        _token: Option<&str>,
    ) -> Result<Vec<Review>, ClientError> {
        self.calls.borrow_mut().push("list_reviews");
        Ok(self.reviews.borrow().clone())
    }

    async fn create_review(&self, review: &NewReview, token: &str) -> Result<(), ClientError> {
        self.calls.borrow_mut().push("create_review");
        self.posted
            .borrow_mut()
            .push((review.clone(), token.to_string()));
        self.reviews.borrow_mut().push(Review {
            text: Some(review.text.clone()),
            rating: Some(f64::from(review.rating)),
            ..Default::default()
        });
        Ok(())
    }
}

fn anonymous(api: FakeApi) -> PageController<FakeApi, CookieJar> {
    PageController::new(api, CookieJar::new(SessionConfig::default()), UiConfig::default())
}

fn signed_in(api: FakeApi) -> PageController<FakeApi, CookieJar> {
    PageController::new(
        api,
        CookieJar::with_token(SessionConfig::default(), "abc"),
        UiConfig::default(),
    )
}

fn places_paint(paints: &[Paint]) -> Vec<hbnb::Fragment> {
    paints
        .iter()
        .rev()
        .find_map(|p| match p {
            Paint::Places(cards) => Some(cards.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

fn notices(paints: &[Paint]) -> Vec<&Notice> {
    paints
        .iter()
        .filter_map(|p| match p {
            Paint::Notice(n) => Some(n),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_two_places_two_cards_with_prices() {
    let ctl = anonymous(FakeApi::with_prices(&[5.0, 50.0]));
    let cards = places_paint(&ctl.load(PageElements::index(), None).await);

    assert_eq!(cards.len(), 2);
    let prices: Vec<_> = cards.iter().map(|c| c.get_attr("data-price")).collect();
    assert_eq!(prices, vec![Some("5"), Some("50")]);
}

#[tokio::test]
async fn test_max_price_filter_without_refetch() {
    let ctl = anonymous(FakeApi::with_prices(&[5.0, 50.0]));
    ctl.load(PageElements::index(), None).await;

    let cards = places_paint(&ctl.set_price_filter(PriceFilter::Max(10.0)));
    assert_eq!(cards.iter().filter(|c| c.is_visible()).count(), 1);
    assert!(cards[0].is_visible());

    let cards = places_paint(&ctl.set_price_filter(PriceFilter::All));
    assert_eq!(cards.iter().filter(|c| c.is_visible()).count(), 2);

    assert_eq!(ctl.api().calls("list_places"), 1);
}

#[tokio::test]
async fn test_filter_survives_reload() {
    let ctl = anonymous(FakeApi::with_prices(&[5.0, 50.0, 100.0]));
    ctl.set_price_filter(PriceFilter::Max(50.0));
    let cards = places_paint(&ctl.load(PageElements::index(), None).await);
    assert_eq!(cards.iter().filter(|c| c.is_visible()).count(), 2);
}

#[tokio::test]
async fn test_login_link_follows_token() {
    let paints = anonymous(FakeApi::default())
        .load(PageElements::index(), None)
        .await;
    assert!(paints.contains(&Paint::LoginLink { visible: true }));

    let paints = signed_in(FakeApi::default())
        .load(PageElements::index(), None)
        .await;
    assert!(paints.contains(&Paint::LoginLink { visible: false }));
}

#[tokio::test]
async fn test_login_stores_cookie_and_redirects() {
    let ctl = anonymous(FakeApi::default());
    ctl.load(PageElements::login(), None).await;

    let paints = ctl.login("ann@example.com", "pw").await;
    assert_eq!(paints, vec![Paint::Redirect("index.html".into())]);
    assert_eq!(
        ctl.session().token().as_deref(),
        Some("token-for-ann@example.com")
    );
    assert_eq!(
        ctl.session().header(),
        "token=token-for-ann%40example.com"
    );
}

#[tokio::test]
async fn test_login_failure_is_transient_notice() {
    let api = FakeApi {
        login_error: Some(ClientError::Api {
            status: 401,
            message: "Invalid credentials".into(),
        }),
        ..Default::default()
    };
    let ctl = anonymous(api);
    ctl.load(PageElements::login(), None).await;

    let paints = ctl.login("ann@example.com", "bad").await;
    assert_eq!(
        paints,
        vec![Paint::Notice(Notice {
            kind: NoticeKind::Error,
            text: "Login failed: Invalid credentials".into(),
            hide_after: Some(Duration::from_millis(5000)),
        })]
    );
    assert_eq!(ctl.session().token(), None);
}

#[tokio::test]
async fn test_login_with_empty_fields_skips_network() {
    let ctl = anonymous(FakeApi::default());
    ctl.load(PageElements::login(), None).await;

    let paints = ctl.login("  ", "").await;
    assert_eq!(notices(&paints).len(), 1);
    assert_eq!(ctl.api().calls("login"), 0);
}

#[tokio::test]
async fn test_place_page_paints_details_reviews_and_form() {
    let api = FakeApi::with_prices(&[80.0]);
    api.reviews.borrow_mut().push(Review {
        text: Some("Cozy".into()),
        rating: Some(5.0),
        first_name: Some("Ann".into()),
        ..Default::default()
    });
    let ctl = signed_in(api);

    let paints = ctl.load(PageElements::place(), Some("p1")).await;
    assert_eq!(ctl.place_id().as_deref(), Some("p1"));

    let details = paints.iter().find_map(|p| match p {
        Paint::PlaceDetails(d) => Some(d),
        _ => None,
    });
    assert!(details.unwrap().text_content().contains("Place 1"));

    let reviews = paints.iter().find_map(|p| match p {
        Paint::Reviews(r) => Some(r),
        _ => None,
    });
    assert!(reviews.unwrap()[0].text_content().contains("★★★★★"));

    assert!(paints.contains(&Paint::ReviewForm { visible: true }));
}

#[tokio::test]
async fn test_place_page_hides_form_without_token() {
    let ctl = anonymous(FakeApi::with_prices(&[80.0]));
    let paints = ctl.load(PageElements::place(), Some("p1")).await;
    assert!(paints.contains(&Paint::ReviewForm { visible: false }));
}

#[tokio::test]
async fn test_unknown_place_reports_and_skips_reviews() {
    let ctl = signed_in(FakeApi::with_prices(&[80.0]));
    let paints = ctl.load(PageElements::place(), Some("zzz")).await;

    let notices = notices(&paints);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].text.contains("Place not found"));
    assert_eq!(ctl.api().calls("list_reviews"), 0);
}

#[tokio::test]
async fn test_submit_without_token_redirects_home() {
    let ctl = anonymous(FakeApi::with_prices(&[80.0]));
    ctl.load(PageElements::place(), Some("p1")).await;

    let paints = ctl.submit_review("Nice", 4).await;
    assert_eq!(paints, vec![Paint::Redirect("index.html".into())]);
    assert_eq!(ctl.api().calls("create_review"), 0);
}

#[tokio::test]
async fn test_invalid_review_is_rejected_locally() {
    let ctl = signed_in(FakeApi::with_prices(&[80.0]));
    ctl.load(PageElements::place(), Some("p1")).await;

    let paints = ctl.submit_review("Nice", 0).await;
    assert_eq!(notices(&paints)[0].text, "Rating must be between 1 and 5");

    let paints = ctl.submit_review("   ", 3).await;
    assert_eq!(notices(&paints)[0].text, "Review text is required");

    assert_eq!(ctl.api().calls("create_review"), 0);
}

#[tokio::test]
async fn test_submit_review_clears_form_and_refreshes() {
    let ctl = signed_in(FakeApi::with_prices(&[80.0]));
    ctl.load(PageElements::place(), Some("p1")).await;

    let paints = ctl.submit_review("  Great stay ", 5).await;
    assert_eq!(paints[0], Paint::ClearReviewForm);

    let notice = notices(&paints)[0];
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, REVIEW_SUBMITTED);

    let Some(Paint::Reviews(cards)) = paints.last() else {
        panic!("expected refreshed reviews, got {:?}", paints);
    };
    assert_eq!(cards.len(), 1);

    let posted = ctl.api().posted.borrow();
    assert_eq!(posted[0].0.text, "Great stay");
    assert_eq!(posted[0].0.place_id, "p1");
    assert_eq!(posted[0].1, "abc");
}
