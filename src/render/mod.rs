//! Renderer
//!
//! Turns API payloads into [`Fragment`] trees: place cards for the index page,
//! the detail block of the place page and review cards. Missing fields become
//! placeholder text; nothing here fails.

mod fragment;
mod place;
mod review;

pub use fragment::{escape, to_html, Fragment, Node};
pub use place::{
    format_price, place_card, place_cards, place_details, place_href, places_unavailable,
    PLACE_PAGE,
};
pub use review::{review_card, review_cards, stars};
