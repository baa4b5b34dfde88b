//! Places cache for the index page

use super::filter::{apply_price_filter, PriceFilter};
use crate::models::Place;
use crate::render::{place_cards, Fragment};

/// Last fetched places plus the active filter.
///
/// Changing the filter re-renders from here instead of refetching.
#[derive(Debug, Clone, Default)]
pub struct PlaceCache {
    places: Vec<Place>,
    filter: PriceFilter,
    loaded: bool,
}

impl PlaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, places: Vec<Place>) {
        self.places = places;
        self.loaded = true;
    }

    pub fn set_filter(&mut self, filter: PriceFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> PriceFilter {
        self.filter
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Whether a successful fetch has populated the cache
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Rendered cards with the filter applied
    pub fn cards(&self) -> Vec<Fragment> {
        let mut cards = place_cards(&self.places);
        apply_price_filter(&mut cards, self.filter);
        cards
    }
}
