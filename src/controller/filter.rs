//! Client-side price filter

use std::fmt;
use std::str::FromStr;

use crate::render::Fragment;

/// Selected value of the price filter dropdown
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PriceFilter {
    #[default]
    All,
    /// Show places priced at or below this amount
    Max(f64),
}

impl PriceFilter {
    /// Whether a card with this `data-price` value should be shown.
    ///
    /// Cards without a parsable price are never hidden.
    pub fn admits(&self, price: Option<&str>) -> bool {
        match self {
            PriceFilter::All => true,
            PriceFilter::Max(max) => match price.and_then(|p| p.trim().parse::<f64>().ok()) {
                Some(price) => price <= *max,
                None => true,
            },
        }
    }

    /// "All" followed by each configured maximum
    pub fn options(maxima: &[u32]) -> Vec<PriceFilter> {
        std::iter::once(PriceFilter::All)
            .chain(maxima.iter().map(|m| PriceFilter::Max(f64::from(*m))))
            .collect()
    }
}

impl fmt::Display for PriceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceFilter::All => write!(f, "All"),
            PriceFilter::Max(max) => write!(f, "{}", crate::render::format_price(*max)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid price filter: {0:?}")]
pub struct InvalidPriceFilter(pub String);

impl FromStr for PriceFilter {
    type Err = InvalidPriceFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PriceFilter::All);
        }
        match s.parse::<f64>() {
            Ok(max) if max.is_finite() && max >= 0.0 => Ok(PriceFilter::Max(max)),
            _ => Err(InvalidPriceFilter(s.to_string())),
        }
    }
}

/// Show or hide each card according to its `data-price` attribute.
/// Returns the number of cards left visible.
pub fn apply_price_filter(cards: &mut [Fragment], filter: PriceFilter) -> usize {
    let mut visible = 0;
    for card in cards.iter_mut() {
        let show = filter.admits(card.get_attr("data-price"));
        card.set_visible(show);
        if show {
            visible += 1;
        }
    }
    visible
}
