//! Review card rendering

use super::Fragment;
use crate::models::{Review, MAX_RATING};

/// `★★★☆☆` style rating
pub fn stars(filled: u8) -> String {
    let filled = filled.min(MAX_RATING) as usize;
    let empty = MAX_RATING as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

pub fn review_card(review: &Review) -> Fragment {
    let text = review
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("No comment");

    let rating = match review.stars() {
        Some(n) => format!("Rating: {} ({}/{})", stars(n), n, MAX_RATING),
        None => "Rating: not rated".to_string(),
    };

    Fragment::new("div")
        .class("review-card")
        .child(Fragment::new("p").class("review-text").text(text))
        .child(
            Fragment::new("p")
                .class("review-author")
                .text(review.author().unwrap_or_else(|| "Anonymous".to_string())),
        )
        .child(Fragment::new("p").class("review-rating").text(rating))
}

/// Cards for every review, or a single placeholder when there are none
pub fn review_cards(reviews: &[Review]) -> Vec<Fragment> {
    if reviews.is_empty() {
        return vec![Fragment::new("p").class("no-reviews").text("No reviews yet.")];
    }
    reviews.iter().map(review_card).collect()
}
