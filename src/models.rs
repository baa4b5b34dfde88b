//! API payload types
//!
//! Places and reviews arrive unvalidated; every consumed field is optional and
//! the renderer substitutes placeholder text for whatever is missing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A place as returned by `GET /places/` and `GET /places/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Place {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub amenities: Option<Vec<Amenity>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Owner {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Amenity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Place {
    pub fn images(&self) -> &[String] {
        self.images.as_deref().unwrap_or_default()
    }

    /// Amenity names, skipping entries without one
    pub fn amenity_names(&self) -> Vec<&str> {
        self.amenities
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|a| a.name.as_deref())
            .filter(|n| !n.trim().is_empty())
            .collect()
    }

    /// "First Last" of the owner, if either part is present
    pub fn owner_name(&self) -> Option<String> {
        let owner = self.owner.as_ref()?;
        full_name(owner.first_name.as_deref(), owner.last_name.as_deref())
    }
}

/// A review as returned by `GET /reviews/places/{id}/reviews`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Review {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "comment")]
    pub text: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl Review {
    /// Display name of the author: full name, then user name
    pub fn author(&self) -> Option<String> {
        full_name(self.first_name.as_deref(), self.last_name.as_deref()).or_else(|| {
            self.user_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
        })
    }

    /// Rating rounded into the 0..=5 star scale
    pub fn stars(&self) -> Option<u8> {
        self.rating
            .filter(|r| r.is_finite())
            .map(|r| r.round().clamp(0.0, 5.0) as u8)
    }
}

fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let name = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Body of `POST /reviews/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub text: String,
    pub rating: u8,
    pub place_id: String,
}

/// Review input rejected before it reaches the API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewError {
    #[error("Review text is required")]
    EmptyText,

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange(u8),

    #[error("Place ID is required")]
    MissingPlace,
}

impl NewReview {
    /// Validate and normalize user input into a review body
    pub fn new(text: &str, rating: u8, place_id: &str) -> Result<Self, ReviewError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ReviewError::EmptyText);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(ReviewError::MissingPlace);
        }

        Ok(Self {
            text: text.to_string(),
            rating,
            place_id: place_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_accepts_name_alias_and_missing_fields() {
        let place: Place = serde_json::from_str(r#"{"id": "p1", "name": "Loft"}"#).unwrap();
        assert_eq!(place.title.as_deref(), Some("Loft"));
        assert_eq!(place.price, None);
        assert!(place.images().is_empty());
        assert!(place.amenity_names().is_empty());
        assert_eq!(place.owner_name(), None);
    }

    #[test]
    fn test_place_full_payload() {
        let place: Place = serde_json::from_str(
            r#"{
                "id": "p2",
                "title": "Beach House",
                "price": 120.5,
                "description": "Sea view",
                "latitude": 43.3,
                "longitude": 5.4,
                "images": ["a.jpg"],
                "owner": {"id": "u1", "first_name": "Ada", "last_name": "Lovelace"},
                "amenities": [{"id": "a1", "name": "Wifi"}, {"id": "a2", "name": " "}, {"id": "a3"}]
            }"#,
        )
        .unwrap();

        assert_eq!(place.owner_name().as_deref(), Some("Ada Lovelace"));
        assert_eq!(place.amenity_names(), vec!["Wifi"]);
        assert_eq!(place.images(), ["a.jpg".to_string()]);
    }

    #[test]
    fn test_null_collections() {
        let place: Place =
            serde_json::from_str(r#"{"id": "p3", "images": null, "amenities": null}"#).unwrap();
        assert!(place.images().is_empty());
        assert!(place.amenity_names().is_empty());
    }

    #[test]
    fn test_review_author_fallbacks() {
        let review: Review =
            serde_json::from_str(r#"{"comment": "Great", "rating": 4, "user_name": "ada"}"#)
                .unwrap();
        assert_eq!(review.text.as_deref(), Some("Great"));
        assert_eq!(review.author().as_deref(), Some("ada"));

        let review = Review {
            first_name: Some("Ada".into()),
            user_name: Some("ada".into()),
            ..Default::default()
        };
        assert_eq!(review.author().as_deref(), Some("Ada"));

        assert_eq!(Review::default().author(), None);
    }

    #[test]
    fn test_review_stars() {
        let mut review = Review::default();
        assert_eq!(review.stars(), None);
        review.rating = Some(3.6);
        assert_eq!(review.stars(), Some(4));
        review.rating = Some(11.0);
        assert_eq!(review.stars(), Some(5));
    }

    #[test]
    fn test_new_review_validation() {
        assert_eq!(NewReview::new("  ", 3, "p1"), Err(ReviewError::EmptyText));
        assert_eq!(NewReview::new("ok", 0, "p1"), Err(ReviewError::RatingOutOfRange(0)));
        assert_eq!(NewReview::new("ok", 6, "p1"), Err(ReviewError::RatingOutOfRange(6)));
        assert_eq!(NewReview::new("ok", 5, ""), Err(ReviewError::MissingPlace));

        let review = NewReview::new("  Lovely stay ", 5, "p1").unwrap();
        assert_eq!(review.text, "Lovely stay");
        assert_eq!(
            serde_json::to_value(&review).unwrap(),
            serde_json::json!({"text": "Lovely stay", "rating": 5, "place_id": "p1"})
        );
    }
}
