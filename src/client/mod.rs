//! HBnB REST API Client
//!
//! [`PlacesApi`] is the seam between the page controller and the network. The
//! native build implements it with reqwest ([`HbnbClient`]); the browser crate
//! implements it with gloo-net. Both share [`Endpoints`] for URL building and
//! [`extract_error_message`] for turning error bodies into user text.
//!
//! # Endpoints
//!
//! - `POST /auth/login` - exchange credentials for a token
//! - `GET /places/` - list places (bearer optional)
//! - `GET /places/{id}` - place detail (bearer optional)
//! - `GET /reviews/places/{id}/reviews` - reviews of a place (bearer optional)
//! - `POST /reviews/` - create a review (bearer required)

mod error;
#[cfg(feature = "native")]
mod http;

pub use error::{ClientError, NETWORK_ERROR_MESSAGE};
#[cfg(feature = "native")]
pub use http::HbnbClient;

use async_trait::async_trait;

use crate::models::{LoginResponse, NewReview, Place, Review};

/// Operations the front end needs from the API.
///
/// Futures are not `Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait PlacesApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError>;

    async fn list_places(&self, token: Option<&str>) -> Result<Vec<Place>, ClientError>;

    async fn get_place(&self, id: &str, token: Option<&str>) -> Result<Place, ClientError>;

    async fn list_reviews(
        &self,
        place_id: &str,
        token: Option<&str>,
    ) -> Result<Vec<Review>, ClientError>;

    async fn create_review(&self, review: &NewReview, token: &str) -> Result<(), ClientError>;
}

/// URL builder for the API routes
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `base` includes the version prefix, e.g. `http://127.0.0.1:5000/api/v1`
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn login(&self) -> String {
        format!("{}/auth/login", self.base)
    }

    pub fn places(&self) -> String {
        format!("{}/places/", self.base)
    }

    pub fn place(&self, id: &str) -> String {
        format!("{}/places/{}", self.base, urlencoding::encode(id))
    }

    pub fn place_reviews(&self, place_id: &str) -> String {
        format!(
            "{}/reviews/places/{}/reviews",
            self.base,
            urlencoding::encode(place_id)
        )
    }

    pub fn reviews(&self) -> String {
        format!("{}/reviews/", self.base)
    }
}

/// Keys probed, in order, for a human readable message in an error body
const MESSAGE_KEYS: [&str; 3] = ["message", "error", "detail"];

/// Pull a message out of an error response body.
///
/// Looks for `message`, `error` or `detail` as a string, or as an object with
/// a string `message`. Falls back to `default` for anything else, including
/// non-JSON bodies.
pub fn extract_error_message(body: &str, default: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return default.to_string();
    };

    MESSAGE_KEYS
        .iter()
        .filter_map(|key| value.get(key))
        .find_map(|field| match field {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Object(inner) => inner
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| default.to_string())
}

/// Fallback message for a status with no usable body
pub fn default_error_message(status: u16) -> String {
    match status {
        400 => "Invalid request".to_string(),
        401 => "Invalid credentials".to_string(),
        403 => "You are not allowed to do that".to_string(),
        404 => "Not found".to_string(),
        _ => format!("Request failed with status {}", status),
    }
}

/// Build the error for a non-success response
pub fn api_error(status: u16, body: &str) -> ClientError {
    ClientError::Api {
        status,
        message: extract_error_message(body, &default_error_message(status)),
    }
}
