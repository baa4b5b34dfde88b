//! HTTP API Client
//!
//! [`GlooApi`] talks to the HBnB REST API through `fetch`.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use hbnb::client::{api_error, ClientError, Endpoints, PlacesApi};
use hbnb::config::{Config, DEFAULT_API_BASE};
use hbnb::models::{LoginRequest, LoginResponse, NewReview, Place, Review};

/// Local storage key overriding the API base URL
const API_URL_KEY: &str = "hbnb_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Defaults, with the API base taken from local storage
pub fn ui_config() -> Config {
    let mut config = Config::default();
    config.api.base_url = get_api_base();
    config
}

fn network(err: gloo_net::Error) -> ClientError {
    web_sys::console::warn_1(&format!("Request failed: {}", err).into());
    ClientError::Network(err.to_string())
}

fn authorized(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
        None => request,
    }
}

/// Map a response onto the expected payload or a [`ClientError`]
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(network)?;
    if !response.ok() {
        return Err(api_error(status, &body));
    }
    serde_json::from_str(&body).map_err(ClientError::from)
}

/// Browser client for the HBnB API
#[derive(Debug, Clone)]
pub struct GlooApi {
    endpoints: Endpoints,
}

impl GlooApi {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoints: Endpoints::new(&config.api.base_url),
        }
    }
}

#[async_trait(?Send)]
impl PlacesApi for GlooApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = Request::post(&self.endpoints.login())
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .map_err(|e| ClientError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn list_places(&self, token: Option<&str>) -> Result<Vec<Place>, ClientError> {
        let response = authorized(Request::get(&self.endpoints.places()), token)
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn get_place(&self, id: &str, token: Option<&str>) -> Result<Place, ClientError> {
        let response = authorized(Request::get(&self.endpoints.place(id)), token)
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn list_reviews(
        &self,
        place_id: &str,
        token: Option<&str>,
    ) -> Result<Vec<Review>, ClientError> {
        let response = authorized(Request::get(&self.endpoints.place_reviews(place_id)), token)
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn create_review(&self, review: &NewReview, token: &str) -> Result<(), ClientError> {
        if token.is_empty() {
            return Err(ClientError::MissingToken);
        }

        let response = authorized(Request::post(&self.endpoints.reviews()), Some(token))
            .json(review)
            .map_err(|e| ClientError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(network)?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(response.status(), &body));
        }
        Ok(())
    }
}
