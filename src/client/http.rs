//! Native HTTP client built on reqwest

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{api_error, ClientError, Endpoints, PlacesApi};
use crate::config::ApiConfig;
use crate::models::{LoginRequest, LoginResponse, NewReview, Place, Review};

/// HBnB REST API client
#[derive(Debug, Clone)]
pub struct HbnbClient {
    client: Client,
    endpoints: Endpoints,
}

impl HbnbClient {
    /// Create a client for the configured API. No timeout is applied unless
    /// `request_timeout_secs` is set.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().map_err(ClientError::from)?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(&config.base_url),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn authorized(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and map the outcome onto [`ClientError`]
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed before a response arrived");
            ClientError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = api_error(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "API returned an error");
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let body = response.text().await.map_err(ClientError::from)?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }
}

#[async_trait(?Send)]
impl PlacesApi for HbnbClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        tracing::debug!(email = %email, "logging in");
        let request = self.client.post(self.endpoints.login()).json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        self.send_json(request).await
    }

    async fn list_places(&self, token: Option<&str>) -> Result<Vec<Place>, ClientError> {
        let request = Self::authorized(self.client.get(self.endpoints.places()), token);
        let places: Vec<Place> = self.send_json(request).await?;
        tracing::debug!(count = places.len(), "fetched places");
        Ok(places)
    }

    async fn get_place(&self, id: &str, token: Option<&str>) -> Result<Place, ClientError> {
        let request = Self::authorized(self.client.get(self.endpoints.place(id)), token);
        self.send_json(request).await
    }

    async fn list_reviews(
        &self,
        place_id: &str,
        token: Option<&str>,
    ) -> Result<Vec<Review>, ClientError> {
        let url = self.endpoints.place_reviews(place_id);
        let request = Self::authorized(self.client.get(url), token);
        self.send_json(request).await
    }

    async fn create_review(&self, review: &NewReview, token: &str) -> Result<(), ClientError> {
        if token.is_empty() {
            return Err(ClientError::MissingToken);
        }
        let request = self
            .client
            .post(self.endpoints.reviews())
            .bearer_auth(token)
            .json(review);
        self.send(request).await?;
        tracing::info!(place_id = %review.place_id, "review created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_base() {
        let client = HbnbClient::new(&ApiConfig {
            base_url: "http://localhost:9000/api/v1/".into(),
            request_timeout_secs: Some(3),
        })
        .unwrap();
        assert_eq!(client.endpoints().base(), "http://localhost:9000/api/v1");
    }

    #[tokio::test]
    async fn test_create_review_requires_token() {
        let client = HbnbClient::new(&ApiConfig::default()).unwrap();
        let review = NewReview::new("Nice", 4, "p1").unwrap();
        assert_eq!(
            client.create_review(&review, "").await,
            Err(ClientError::MissingToken)
        );
    }
}
