//! Client error types

use thiserror::Error;

/// Shown when the API cannot be reached at all
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to reach the server. Please check your connection and try again.";

/// Errors that can occur when talking to the HBnB API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Transport failure, the request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A success response whose body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// An authenticated call was attempted without a session token
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Text suitable for the page's error region
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Parse(_) => "Unexpected response from the server".to_string(),
            ClientError::MissingToken => "You must be logged in to do that".to_string(),
            ClientError::InvalidUrl(url) => format!("Invalid address: {}", url),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidUrl(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
