//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(status, body))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Turn a non-2xx status into an error carrying the body.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self.text().unwrap_or_else(|_| "Unknown error".to_string());
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}
