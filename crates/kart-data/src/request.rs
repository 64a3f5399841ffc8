//! GET request builder.

use crate::{FetchError, Response};

/// A GET request bound to a client, ready to send.
pub struct RequestBuilder {
    client: reqwest::Client,
    url: String,
    headers: Vec<(String, String)>,
}

impl RequestBuilder {
    pub(crate) fn new(client: reqwest::Client, url: String) -> Self {
        Self {
            client,
            url,
            headers: Vec::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Send the request and buffer the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let mut request = self.client.get(self.url.as_str());
        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        tracing::debug!(url = %self.url, "GET");
        let response = request.send().await?;
        Response::read(response).await
    }
}
