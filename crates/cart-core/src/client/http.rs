//! reqwest-backed transport (browser fetch on wasm32)

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::{CartTransport, TransportResponse};
use crate::error::{CartError, CartResult};

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    async fn read(response: reqwest::Response) -> CartResult<TransportResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CartError::Transport(e.to_string()))?;
        Ok(TransportResponse { status, body })
    }
}

#[async_trait(?Send)]
impl CartTransport for HttpTransport {
    async fn get(&self, url: &str) -> CartResult<TransportResponse> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CartError::Transport(e.to_string()))?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, body: String) -> CartResult<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| CartError::Transport(e.to_string()))?;
        Self::read(response).await
    }
}
