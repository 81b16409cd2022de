//! Cart API Client
//!
//! Three calls against the storefront cart endpoints. Every successful
//! mutation is followed by a fresh `GET` so callers only ever render an
//! authoritative snapshot. Failures are surfaced once, never retried.

mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::WidgetConfig;
use crate::error::{CartError, CartResult};
use crate::models::Cart;
use crate::payload::LineItemRequest;

pub use http::HttpTransport;

// ========================
// Request Bodies
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRequest {
    pub items: Vec<LineItemRequest>,
}

/// `line` carries the line item key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub line: String,
    pub quantity: u32,
}

/// Raw response: status plus body text
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Byte-level HTTP seam. `?Send` because browser fetch futures are not `Send`.
#[async_trait(?Send)]
pub trait CartTransport {
    async fn get(&self, url: &str) -> CartResult<TransportResponse>;
    async fn post_json(&self, url: &str, body: String) -> CartResult<TransportResponse>;
}

// ========================
// Client
// ========================

pub struct CartClient<T> {
    transport: T,
    config: WidgetConfig,
}

impl<T: CartTransport> CartClient<T> {
    pub fn new(transport: T, config: WidgetConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Read the current cart
    pub async fn get(&self) -> CartResult<Cart> {
        let url = self.config.url(&self.config.routes.cart_js);
        log::debug!("[Cart] GET {}", url);
        let response = self.transport.get(&url).await?;
        let response = Self::check(response)?;
        serde_json::from_str(&response.body).map_err(|e| CartError::Decode(e.to_string()))
    }

    /// Add line items, then re-read the cart
    pub async fn add(&self, items: Vec<LineItemRequest>) -> CartResult<Cart> {
        let url = self.config.url(&self.config.routes.add_js);
        log::debug!("[Cart] POST {} ({} items)", url, items.len());
        self.post(&url, &AddRequest { items }).await?;
        self.get().await
    }

    /// Set a line to an absolute quantity (0 removes it), then re-read the cart
    pub async fn change(&self, line: &str, quantity: u32) -> CartResult<Cart> {
        let url = self.config.url(&self.config.routes.change_js);
        log::debug!("[Cart] POST {} line={} quantity={}", url, line, quantity);
        let body = ChangeRequest {
            line: line.to_string(),
            quantity,
        };
        self.post(&url, &body).await?;
        self.get().await
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> CartResult<TransportResponse> {
        let json = serde_json::to_string(body).map_err(|e| CartError::Decode(e.to_string()))?;
        let response = self.transport.post_json(url, json).await?;
        Self::check(response)
    }

    fn check(response: TransportResponse) -> CartResult<TransportResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            let err = CartError::remote(response.status, &response.body);
            log::warn!("[Cart] request failed: {} ({})", err, response.status);
            Err(err)
        }
    }
}
