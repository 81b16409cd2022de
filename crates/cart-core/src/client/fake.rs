//! In-memory storefront used by the client tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;

use super::{AddRequest, CartTransport, ChangeRequest, TransportResponse};
use crate::error::{CartError, CartResult};
use crate::payload::LineItemProperties;

#[derive(Debug, Clone)]
struct Line {
    key: String,
    variant_id: u64,
    quantity: u32,
    properties: LineItemProperties,
}

#[derive(Debug, Default)]
struct State {
    prices: HashMap<u64, u64>,
    stock: HashMap<u64, u32>,
    lines: Vec<Line>,
    next_line: u32,
    requests: Vec<String>,
    last_body: String,
    offline: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakePlatform {
    state: Rc<RefCell<State>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, variant_id: u64, cents: u64) -> Self {
        self.state.borrow_mut().prices.insert(variant_id, cents);
        self
    }

    pub fn with_stock(self, variant_id: u64, stock: u32) -> Self {
        self.state.borrow_mut().stock.insert(variant_id, stock);
        self
    }

    pub fn offline(self) -> Self {
        self.state.borrow_mut().offline = true;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.borrow().requests.clone()
    }

    pub fn last_body(&self) -> String {
        self.state.borrow().last_body.clone()
    }

    fn snapshot(state: &State) -> String {
        let items: Vec<_> = state
            .lines
            .iter()
            .map(|line| {
                let price = state.prices.get(&line.variant_id).copied().unwrap_or(0);
                json!({
                    "id": line.variant_id,
                    "key": line.key,
                    "variant_id": line.variant_id,
                    "quantity": line.quantity,
                    "product_title": "Custom Tee",
                    "variant_title": format!("{} / {}", line.properties.color, line.properties.size),
                    "image": null,
                    "final_line_price": price * line.quantity as u64,
                    "properties": line.properties,
                })
            })
            .collect();
        let total: u64 = items
            .iter()
            .map(|i| i["final_line_price"].as_u64().unwrap_or(0))
            .sum();
        let count: u32 = state.lines.iter().map(|l| l.quantity).sum();
        json!({"total_price": total, "item_count": count, "items": items}).to_string()
    }

    fn error(status: u16, description: &str) -> TransportResponse {
        TransportResponse {
            status,
            body: json!({"status": status, "message": "Cart Error", "description": description})
                .to_string(),
        }
    }

    fn ok(body: String) -> TransportResponse {
        TransportResponse { status: 200, body }
    }

    fn add(state: &mut State, request: AddRequest) -> TransportResponse {
        for item in &request.items {
            let in_cart: u32 = state
                .lines
                .iter()
                .filter(|l| l.variant_id == item.id)
                .map(|l| l.quantity)
                .sum();
            if let Some(stock) = state.stock.get(&item.id) {
                if in_cart + item.quantity > *stock {
                    return Self::error(
                        422,
                        &format!("You can only add {} of this item to your cart.", stock),
                    );
                }
            }
        }
        for item in request.items {
            let existing = state
                .lines
                .iter_mut()
                .find(|l| l.variant_id == item.id && l.properties == item.properties);
            match existing {
                Some(line) => line.quantity += item.quantity,
                None => {
                    state.next_line += 1;
                    let key = format!("{}:{}", item.id, state.next_line);
                    state.lines.push(Line {
                        key,
                        variant_id: item.id,
                        quantity: item.quantity,
                        properties: item.properties,
                    });
                }
            }
        }
        Self::ok(json!({"items": []}).to_string())
    }

    fn change(state: &mut State, request: ChangeRequest) -> TransportResponse {
        let Some(index) = state.lines.iter().position(|l| l.key == request.line) else {
            return Self::error(400, "Cannot find variant");
        };
        if request.quantity == 0 {
            state.lines.remove(index);
        } else {
            state.lines[index].quantity = request.quantity;
        }
        Self::ok(Self::snapshot(state))
    }
}

#[async_trait(?Send)]
impl CartTransport for FakePlatform {
    async fn get(&self, url: &str) -> CartResult<TransportResponse> {
        let mut state = self.state.borrow_mut();
        if state.offline {
            return Err(CartError::Transport("connection refused".into()));
        }
        state.requests.push(format!("GET {}", url));
        Ok(Self::ok(Self::snapshot(&state)))
    }

    async fn post_json(&self, url: &str, body: String) -> CartResult<TransportResponse> {
        let mut state = self.state.borrow_mut();
        if state.offline {
            return Err(CartError::Transport("connection refused".into()));
        }
        state.requests.push(format!("POST {}", url));
        state.last_body = body.clone();

        let response = if url.ends_with("/cart/add.js") {
            match serde_json::from_str(&body) {
                Ok(request) => Self::add(&mut state, request),
                Err(_) => Self::error(400, "Bad request"),
            }
        } else if url.ends_with("/cart/change.js") {
            match serde_json::from_str(&body) {
                Ok(request) => Self::change(&mut state, request),
                Err(_) => Self::error(400, "Bad request"),
            }
        } else {
            Self::error(404, "Not found")
        };
        Ok(response)
    }
}
