//! Drawer Commands
//!
//! Every gesture becomes a `CartAction`; `dispatch` maps it to exactly one
//! client call chain and returns the fresh snapshot to render.
//! Changes on the same line are sequenced through `PendingLines`.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::client::{CartClient, CartTransport};
use crate::error::{CartError, CartResult};
use crate::models::Cart;
use crate::payload::LineItemRequest;

/// Discrete action identifiers (the `data-action` vocabulary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    Add,
    Step,
    Remove,
    Refresh,
}

impl ActionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::Add => "add",
            ActionId::Step => "step",
            ActionId::Remove => "remove",
            ActionId::Refresh => "refresh",
        }
    }
}

impl FromStr for ActionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ActionId::Add),
            "step" => Ok(ActionId::Step),
            "remove" => Ok(ActionId::Remove),
            "refresh" => Ok(ActionId::Refresh),
            other => Err(format!("unknown cart action: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Add(Vec<LineItemRequest>),
    /// +/- stepper; `current` is the quantity in the last rendered snapshot
    Step { key: String, current: u32, delta: i32 },
    Remove { key: String },
    Refresh,
}

impl CartAction {
    /// Stepper action from a `data-d` attribute value ("1", "-1", ...)
    pub fn step(key: impl Into<String>, current: u32, data_d: &str) -> Option<Self> {
        let delta = data_d.trim().parse::<i32>().ok().filter(|d| *d != 0)?;
        Some(CartAction::Step {
            key: key.into(),
            current,
            delta,
        })
    }

    /// Action for a drawer control from its `data-action` and `data-d`
    /// attributes. Only line controls (step, remove) map to an action here.
    pub fn from_control(
        data_action: &str,
        key: impl Into<String>,
        current: u32,
        data_d: Option<&str>,
    ) -> Option<Self> {
        match data_action.parse::<ActionId>() {
            Ok(ActionId::Step) => Self::step(key, current, data_d?),
            Ok(ActionId::Remove) => Some(CartAction::Remove { key: key.into() }),
            Ok(other) => {
                log::debug!("[Action] {} is not a line control", other.as_str());
                None
            }
            Err(e) => {
                log::warn!("[Action] {}", e);
                None
            }
        }
    }

    pub fn id(&self) -> ActionId {
        match self {
            CartAction::Add(_) => ActionId::Add,
            CartAction::Step { .. } => ActionId::Step,
            CartAction::Remove { .. } => ActionId::Remove,
            CartAction::Refresh => ActionId::Refresh,
        }
    }

    /// Line this action mutates, if any
    pub fn line_key(&self) -> Option<&str> {
        match self {
            CartAction::Step { key, .. } | CartAction::Remove { key } => Some(key),
            _ => None,
        }
    }
}

/// Absolute target for a stepper click, never below zero
pub fn target_quantity(current: u32, delta: i32) -> u32 {
    current.saturating_add_signed(delta)
}

/// Lines with a change request in flight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingLines {
    keys: BTreeSet<String>,
}

impl PendingLines {
    /// Claim a line; fails with `LineBusy` while a previous change is pending
    pub fn try_begin(&mut self, key: &str) -> CartResult<()> {
        if self.keys.insert(key.to_string()) {
            Ok(())
        } else {
            Err(CartError::LineBusy(key.to_string()))
        }
    }

    pub fn finish(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Run one action against the cart API
pub async fn dispatch<T: CartTransport>(
    client: &CartClient<T>,
    action: CartAction,
) -> CartResult<Cart> {
    log::debug!("[Action] {}", action.id().as_str());
    match action {
        CartAction::Add(items) => client.add(items).await,
        CartAction::Step {
            key,
            current,
            delta,
        } => client.change(&key, target_quantity(current, delta)).await,
        CartAction::Remove { key } => client.change(&key, 0).await,
        CartAction::Refresh => client.get().await,
    }
}
