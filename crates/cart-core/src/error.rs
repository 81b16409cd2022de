//! Cart Errors

use serde::Deserialize;
use thiserror::Error;

pub type CartResult<T> = Result<T, CartError>;

/// Everything an add/change chain can fail with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("Please select at least one size/quantity")]
    NoSizeSelected,

    #[error("Variant not available: {color} / {size} / {back}")]
    VariantNotFound {
        color: String,
        size: String,
        back: String,
    },

    #[error("Invalid quantity for size {size}: {value}")]
    InvalidQuantity { size: String, value: String },

    /// Non-success HTTP status from the cart API
    #[error("{}", .message.as_deref().unwrap_or("Cart request failed"))]
    Remote {
        status: u16,
        message: Option<String>,
        description: Option<String>,
    },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A change for this line is still in flight
    #[error("Line {0} is already being updated")]
    LineBusy(String),
}

/// Error JSON returned by the platform on 4xx/5xx
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CartError {
    /// Build a remote error from a status and whatever body came back
    pub fn remote(status: u16, body: &str) -> Self {
        let parsed: RemoteErrorBody = serde_json::from_str(body).unwrap_or_default();
        CartError::Remote {
            status,
            message: parsed.message,
            description: parsed.description,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CartError::NoSizeSelected
                | CartError::VariantNotFound { .. }
                | CartError::InvalidQuantity { .. }
        )
    }

    /// Text for the blocking notification: server description first,
    /// then the error's own message, then a generic fallback
    pub fn user_message(&self) -> String {
        if let CartError::Remote {
            description: Some(description),
            ..
        } = self
        {
            if !description.is_empty() {
                return description.clone();
            }
        }
        let message = self.to_string();
        if message.is_empty() {
            "Error".to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_prefers_description() {
        let err = CartError::remote(
            422,
            r#"{"status":422,"message":"Cart Error","description":"All 3 Black / M are in your cart."}"#,
        );
        assert_eq!(err.user_message(), "All 3 Black / M are in your cart.");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_remote_without_body_falls_back() {
        let err = CartError::remote(500, "<html>oops</html>");
        assert_eq!(
            err,
            CartError::Remote {
                status: 500,
                message: None,
                description: None
            }
        );
        assert_eq!(err.user_message(), "Cart request failed");
    }

    #[test]
    fn test_remote_message_only() {
        let err = CartError::remote(404, r#"{"message":"Not found","description":""}"#);
        assert_eq!(err.user_message(), "Not found");
    }

    #[test]
    fn test_remote_with_empty_message_uses_generic_text() {
        let err = CartError::Remote {
            status: 500,
            message: Some(String::new()),
            description: None,
        };
        assert_eq!(err.user_message(), "Error");

        let err = CartError::remote(422, r#"{"message":"","description":""}"#);
        assert_eq!(err.user_message(), "Error");
    }

    #[test]
    fn test_validation_messages() {
        assert!(CartError::NoSizeSelected.is_validation());
        assert_eq!(
            CartError::NoSizeSelected.user_message(),
            "Please select at least one size/quantity"
        );
        let err = CartError::VariantNotFound {
            color: "Red".into(),
            size: "XL".into(),
            back: "Front Design Only".into(),
        };
        assert_eq!(
            err.user_message(),
            "Variant not available: Red / XL / Front Design Only"
        );
    }
}
