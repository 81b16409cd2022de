//! Add-to-cart Payload Builder
//!
//! Turns one explicit `Selection` into the `items` array posted to
//! `/cart/add.js`. All validation happens here, before any request.

use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult};
use crate::variant::VariantResolver;

/// Lowercase + trim, the key format `findVariant` expects
pub fn normalize_option(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Quantity picked for one size, as stored by the page's size picker.
///
/// Numbers and numeric strings are accepted. Blank, non-numeric and
/// non-positive values mean "not selected" (0). Fractional or oversized
/// counts are rejected rather than truncated.
pub fn parse_size_quantity(size: &str, raw: &serde_json::Value) -> CartResult<u32> {
    let number = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(number) = number.filter(|n| n.is_finite() && *n > 0.0) else {
        return Ok(0);
    };
    if number.fract() != 0.0 || number > u32::MAX as f64 {
        return Err(CartError::InvalidQuantity {
            size: size.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(number as u32)
}

/// Color as handed over by the page: a plain string or `{ value: "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Plain(String),
    Swatch { value: String },
}

impl ColorValue {
    pub fn as_str(&self) -> &str {
        match self {
            ColorValue::Plain(value) | ColorValue::Swatch { value } => value,
        }
    }

    /// First non-blank of modal color, page color, then the fallback
    pub fn resolve(modal: Option<ColorValue>, page: Option<ColorValue>, fallback: &str) -> Self {
        modal
            .into_iter()
            .chain(page)
            .find(|c| !c.as_str().trim().is_empty())
            .unwrap_or_else(|| ColorValue::Plain(fallback.to_string()))
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        ColorValue::Plain(value.to_string())
    }
}

/// Back-of-garment print option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackOption {
    #[default]
    FrontOnly,
    FrontAndBack,
}

impl BackOption {
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            BackOption::FrontAndBack
        } else {
            BackOption::FrontOnly
        }
    }

    /// Option value as it appears on the variant
    pub fn label(&self) -> &'static str {
        match self {
            BackOption::FrontOnly => "Front Design Only",
            BackOption::FrontAndBack => "Front and Back Design",
        }
    }

    pub fn flag(&self) -> &'static str {
        if self.label().contains("Back") {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Everything the builder needs, passed explicitly
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub color: Option<ColorValue>,
    /// Size -> quantity, in the order the sizes were picked
    pub sizes: Vec<(String, u32)>,
    pub back: BackOption,
    pub design_layers: Vec<serde_json::Value>,
}

impl Selection {
    pub fn new(color: impl Into<ColorValue>) -> Self {
        Self {
            color: Some(color.into()),
            ..Default::default()
        }
    }

    pub fn size(mut self, size: impl Into<String>, quantity: u32) -> Self {
        self.sizes.push((size.into(), quantity));
        self
    }

    pub fn back(mut self, back: BackOption) -> Self {
        self.back = back;
        self
    }

    pub fn layers(mut self, layers: Vec<serde_json::Value>) -> Self {
        self.design_layers = layers;
        self
    }

    /// Sizes with a positive quantity
    pub fn selected_sizes(&self) -> impl Iterator<Item = (&str, u32)> {
        self.sizes
            .iter()
            .filter(|(_, qty)| *qty > 0)
            .map(|(size, qty)| (size.as_str(), *qty))
    }
}

/// Line item properties; underscore-prefixed keys are hidden at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemProperties {
    #[serde(rename = "_custom_order")]
    pub custom_order: String,
    #[serde(rename = "_back_view")]
    pub back_view: String,
    #[serde(rename = "_color")]
    pub color: String,
    #[serde(rename = "_size")]
    pub size: String,
    /// JSON array of design layers, serialized as a string
    #[serde(rename = "_design_data")]
    pub design_data: String,
}

/// One entry of the `/cart/add.js` `items` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub id: u64,
    pub quantity: u32,
    pub properties: LineItemProperties,
}

/// Build one request per selected size.
///
/// `default_color` covers a selection without any color;
/// at most `max_layers` design layers are serialized.
pub fn build_add_payload<R: VariantResolver + ?Sized>(
    selection: &Selection,
    resolver: &R,
    default_color: &str,
    max_layers: usize,
) -> CartResult<Vec<LineItemRequest>> {
    let sizes: Vec<(&str, u32)> = selection.selected_sizes().collect();
    if sizes.is_empty() {
        return Err(CartError::NoSizeSelected);
    }

    let color = selection
        .color
        .clone()
        .unwrap_or_else(|| ColorValue::Plain(default_color.to_string()));
    let back = selection.back.label();

    let layers = &selection.design_layers[..selection.design_layers.len().min(max_layers)];
    let design_data =
        serde_json::to_string(layers).map_err(|e| CartError::Decode(e.to_string()))?;

    sizes
        .into_iter()
        .map(|(size, quantity)| {
            let variant = resolver
                .find_variant(
                    &normalize_option(color.as_str()),
                    &normalize_option(size),
                    &normalize_option(back),
                )
                .ok_or_else(|| CartError::VariantNotFound {
                    color: color.as_str().to_string(),
                    size: size.to_string(),
                    back: back.to_string(),
                })?;

            Ok(LineItemRequest {
                id: variant.id,
                quantity,
                properties: LineItemProperties {
                    custom_order: "Yes".to_string(),
                    back_view: selection.back.flag().to_string(),
                    color: color.as_str().to_string(),
                    size: size.to_string(),
                    design_data: design_data.clone(),
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;
    use serde_json::json;
    use std::cell::RefCell;

    fn variant(id: u64) -> Variant {
        Variant {
            id,
            title: String::new(),
            available: true,
            option1: None,
            option2: None,
            option3: None,
        }
    }

    /// Resolver over (color, size, back) -> id that records every lookup
    struct TableResolver {
        table: Vec<(&'static str, &'static str, &'static str, u64)>,
        calls: RefCell<Vec<(String, String, String)>>,
    }

    impl TableResolver {
        fn new(table: Vec<(&'static str, &'static str, &'static str, u64)>) -> Self {
            Self {
                table,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl VariantResolver for TableResolver {
        fn find_variant(&self, color: &str, size: &str, back: &str) -> Option<Variant> {
            self.calls
                .borrow_mut()
                .push((color.to_string(), size.to_string(), back.to_string()));
            self.table
                .iter()
                .find(|(c, s, b, _)| *c == color && *s == size && *b == back)
                .map(|(_, _, _, id)| variant(*id))
        }
    }

    #[test]
    fn test_single_size_example() {
        let resolver = TableResolver::new(vec![("black", "m", "front design only", 111)]);
        let selection = Selection::new("Black").size("M", 2);

        let items = build_add_payload(&selection, &resolver, "Black", 5).unwrap();

        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!([{
                "id": 111,
                "quantity": 2,
                "properties": {
                    "_custom_order": "Yes",
                    "_back_view": "No",
                    "_color": "Black",
                    "_size": "M",
                    "_design_data": "[]"
                }
            }])
        );
    }

    #[test]
    fn test_one_request_per_positive_size_in_order() {
        let resolver = TableResolver::new(vec![
            ("white", "s", "front and back design", 1),
            ("white", "l", "front and back design", 3),
            ("white", "xl", "front and back design", 4),
        ]);
        let selection = Selection::new("White")
            .size("XL", 1)
            .size("M", 0)
            .size("S", 4)
            .size("L", 2)
            .back(BackOption::FrontAndBack);

        let items = build_add_payload(&selection, &resolver, "Black", 5).unwrap();

        let got: Vec<(u64, u32, &str)> = items
            .iter()
            .map(|i| (i.id, i.quantity, i.properties.size.as_str()))
            .collect();
        assert_eq!(got, vec![(4, 1, "XL"), (1, 4, "S"), (3, 2, "L")]);
        assert!(items.iter().all(|i| i.properties.back_view == "Yes"));
        // Zero-quantity sizes are never looked up
        assert_eq!(resolver.calls.borrow().len(), 3);
    }

    #[test]
    fn test_no_sizes_fails_without_lookup() {
        let resolver = TableResolver::new(vec![("black", "m", "front design only", 111)]);

        for selection in [
            Selection::new("Black"),
            Selection::new("Black").size("M", 0).size("L", 0),
        ] {
            let err = build_add_payload(&selection, &resolver, "Black", 5).unwrap_err();
            assert_eq!(err, CartError::NoSizeSelected);
        }
        assert!(resolver.calls.borrow().is_empty());
    }

    #[test]
    fn test_unmatched_variant_names_combination() {
        let resolver = TableResolver::new(vec![("black", "m", "front design only", 111)]);
        let selection = Selection::new("Black").size("M", 1).size("XXL", 1);

        let err = build_add_payload(&selection, &resolver, "Black", 5).unwrap_err();
        assert_eq!(
            err,
            CartError::VariantNotFound {
                color: "Black".into(),
                size: "XXL".into(),
                back: "Front Design Only".into(),
            }
        );
    }

    #[test]
    fn test_lookup_keys_are_normalized() {
        let resolver = TableResolver::new(vec![("heather grey", "2xl", "front design only", 7)]);
        let selection = Selection::new(ColorValue::Swatch {
            value: " Heather Grey ".into(),
        })
        .size(" 2XL", 1);

        let items = build_add_payload(&selection, &resolver, "Black", 5).unwrap();
        assert_eq!(items[0].id, 7);
        assert_eq!(
            resolver.calls.borrow()[0],
            ("heather grey".into(), "2xl".into(), "front design only".into())
        );
    }

    #[test]
    fn test_design_layers_capped() {
        let resolver = TableResolver::new(vec![("black", "m", "front design only", 111)]);
        let layers: Vec<_> = (0..7).map(|i| json!({"layer": i})).collect();
        let selection = Selection::new("Black").size("M", 1).layers(layers);

        let items = build_add_payload(&selection, &resolver, "Black", 5).unwrap();
        let data: Vec<serde_json::Value> =
            serde_json::from_str(&items[0].properties.design_data).unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(data[4], json!({"layer": 4}));
    }

    #[test]
    fn test_missing_color_uses_default() {
        let resolver = TableResolver::new(vec![("navy", "s", "front design only", 5)]);
        let selection = Selection {
            color: None,
            sizes: vec![("S".into(), 1)],
            ..Default::default()
        };
        let items = build_add_payload(&selection, &resolver, "Navy", 5).unwrap();
        assert_eq!(items[0].properties.color, "Navy");
    }

    #[test]
    fn test_color_resolution_order() {
        let modal = Some(ColorValue::Swatch { value: "Red".into() });
        let page = Some(ColorValue::Plain("Blue".into()));
        assert_eq!(ColorValue::resolve(modal, page.clone(), "Black").as_str(), "Red");
        assert_eq!(ColorValue::resolve(None, page, "Black").as_str(), "Blue");
        assert_eq!(
            ColorValue::resolve(Some(ColorValue::Plain("  ".into())), None, "Black").as_str(),
            "Black"
        );
    }

    #[test]
    fn test_color_value_deserializes_both_shapes() {
        let plain: ColorValue = serde_json::from_value(json!("Black")).unwrap();
        let swatch: ColorValue =
            serde_json::from_value(json!({"value": "Black", "hex": "#000"})).unwrap();
        assert_eq!(plain.as_str(), swatch.as_str());
    }

    #[test]
    fn test_parse_size_quantity() {
        assert_eq!(parse_size_quantity("M", &json!(2)), Ok(2));
        assert_eq!(parse_size_quantity("M", &json!("2")), Ok(2));
        assert_eq!(parse_size_quantity("M", &json!(" 3 ")), Ok(3));
        assert_eq!(parse_size_quantity("M", &json!(2.0)), Ok(2));
        assert_eq!(parse_size_quantity("M", &json!(0)), Ok(0));
        assert_eq!(parse_size_quantity("M", &json!(-1)), Ok(0));
        assert_eq!(parse_size_quantity("M", &json!("abc")), Ok(0));
        assert_eq!(parse_size_quantity("M", &json!("")), Ok(0));
        assert_eq!(parse_size_quantity("M", &json!(null)), Ok(0));

        let err = parse_size_quantity("L", &json!(2.5)).unwrap_err();
        assert_eq!(
            err,
            CartError::InvalidQuantity {
                size: "L".into(),
                value: "2.5".into()
            }
        );
        assert!(err.is_validation());
        assert!(parse_size_quantity("L", &json!("1.5")).is_err());
    }
}
