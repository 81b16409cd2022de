//! Variant Lookup
//!
//! `VariantResolver` is the seam for the page-supplied `findVariant`.
//! `VariantCatalog` is the built-in resolver over the product JSON.

use serde::{Deserialize, Serialize};

use crate::payload::normalize_option;

/// A purchasable SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Resolve a variant from normalized (color, size, back-option) strings
pub trait VariantResolver {
    fn find_variant(&self, color: &str, size: &str, back: &str) -> Option<Variant>;
}

impl<F> VariantResolver for F
where
    F: Fn(&str, &str, &str) -> Option<Variant>,
{
    fn find_variant(&self, color: &str, size: &str, back: &str) -> Option<Variant> {
        self(color, size, back)
    }
}

/// Product option descriptor: either a bare name or `{name, ...}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ProductOption {
    Name(String),
    Named { name: String },
}

impl ProductOption {
    fn name(&self) -> &str {
        match self {
            ProductOption::Name(name) | ProductOption::Named { name } => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ProductJson {
    #[serde(default)]
    options: Vec<ProductOption>,
    variants: Vec<Variant>,
}

/// Option slot (0..3) for each of the three lookup dimensions.
/// Color and size always map to a slot; only the back option may be absent.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OptionSlots {
    color: usize,
    size: usize,
    back: Option<usize>,
}

impl Default for OptionSlots {
    fn default() -> Self {
        Self {
            color: 0,
            size: 1,
            back: Some(2),
        }
    }
}

fn option_position(options: &[ProductOption], pred: impl Fn(&str) -> bool) -> Option<usize> {
    options
        .iter()
        .position(|opt| pred(normalize_option(opt.name()).as_str()))
}

fn is_color_name(name: &str) -> bool {
    matches!(name, "color" | "colour" | "colors" | "colours")
}

fn is_size_name(name: &str) -> bool {
    matches!(name, "size" | "sizes")
}

fn is_back_name(name: &str) -> bool {
    name.contains("back") || name.contains("design")
}

/// First of `preferred` not already taken by another dimension
fn free_slot(preferred: &[usize], taken: &[usize]) -> usize {
    preferred
        .iter()
        .copied()
        .find(|slot| !taken.contains(slot))
        .unwrap_or(preferred[0])
}

/// Variants of one product with option positions resolved by name
#[derive(Debug, Clone)]
pub struct VariantCatalog {
    variants: Vec<Variant>,
    slots: OptionSlots,
}

impl VariantCatalog {
    pub fn new(variants: Vec<Variant>) -> Self {
        Self {
            variants,
            slots: OptionSlots::default(),
        }
    }

    /// Build from the storefront product JSON (`window.ajaxCartProduct`)
    pub fn from_product_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let product: ProductJson = serde_json::from_value(value)?;
        Ok(Self::from_parts(&product.options, product.variants))
    }

    fn from_parts(options: &[ProductOption], variants: Vec<Variant>) -> Self {
        if options.is_empty() {
            return Self::new(variants);
        }
        let back = option_position(options, is_back_name);
        let named_color = option_position(options, is_color_name);
        let named_size = option_position(options, is_size_name);

        // Unrecognised names fall back to position, never to "match anything"
        let color = named_color.unwrap_or_else(|| {
            let taken: Vec<usize> = named_size.into_iter().chain(back).collect();
            free_slot(&[0, 1, 2], &taken)
        });
        let size = named_size.unwrap_or_else(|| {
            let taken: Vec<usize> = std::iter::once(color).chain(back).collect();
            free_slot(&[1, 0, 2], &taken)
        });
        if named_color.is_none() || named_size.is_none() {
            log::warn!(
                "[Catalog] color/size option not found by name, using slots {}/{}",
                color,
                size
            );
        }

        Self {
            variants,
            slots: OptionSlots { color, size, back },
        }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    fn option_value(variant: &Variant, slot: usize) -> Option<&str> {
        match slot {
            0 => variant.option1.as_deref(),
            1 => variant.option2.as_deref(),
            2 => variant.option3.as_deref(),
            _ => None,
        }
    }

    fn option_matches(variant: &Variant, slot: usize, wanted: &str) -> bool {
        Self::option_value(variant, slot).map(normalize_option).as_deref() == Some(wanted)
    }
}

impl VariantResolver for VariantCatalog {
    fn find_variant(&self, color: &str, size: &str, back: &str) -> Option<Variant> {
        let (color, size, back) = (
            normalize_option(color),
            normalize_option(size),
            normalize_option(back),
        );
        self.variants
            .iter()
            .filter(|v| v.available)
            .find(|v| {
                Self::option_matches(v, self.slots.color, &color)
                    && Self::option_matches(v, self.slots.size, &size)
                    && self
                        .slots
                        .back
                        // Product has no back option: any value matches
                        .map_or(true, |slot| Self::option_matches(v, slot, &back))
            })
            .cloned()
    }
}
