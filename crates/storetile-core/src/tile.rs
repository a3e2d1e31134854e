//! Display-ready product tiles.
//!
//! A [`ProductTile`] is a pure projection of one catalog product: it is built
//! synchronously, never mutated, and rebuilt whenever the source product is
//! fetched again. Rendering state never reaches past this module into the raw
//! catalog payload.

use serde::{Deserialize, Serialize};

/// Swatch code used when a color has no `color` metafield value.
pub const TRANSPARENT_SWATCH: &str = "transparent";

/// Image shown when a color group has no variant image of its own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/327x408.png";

/// An image reference as consumed by tile rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// `None` when the catalog has no alt text for the image.
    pub alt_text: Option<String>,
}

impl TileImage {
    /// The fixed placeholder: zero dimensions, no alt text.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            url: PLACEHOLDER_IMAGE_URL.to_string(),
            width: 0,
            height: 0,
            alt_text: None,
        }
    }

    /// Alt text, treating an empty string as absent.
    #[must_use]
    pub fn alt(&self) -> Option<&str> {
        self.alt_text.as_deref().filter(|alt| !alt.is_empty())
    }
}

/// Front image and hover image for one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePair {
    pub primary: TileImage,
    /// `None` only under [`SecondaryImageFallback::Hidden`].
    pub secondary: Option<TileImage>,
}

/// All variants of a product that share one "Color" option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorGroup {
    /// The "Color" option value, e.g. `"Red"`.
    pub name: String,
    /// Swatch CSS color, e.g. `"#ff0000"`, or [`TRANSPARENT_SWATCH`].
    pub code: String,
    /// `true` when at least one variant of this color is purchasable.
    pub is_available: bool,
    pub images: ImagePair,
}

/// A product flattened for display in a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTile {
    pub id: String,
    pub handle: String,
    pub available_for_sale: bool,
    pub title: String,
    /// Vendor name as configured in the catalog.
    pub brand: String,
    /// Minimum variant price. NaN when the catalog amount does not parse.
    pub price: f64,
    /// ISO 4217 currency code of `price`.
    pub currency: String,
    /// Sale percentage, `0.0` when the product is not on sale.
    pub discount: f64,
    pub featured_image: Option<TileImage>,
    /// Empty when the product has no "Color" option.
    pub colors: Vec<ColorGroup>,
    pub sizes: Vec<String>,
}

impl ProductTile {
    /// Looks up a color group by its option value.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<&ColorGroup> {
        self.colors.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount > 0.0
    }
}

/// How the representative variant of a color group is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseVariantRule {
    /// Only variants whose *first* metafield is keyed `color` qualify. A
    /// variant listing `second_image` ahead of `color` never becomes a base
    /// variant.
    #[default]
    FirstMetafield,
    /// Any variant carrying a `color` metafield at any position qualifies.
    AnyMetafield,
}

/// What a color group shows on hover when no `second_image` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecondaryImageFallback {
    /// Repeat the primary image.
    #[default]
    Primary,
    /// Show [`TileImage::placeholder`] with the primary's alt text.
    Placeholder,
    /// Show nothing.
    Hidden,
}

/// Policies applied while building tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileOptions {
    pub base_variant_rule: BaseVariantRule,
    pub secondary_image_fallback: SecondaryImageFallback,
}
