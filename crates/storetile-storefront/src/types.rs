//! Storefront GraphQL response types for the collection products query.
//!
//! ## Observed payload shape
//!
//! ### Connections
//! `variants`, `images` and collection `products` arrive as
//! `{ "edges": [{ "node": { ... } }] }`. They are flattened to plain `Vec`s
//! while decoding (see [`crate::decode::nodes`]), so nothing downstream ever
//! walks edges.
//!
//! ### Metafields
//! The query asks for metafields by identifier. Identifiers that are not set
//! on a product or variant come back as `null` entries **in place**, e.g.
//! `[null, {"key": "second_image", ...}]`. Product metafields drop those
//! entries on decode. Variant metafields keep them, because base-variant
//! selection looks at position 0 and a leading `null` must not let a later
//! `color` entry slide into that slot.
//!
//! ### Money
//! Amounts are decimal strings (`"29.99"`), kept as-is here and parsed only
//! when building tiles.
//!
//! ### Images
//! `altText` is `null` for most merchant uploads. `width`/`height` are present
//! for media images but modelled as optional.

use serde::Deserialize;

use crate::decode::{non_null, nodes, positional};

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default, deserialize_with = "non_null")]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` of the `getCollectionProducts` query.
#[derive(Debug, Deserialize)]
pub struct CollectionProductsData {
    /// `null` when no collection has the requested handle.
    pub collection: Option<RawCollection>,
}

#[derive(Debug, Deserialize)]
pub struct RawCollection {
    #[serde(default, deserialize_with = "nodes")]
    pub products: Vec<RawProduct>,
}

/// A product as returned by the Storefront API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Global ID, e.g. `"gid://shopify/Product/123"`.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub available_for_sale: bool,
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub options: Vec<RawOption>,
    #[serde(default, deserialize_with = "non_null")]
    pub metafields: Vec<RawMetafield>,
    pub price_range: PriceRange,
    #[serde(default)]
    pub compare_at_price_range: Option<PriceRange>,
    #[serde(default, deserialize_with = "nodes")]
    pub variants: Vec<RawVariant>,
    #[serde(default)]
    pub featured_image: Option<RawImage>,
    #[serde(default, deserialize_with = "nodes")]
    pub images: Vec<RawImage>,
}

/// A product option such as `Color` or `Size` with its ordered values.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOption {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "non_null")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub available_for_sale: bool,
    #[serde(default)]
    pub image: Option<RawImage>,
    #[serde(default, deserialize_with = "non_null")]
    pub selected_options: Vec<SelectedOption>,
    /// Only `color_variant.color` and `color_variant.second_image` are queried.
    /// Unset identifiers stay in place as `None`.
    #[serde(default, deserialize_with = "positional")]
    pub metafields: Vec<Option<RawMetafield>>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
}

impl RawVariant {
    /// Value of the selected option called `name`, e.g. `"Red"` for `"Color"`.
    #[must_use]
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }

    /// Metafields that are actually set, in query order.
    #[must_use]
    pub fn set_metafields(&self) -> impl Iterator<Item = &RawMetafield> {
        self.metafields.iter().flatten()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMetafield {
    #[serde(default)]
    pub namespace: Option<String>,
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub reference: Option<MetafieldReference>,
}

/// `... on MediaImage { image { ... } }`. Other reference types decode with
/// `image: None`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetafieldReference {
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
    #[serde(default)]
    pub max_variant_price: Option<Money>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal string, e.g. `"29.99"`.
    pub amount: String,
    pub currency_code: String,
}
