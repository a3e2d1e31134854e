//! Building display tiles from decoded Storefront products.
//!
//! Numeric parsing is delegated to [`crate::parse`]; this module resolves
//! colors, swatches, images and the sale discount.

use storetile_core::tile::TRANSPARENT_SWATCH;
use storetile_core::{
    BaseVariantRule, ColorGroup, ImagePair, ProductTile, SecondaryImageFallback, TileImage,
    TileOptions,
};

use crate::parse::parse_float_prefix;
use crate::types::{RawImage, RawMetafield, RawOption, RawProduct, RawVariant};

const COLOR_OPTION: &str = "Color";
const SIZE_OPTION: &str = "Size";

const SALES_NAMESPACE: &str = "sales";
const DISCOUNT_KEY: &str = "discount";
const COLOR_VARIANT_NAMESPACE: &str = "color_variant";
const COLOR_KEY: &str = "color";
const SECOND_IMAGE_KEY: &str = "second_image";

/// Builds a [`ProductTile`] with the default [`TileOptions`].
#[must_use]
pub fn build_product_tile(product: &RawProduct) -> ProductTile {
    build_product_tile_with(product, &TileOptions::default())
}

/// Builds a [`ProductTile`] from a decoded product.
///
/// Never fails: absent images, metafields and options fall back to the
/// placeholder image, the transparent swatch, a `0` discount, or empty lists.
/// A price amount that does not parse yields `NaN`.
#[must_use]
pub fn build_product_tile_with(product: &RawProduct, options: &TileOptions) -> ProductTile {
    let sizes = collect_sizes(&product.options);

    let colors: Vec<ColorGroup> = distinct_colors(&product.variants)
        .into_iter()
        .map(|name| build_color_group(name, &product.variants, options))
        .collect();

    let discount = find_metafield(&product.metafields, SALES_NAMESPACE, DISCOUNT_KEY)
        .and_then(metafield_value)
        .and_then(parse_float_prefix)
        .unwrap_or(0.0);

    let min_price = &product.price_range.min_variant_price;
    let price = parse_float_prefix(&min_price.amount).unwrap_or(f64::NAN);
    if price.is_nan() {
        tracing::warn!(
            handle = %product.handle,
            amount = %min_price.amount,
            "minimum variant price is not numeric"
        );
    }

    ProductTile {
        id: product.id.clone(),
        handle: product.handle.clone(),
        available_for_sale: product.available_for_sale,
        title: product.title.clone(),
        brand: product.vendor.clone().unwrap_or_default(),
        price,
        currency: min_price.currency_code.clone(),
        discount,
        featured_image: product.featured_image.as_ref().map(tile_image),
        colors,
        sizes,
    }
}

/// Builds one tile per product, preserving order.
#[must_use]
pub fn build_product_tiles(products: &[RawProduct], options: &TileOptions) -> Vec<ProductTile> {
    let tiles: Vec<ProductTile> = products
        .iter()
        .map(|p| build_product_tile_with(p, options))
        .collect();
    tracing::debug!(count = tiles.len(), "built product tiles");
    tiles
}

/// Values of the option named exactly `"Size"`, empty values dropped.
fn collect_sizes(options: &[RawOption]) -> Vec<String> {
    options
        .iter()
        .filter(|option| option.name == SIZE_OPTION)
        .flat_map(|option| option.values.iter())
        .filter(|value| !value.is_empty())
        .cloned()
        .collect()
}

/// Distinct non-empty "Color" values in first-seen order.
fn distinct_colors(variants: &[RawVariant]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for value in variants.iter().filter_map(|v| v.option_value(COLOR_OPTION)) {
        if !value.is_empty() && !names.contains(&value) {
            names.push(value);
        }
    }
    names
}

fn build_color_group(name: &str, variants: &[RawVariant], options: &TileOptions) -> ColorGroup {
    let mut of_color = variants
        .iter()
        .filter(|v| v.option_value(COLOR_OPTION) == Some(name));

    let is_available = of_color.clone().any(|v| v.available_for_sale);
    let base = of_color.find(|v| is_base_variant(v, options.base_variant_rule));

    let code = base
        .and_then(|v| find_metafield(v.set_metafields(), COLOR_VARIANT_NAMESPACE, COLOR_KEY))
        .and_then(metafield_value)
        .unwrap_or(TRANSPARENT_SWATCH)
        .to_string();

    let primary = base
        .and_then(|v| v.image.as_ref())
        .map_or_else(TileImage::placeholder, tile_image);
    let secondary = resolve_secondary(base, &primary, options.secondary_image_fallback);

    ColorGroup {
        name: name.to_string(),
        code,
        is_available,
        images: ImagePair { primary, secondary },
    }
}

/// Under [`BaseVariantRule::FirstMetafield`] a `null` in position 0 counts
/// as "not `color`", even when a later entry is keyed `color`.
fn is_base_variant(variant: &RawVariant, rule: BaseVariantRule) -> bool {
    match rule {
        BaseVariantRule::FirstMetafield => variant
            .metafields
            .first()
            .and_then(Option::as_ref)
            .is_some_and(|m| m.key == COLOR_KEY),
        BaseVariantRule::AnyMetafield => variant.set_metafields().any(|m| m.key == COLOR_KEY),
    }
}

/// The `second_image` reference, or the configured fallback. Either way the
/// result inherits the primary's alt text when it has none of its own.
fn resolve_secondary(
    base: Option<&RawVariant>,
    primary: &TileImage,
    fallback: SecondaryImageFallback,
) -> Option<TileImage> {
    let referenced = base
        .and_then(|v| {
            find_metafield(v.set_metafields(), COLOR_VARIANT_NAMESPACE, SECOND_IMAGE_KEY)
        })
        .and_then(|m| m.reference.as_ref())
        .and_then(|r| r.image.as_ref())
        .map(tile_image);

    let image = match (referenced, fallback) {
        (Some(image), _) => Some(image),
        (None, SecondaryImageFallback::Primary) => Some(primary.clone()),
        (None, SecondaryImageFallback::Placeholder) => Some(TileImage::placeholder()),
        (None, SecondaryImageFallback::Hidden) => None,
    };

    image.map(|mut image| {
        if image.alt().is_none() {
            image.alt_text = primary.alt().map(str::to_owned);
        }
        image
    })
}

/// First metafield with `key`. The namespace must match when the payload
/// carries one; the query already scopes metafields by namespace.
fn find_metafield<'a>(
    metafields: impl IntoIterator<Item = &'a RawMetafield>,
    namespace: &str,
    key: &str,
) -> Option<&'a RawMetafield> {
    metafields.into_iter().find(|m| {
        m.key == key && m.namespace.as_deref().map_or(true, |ns| ns == namespace)
    })
}

fn metafield_value(metafield: &RawMetafield) -> Option<&str> {
    metafield.value.as_deref().filter(|v| !v.is_empty())
}

fn tile_image(image: &RawImage) -> TileImage {
    TileImage {
        url: image.url.clone(),
        width: image.width.unwrap_or(0),
        height: image.height.unwrap_or(0),
        alt_text: image.alt_text.clone(),
    }
}

#[cfg(test)]
#[path = "tile_test.rs"]
mod tests;
