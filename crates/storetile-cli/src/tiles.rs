//! Command handlers that produce tiles, from the live API or a saved payload.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use storetile_core::{Badge, HeroImage, ProductTile, StorefrontConfig, TileOptions, TileView};
use storetile_storefront::types::{CollectionProductsData, GraphQlResponse};
use storetile_storefront::{build_product_tiles, CollectionQuery, RawProduct, StorefrontClient};

/// Shapes accepted by `build` and `preview`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SavedPayload {
    One(Box<RawProduct>),
    Many(Vec<RawProduct>),
    Response(GraphQlResponse<CollectionProductsData>),
}

impl SavedPayload {
    pub(crate) fn into_products(self) -> Vec<RawProduct> {
        match self {
            SavedPayload::One(product) => vec![*product],
            SavedPayload::Many(products) => products,
            SavedPayload::Response(response) => response
                .data
                .and_then(|data| data.collection)
                .map(|collection| collection.products)
                .unwrap_or_default(),
        }
    }
}

/// Fetch one collection and print its tiles as a JSON array.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the fetch fails. A
/// collection that does not exist prints `[]`.
pub(crate) async fn run_fetch_tiles(
    config: &StorefrontConfig,
    collection: Option<&str>,
    sort_key: Option<&str>,
    reverse: bool,
    pretty: bool,
) -> anyhow::Result<()> {
    let handle = collection.unwrap_or(config.collection_handle.as_str());
    let query = collection_query(handle, sort_key, reverse);

    let client = StorefrontClient::from_config(config)?;
    let products = client
        .fetch_collection_products(&query)
        .await
        .with_context(|| format!("fetching collection '{handle}'"))?;

    let tiles = build_product_tiles(&products, &config.tile_options());
    print_json(&tiles, pretty)
}

/// `--reverse` applies with or without a sort key.
pub(crate) fn collection_query(
    handle: &str,
    sort_key: Option<&str>,
    reverse: bool,
) -> CollectionQuery {
    let query = CollectionQuery::new(handle);
    match sort_key {
        Some(key) => query.sorted_by(key, reverse),
        None if reverse => query.reversed(true),
        None => query,
    }
}

/// Build tiles from a saved payload file and print them as a JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub(crate) fn run_build_tiles(
    input: &Path,
    options: &TileOptions,
    pretty: bool,
) -> anyhow::Result<()> {
    let products = load_products(input)?;
    let tiles = build_product_tiles(&products, options);
    print_json(&tiles, pretty)
}

/// Print a text summary of each tile's interactive state, optionally after
/// selecting a color.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub(crate) fn run_preview(
    input: &Path,
    select: Option<&str>,
    options: &TileOptions,
) -> anyhow::Result<()> {
    let products = load_products(input)?;
    for tile in build_product_tiles(&products, options) {
        let mut view = TileView::new(tile);
        if let Some(color) = select {
            if !view.select_color(color) {
                tracing::info!(handle = %view.tile().handle, color, "color not offered; keeping initial selection");
            }
        }
        println!("{}", render_preview(&view));
    }
    Ok(())
}

fn load_products(input: &Path) -> anyhow::Result<Vec<RawProduct>> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let payload: SavedPayload = serde_json::from_str(&raw)
        .with_context(|| format!("decoding {} as a product payload", input.display()))?;
    let products = payload.into_products();
    tracing::debug!(path = %input.display(), products = products.len(), "loaded saved payload");
    Ok(products)
}

fn print_json(tiles: &[ProductTile], pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(tiles)?
    } else {
        serde_json::to_string(tiles)?
    };
    println!("{out}");
    Ok(())
}

/// One block of plain text per tile.
pub(crate) fn render_preview(view: &TileView) -> String {
    let tile = view.tile();
    let price = view.price_display();
    let mut lines = vec![format!("{} ({}) by {}", tile.title, tile.handle, tile.brand)];

    match &price.discounted_price {
        Some(discounted) => lines.push(format!(
            "  price: {discounted} {} (was {}, -{}%)",
            price.currency, price.price, price.discount
        )),
        None => lines.push(format!("  price: {} {}", price.price, price.currency)),
    }

    let badges: Vec<&str> = view.badges().into_iter().map(Badge::label).collect();
    if !badges.is_empty() {
        lines.push(format!("  badges: {}", badges.join(", ")));
    }

    for swatch in view.swatches() {
        let marker = if swatch.is_selected { "*" } else { " " };
        let stock = if swatch.is_available { "" } else { " (sold out)" };
        lines.push(format!("  {marker} {} {}{stock}", swatch.name, swatch.code));
    }

    match view.hero() {
        HeroImage::ColorPair(pair) => {
            lines.push(format!(
                "  image: {} [{}]",
                pair.primary.url,
                view.alt_text(&pair.primary)
            ));
            if let Some(secondary) = &pair.secondary {
                lines.push(format!(
                    "  hover: {} [{}]",
                    secondary.url,
                    view.alt_text(secondary)
                ));
            }
        }
        HeroImage::Featured(Some(image)) => {
            lines.push(format!("  image: {} [{}]", image.url, view.alt_text(image)));
        }
        HeroImage::Featured(None) | HeroImage::Empty => lines.push("  image: none".to_string()),
    }

    if !tile.sizes.is_empty() {
        lines.push(format!("  sizes: {}", tile.sizes.join(" ")));
    }

    lines.join("\n")
}
