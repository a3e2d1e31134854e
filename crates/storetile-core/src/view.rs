//! Per-tile presentation state: selected color, displayed images, and the
//! derived price and badge data a grid renders.
//!
//! Each [`TileView`] owns its tile and is the only writer of its state.

use serde::Serialize;

use crate::tile::{ImagePair, ProductTile, TileImage};

/// Prices as shown on a tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDisplay {
    pub price: f64,
    /// `price - price * discount / 100`, present only when a discount applies.
    pub discounted_price: Option<String>,
    pub currency: String,
    pub discount: f64,
}

impl PriceDisplay {
    fn for_tile(tile: &ProductTile) -> Self {
        // NaN and zero both mean "no discount".
        let has_discount = tile.discount != 0.0 && !tile.discount.is_nan();
        let discounted_price = has_discount
            .then(|| format_amount(tile.price - tile.price * tile.discount / 100.0));
        Self {
            price: tile.price,
            discounted_price,
            currency: tile.currency.clone(),
            discount: tile.discount,
        }
    }

    /// Whether the strike-through layout applies.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.discount > 0.0
    }
}

/// Shortest decimal that round-trips, e.g. `40.0` renders as `"40"`.
fn format_amount(amount: f64) -> String {
    format!("{amount}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    OnSale,
    SoldOut,
}

impl Badge {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Badge::OnSale => "On Sales!",
            Badge::SoldOut => "Sold Out!",
        }
    }
}

/// The image block at the top of a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroImage<'a> {
    /// Multi-color products: the selected color's pair, secondary shown on hover.
    ColorPair(&'a ImagePair),
    /// Single-color products fall back to the product's featured image.
    Featured(Option<&'a TileImage>),
    /// Multi-color product whose first color had no images to show.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swatch<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub is_available: bool,
    pub is_selected: bool,
}

/// Interactive state for one rendered tile.
#[derive(Debug, Clone)]
pub struct TileView {
    tile: ProductTile,
    selected_color: String,
    displayed_images: Option<ImagePair>,
    is_available: bool,
    price: PriceDisplay,
}

impl TileView {
    /// Initializes state from the tile's first color group. Availability
    /// starts `true` regardless of that group.
    #[must_use]
    pub fn new(tile: ProductTile) -> Self {
        let first = tile.colors.first();
        let selected_color = first.map(|c| c.name.clone()).unwrap_or_default();
        let displayed_images = first.map(|c| c.images.clone());
        let price = PriceDisplay::for_tile(&tile);
        Self {
            tile,
            selected_color,
            displayed_images,
            is_available: true,
            price,
        }
    }

    /// Switches to the named color. Returns `false` and leaves state untouched
    /// when the tile has no such color.
    pub fn select_color(&mut self, name: &str) -> bool {
        let Some(group) = self.tile.color(name) else {
            tracing::debug!(handle = %self.tile.handle, color = name, "ignoring unknown color");
            return false;
        };
        self.displayed_images = Some(group.images.clone());
        self.is_available = group.is_available;
        self.selected_color = group.name.clone();
        true
    }

    #[must_use]
    pub fn tile(&self) -> &ProductTile {
        &self.tile
    }

    #[must_use]
    pub fn selected_color(&self) -> &str {
        &self.selected_color
    }

    #[must_use]
    pub fn displayed_images(&self) -> Option<&ImagePair> {
        self.displayed_images.as_ref()
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    #[must_use]
    pub fn price_display(&self) -> &PriceDisplay {
        &self.price
    }

    #[must_use]
    pub fn badges(&self) -> Vec<Badge> {
        let mut badges = Vec::new();
        if self.price.is_on_sale() {
            badges.push(Badge::OnSale);
        }
        if !self.is_available {
            badges.push(Badge::SoldOut);
        }
        badges
    }

    #[must_use]
    pub fn hero(&self) -> HeroImage<'_> {
        if self.tile.colors.len() > 1 {
            self.displayed_images
                .as_ref()
                .map_or(HeroImage::Empty, HeroImage::ColorPair)
        } else {
            HeroImage::Featured(self.tile.featured_image.as_ref())
        }
    }

    #[must_use]
    pub fn swatches(&self) -> Vec<Swatch<'_>> {
        self.tile
            .colors
            .iter()
            .map(|c| Swatch {
                name: &c.name,
                code: &c.code,
                is_available: c.is_available,
                is_selected: c.name == self.selected_color,
            })
            .collect()
    }

    /// Alt text for `image`, falling back to the product title.
    #[must_use]
    pub fn alt_text<'a>(&'a self, image: &'a TileImage) -> &'a str {
        image.alt().unwrap_or(&self.tile.title)
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
