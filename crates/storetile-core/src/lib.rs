mod app_config;
mod config;
pub mod tile;
pub mod view;

use thiserror::Error;

pub use app_config::{Environment, StorefrontConfig};
pub use config::{load_storefront_config, load_storefront_config_from_env};
pub use tile::{
    BaseVariantRule, ColorGroup, ImagePair, ProductTile, SecondaryImageFallback, TileImage,
    TileOptions,
};
pub use view::{Badge, HeroImage, PriceDisplay, Swatch, TileView};

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variables that are unset or empty, in declaration order.
    #[error(
        "the following environment variables are missing; the storefront will not work without them: {}",
        .0.join(", ")
    )]
    MissingEnvVars(Vec<String>),

    #[error(
        "SHOPIFY_STORE_DOMAIN includes brackets (`[` and/or `]`); remove them and try again"
    )]
    BracketedStoreDomain,

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
