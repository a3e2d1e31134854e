pub mod client;
mod decode;
pub mod error;
pub mod parse;
pub mod query;
pub mod tile;
pub mod types;

pub use client::StorefrontClient;
pub use error::StorefrontError;
pub use query::CollectionQuery;
pub use tile::{build_product_tile, build_product_tile_with, build_product_tiles};
pub use types::{RawProduct, RawVariant};
