use crate::tile::{BaseVariantRule, SecondaryImageFallback, TileOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Validated startup configuration, built once and handed to the catalog
/// client and the tile builder.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Store domain without brackets, e.g. `"acme.myshopify.com"`.
    pub store_domain: String,
    pub access_token: String,
    /// Storefront API version segment, e.g. `"2024-01"`.
    pub api_version: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Collection handle fetched when the caller does not name one.
    pub collection_handle: String,
    pub base_variant_rule: BaseVariantRule,
    pub secondary_image_fallback: SecondaryImageFallback,
}

impl StorefrontConfig {
    /// Builder policies selected by this configuration.
    #[must_use]
    pub fn tile_options(&self) -> TileOptions {
        TileOptions {
            base_variant_rule: self.base_variant_rule,
            secondary_image_fallback: self.secondary_image_fallback,
        }
    }
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("store_domain", &self.store_domain)
            .field("access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("collection_handle", &self.collection_handle)
            .field("base_variant_rule", &self.base_variant_rule)
            .field("secondary_image_fallback", &self.secondary_image_fallback)
            .finish()
    }
}
