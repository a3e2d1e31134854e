use crate::app_config::{Environment, StorefrontConfig};
use crate::tile::{BaseVariantRule, SecondaryImageFallback};
use crate::ConfigError;

/// Variables without which the catalog cannot be fetched.
const REQUIRED_ENV_VARS: [&str; 2] = ["SHOPIFY_STORE_DOMAIN", "SHOPIFY_STOREFRONT_ACCESS_TOKEN"];

/// Load storefront configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_storefront_config() -> Result<StorefrontConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_storefront_config_from_env()
}

/// Load storefront configuration from environment variables already in the process.
///
/// Unlike [`load_storefront_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_storefront_config_from_env() -> Result<StorefrontConfig, ConfigError> {
    build_storefront_config(|key| std::env::var(key))
}

/// Build storefront configuration using the provided env-var lookup function.
///
/// Parsing and validation live here, decoupled from the process environment so
/// tests can drive it with a plain `HashMap`.
fn build_storefront_config<F>(lookup: F) -> Result<StorefrontConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // An empty value is as useless as an unset one.
    let present = |var: &str| lookup(var).ok().filter(|v| !v.is_empty());

    let missing: Vec<String> = REQUIRED_ENV_VARS
        .into_iter()
        .filter(|var| present(*var).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingEnvVars(missing));
    }

    let store_domain = present("SHOPIFY_STORE_DOMAIN").unwrap_or_default();
    let access_token = present("SHOPIFY_STOREFRONT_ACCESS_TOKEN").unwrap_or_default();

    if store_domain.contains('[') || store_domain.contains(']') {
        return Err(ConfigError::BracketedStoreDomain);
    }

    let or_default = |var: &str, default: &str| -> String {
        present(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_version = or_default("SHOPIFY_STOREFRONT_API_VERSION", "2024-01");
    let env = parse_environment(&or_default("STORETILE_ENV", "development"))?;
    let log_level = or_default("STORETILE_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("STORETILE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STORETILE_USER_AGENT", "storetile/0.1 (catalog-tiles)");
    let collection_handle = or_default("STORETILE_COLLECTION", "frontpage");
    let base_variant_rule =
        parse_base_variant_rule(&or_default("STORETILE_BASE_VARIANT_RULE", "first-metafield"))?;
    let secondary_image_fallback = parse_secondary_image_fallback(&or_default(
        "STORETILE_SECONDARY_IMAGE_FALLBACK",
        "primary",
    ))?;

    Ok(StorefrontConfig {
        store_domain,
        access_token,
        api_version,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        collection_handle,
        base_variant_rule,
        secondary_image_fallback,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STORETILE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_base_variant_rule(s: &str) -> Result<BaseVariantRule, ConfigError> {
    match s {
        "first-metafield" => Ok(BaseVariantRule::FirstMetafield),
        "any-metafield" => Ok(BaseVariantRule::AnyMetafield),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STORETILE_BASE_VARIANT_RULE".to_string(),
            reason: format!("expected first-metafield or any-metafield, got \"{other}\""),
        }),
    }
}

fn parse_secondary_image_fallback(s: &str) -> Result<SecondaryImageFallback, ConfigError> {
    match s {
        "primary" => Ok(SecondaryImageFallback::Primary),
        "placeholder" => Ok(SecondaryImageFallback::Placeholder),
        "hidden" => Ok(SecondaryImageFallback::Hidden),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STORETILE_SECONDARY_IMAGE_FALLBACK".to_string(),
            reason: format!("expected primary, placeholder or hidden, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
