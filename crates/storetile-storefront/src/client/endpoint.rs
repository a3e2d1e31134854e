//! Storefront GraphQL endpoint construction.

use crate::error::StorefrontError;

/// Prefixes `value` with `prefix` unless it already starts with it.
#[must_use]
pub fn ensure_starts_with(value: &str, prefix: &str) -> String {
    if value.starts_with(prefix) {
        value.to_owned()
    } else {
        format!("{prefix}{value}")
    }
}

/// Builds `https://{domain}/api/{api_version}/graphql.json`.
///
/// `store_domain` may be a bare host (`"acme.myshopify.com"`) or already carry
/// a scheme. Any path on the domain is discarded.
///
/// # Errors
///
/// Returns [`StorefrontError::InvalidEndpoint`] if the domain does not form a
/// valid URL.
pub fn graphql_endpoint(store_domain: &str, api_version: &str) -> Result<String, StorefrontError> {
    let base = if store_domain.starts_with("http://") {
        store_domain.to_owned()
    } else {
        ensure_starts_with(store_domain, "https://")
    };

    let mut url = reqwest::Url::parse(&base).map_err(|e| StorefrontError::InvalidEndpoint {
        domain: store_domain.to_owned(),
        reason: e.to_string(),
    })?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(StorefrontError::InvalidEndpoint {
            domain: store_domain.to_owned(),
            reason: "no host".to_owned(),
        });
    }

    url.set_path(&format!("api/{api_version}/graphql.json"));
    url.set_query(None);
    Ok(url.to_string())
}
