use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("storefront API returned GraphQL errors: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("invalid storefront endpoint for domain \"{domain}\": {reason}")]
    InvalidEndpoint { domain: String, reason: String },
}
