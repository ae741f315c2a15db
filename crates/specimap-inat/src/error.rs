use thiserror::Error;

/// Errors returned by the observation API client.
#[derive(Debug, Error)]
pub enum InatError {
    /// The search descriptor cannot be turned into a well-formed query
    /// (empty specimen name, out-of-range coordinate, unparsable date).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Network or TLS failure, or a non-2xx status, from the underlying
    /// HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
