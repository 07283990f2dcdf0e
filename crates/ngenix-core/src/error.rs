use thiserror::Error;

/// Result type alias for NGENIX operations
pub type Result<T> = std::result::Result<T, NgenixError>;

/// Errors that can occur while managing challenge records
#[derive(Error, Debug)]
pub enum NgenixError {
    /// Authentication failed - invalid name, token or customer id
    #[error("authentication failed: NGENIX rejected the supplied credentials")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credentials are missing or malformed
    #[error("invalid credentials: {0}")]
    Credentials(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// No DNS zone on the account matches the domain
    #[error("no DNS zone found for domain {domain}")]
    ZoneNotFound {
        /// Domain the zone was looked up for
        domain: String,
    },

    /// A record handle could not be parsed
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// The challenge value did not become visible before the deadline
    #[error("TXT record {record} did not propagate within {elapsed_secs} seconds")]
    PropagationTimeout {
        /// Fully qualified record name that was polled
        record: String,
        /// Seconds spent polling
        elapsed_secs: u64,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl NgenixError {
    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Credentials(_))
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
