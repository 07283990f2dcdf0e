use std::fmt;

use crate::error::{NgenixError, Result};

/// NGENIX account credentials.
///
/// Supplied by the operator and held unchanged for the lifetime of the
/// process. Every API call authenticates with these values.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    customer_id: String,
    name: String,
    token: String,
}

impl Credentials {
    /// Create credentials, rejecting empty fields.
    pub fn new(
        customer_id: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            customer_id: customer_id.into().trim().to_string(),
            name: name.into().trim().to_string(),
            token: token.into().trim().to_string(),
        };

        for (field, value) in [
            ("customer id", &credentials.customer_id),
            ("name", &credentials.name),
            ("token", &credentials.token),
        ] {
            if value.is_empty() {
                return Err(NgenixError::Credentials(format!("{field} is empty")));
            }
        }

        Ok(credentials)
    }

    /// Customer id sent with zone listings
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Account name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// API token
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// User name for HTTP basic auth (`<name>/token`).
    #[must_use]
    pub fn basic_auth_user(&self) -> String {
        format!("{}/token", self.name)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("customer_id", &self.customer_id)
            .field("name", &self.name)
            .field("token", &"<redacted>")
            .finish()
    }
}
