//! Static bearer token authentication for Zephyr Scale.

/// API token issued by Zephyr Scale, sent as `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    #[cfg(test)]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Human-readable authentication scheme, reported by `get_api_info`.
    pub fn scheme(&self) -> &'static str {
        if self.0.is_empty() {
            "Not configured"
        } else {
            "JWT Bearer Token"
        }
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BearerToken").field(&"<redacted>").finish()
    }
}
