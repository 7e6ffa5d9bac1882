use serde::{Deserialize, Serialize};

/// Configuration for the AWS SES transport.
///
/// Holds the static credentials and region used to construct the SES
/// client, plus an optional endpoint URL override for local development
/// (e.g. `LocalStack`).
///
/// # Examples
///
/// ```
/// use courier_ses::SesConfig;
///
/// let config = SesConfig::new("AKIAEXAMPLE", "secret", "us-east-1");
/// assert_eq!(config.region, "us-east-1");
/// assert!(config.endpoint_url.is_none());
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct SesConfig {
    /// AWS access key id.
    pub key: String,

    /// AWS secret access key.
    pub secret: String,

    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Optional endpoint URL override for local development.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl std::fmt::Debug for SesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesConfig")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl SesConfig {
    /// Create a new `SesConfig` from a credentials/region bundle.
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            region: region.into(),
            endpoint_url: None,
        }
    }

    /// Set an endpoint URL override for local development.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}
