use aws_sdk_sesv2::primitives::Blob;
use aws_sdk_sesv2::types::{Destination, EmailContent, RawMessage};
use courier_core::{RawTransport, SendResponse, TransportError};
use tracing::{debug, error, info};

use crate::config::SesConfig;

/// AWS SES transport implementing the raw-send operation.
///
/// Uses the `SESv2` `SendEmail` API with raw message content, so the payload
/// must be a fully formed MIME message including headers. SES accepts up to
/// 50 recipients per call and the account's standard sending limits apply.
pub struct SesTransport {
    config: SesConfig,
    client: aws_sdk_sesv2::Client,
}

impl std::fmt::Debug for SesTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesTransport")
            .field("config", &self.config)
            .field("client", &"<SesV2Client>")
            .finish()
    }
}

impl SesTransport {
    /// Create a new `SesTransport` by building an AWS SDK client from the
    /// given credentials/region bundle.
    pub async fn new(config: SesConfig) -> Self {
        let credentials = aws_sdk_sesv2::config::Credentials::new(
            config.key.clone(),
            config.secret.clone(),
            None,
            None,
            "courier-ses",
        );

        let mut loader = aws_config::from_env()
            .region(aws_config::Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint_url {
            debug!(endpoint = %endpoint, "using custom SES endpoint");
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let client = aws_sdk_sesv2::Client::new(&sdk_config);
        Self { config, client }
    }

    /// Create a `SesTransport` with a pre-built client (for testing).
    pub fn with_client(config: SesConfig, client: aws_sdk_sesv2::Client) -> Self {
        Self { config, client }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SesConfig {
        &self.config
    }
}

impl RawTransport for SesTransport {
    fn name(&self) -> &str {
        "ses"
    }

    async fn send_raw(
        &self,
        destinations: &[String],
        raw_message: &[u8],
    ) -> Result<SendResponse, TransportError> {
        debug!(
            recipients = destinations.len(),
            bytes = raw_message.len(),
            "sending raw email via SES"
        );

        let mut destination = Destination::builder();
        for address in destinations {
            destination = destination.to_addresses(address);
        }

        let raw = RawMessage::builder()
            .data(Blob::new(raw_message.to_vec()))
            .build()
            .map_err(|e| TransportError::InvalidMessage(e.to_string()))?;
        let content = EmailContent::builder().raw(raw).build();

        let result = self
            .client
            .send_email()
            .destination(destination.build())
            .content(content)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, "SES send_email failed");
                classify_sdk_error(&err_str)
            })?;

        let message_id = result.message_id().unwrap_or_default().to_owned();
        info!(message_id = %message_id, "SES raw email accepted");

        Ok(SendResponse::success(message_id))
    }

    async fn health_check(&self) -> Result<(), TransportError> {
        debug!("performing SES health check");
        self.client.get_account().send().await.map_err(|e| {
            error!(error = %e, "SES health check failed");
            TransportError::Connection(format!("SES health check failed: {e}"))
        })?;
        info!("SES health check passed");
        Ok(())
    }
}

/// Classify an AWS SDK error string into the appropriate [`TransportError`].
///
/// The SDK surfaces most failures only as display strings, so this helper
/// inspects the message for common patterns (throttling, timeout,
/// connection) and maps them to the matching variant.
fn classify_sdk_error(error_str: &str) -> TransportError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl") || lower.contains("rate exceed") || lower.contains("too many") {
        TransportError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        TransportError::Timeout(error_str.to_owned())
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        TransportError::Connection(error_str.to_owned())
    } else {
        TransportError::Service(error_str.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> aws_sdk_sesv2::Client {
        let conf = aws_sdk_sesv2::Config::builder()
            .behavior_version(aws_sdk_sesv2::config::BehaviorVersion::latest())
            .build();
        aws_sdk_sesv2::Client::from_conf(conf)
    }

    #[test]
    fn classify_throttled() {
        let err = classify_sdk_error("Throttling: Rate exceeded");
        assert!(matches!(err, TransportError::Throttled));
    }

    #[test]
    fn classify_timeout() {
        let err = classify_sdk_error("Request timed out after 30s");
        assert!(matches!(err, TransportError::Timeout(_)));
    }

    #[test]
    fn classify_connection() {
        let err = classify_sdk_error("dispatch failure: Connection reset by peer");
        assert!(matches!(err, TransportError::Connection(_)));
        assert!(err.is_connection_reset());
    }

    #[test]
    fn classify_generic_service_error() {
        let err = classify_sdk_error("MessageRejected: Email address is not verified");
        assert!(matches!(err, TransportError::Service(_)));
    }

    #[test]
    fn with_client_keeps_config() {
        let config = SesConfig::new("AKIA123", "hunter2", "us-east-1");
        let transport = SesTransport::with_client(config, test_client());
        assert_eq!(transport.config().region, "us-east-1");
        assert_eq!(RawTransport::name(&transport), "ses");
    }

    #[test]
    fn debug_format_redacts_secret() {
        let config = SesConfig::new("AKIA123", "hunter2", "us-east-1");
        let transport = SesTransport::with_client(config, test_client());
        let debug = format!("{transport:?}");
        assert!(debug.contains("SesTransport"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }
}
