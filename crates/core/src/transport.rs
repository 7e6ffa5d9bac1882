use async_trait::async_trait;

use crate::error::TransportError;
use crate::response::SendResponse;

/// Strongly-typed raw email transport with native `async fn`.
///
/// The raw-send operation is the sole wire operation of the provider: it
/// takes a destination list and a fully formed message payload (headers
/// included) and returns the provider's response verbatim.
///
/// This trait is **not** object-safe because it uses native `async fn`
/// methods (which desugar to opaque `impl Future` return types). If you need
/// dynamic dispatch, use [`DynRawTransport`] instead -- every `RawTransport`
/// automatically implements `DynRawTransport` via a blanket implementation.
pub trait RawTransport: Send + Sync {
    /// Returns the unique name of this transport.
    fn name(&self) -> &str;

    /// Send a raw message to the given destinations.
    fn send_raw(
        &self,
        destinations: &[String],
        raw_message: &[u8],
    ) -> impl std::future::Future<Output = Result<SendResponse, TransportError>> + Send;

    /// Perform a health check to verify the transport is operational.
    fn health_check(&self) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}

/// Object-safe transport trait for use behind `Arc<dyn DynRawTransport>`.
///
/// Uses [`macro@async_trait`] to enable dynamic dispatch of async methods.
/// You generally should not implement this trait directly -- instead
/// implement [`RawTransport`] and rely on the blanket implementation.
#[async_trait]
pub trait DynRawTransport: Send + Sync {
    /// Returns the unique name of this transport.
    fn name(&self) -> &str;

    /// Send a raw message to the given destinations.
    async fn send_raw(
        &self,
        destinations: &[String],
        raw_message: &[u8],
    ) -> Result<SendResponse, TransportError>;

    /// Perform a health check to verify the transport is operational.
    async fn health_check(&self) -> Result<(), TransportError>;
}

/// Blanket implementation: any type that implements [`RawTransport`] also
/// implements [`DynRawTransport`], bridging the static and dynamic dispatch
/// worlds.
#[async_trait]
impl<T: RawTransport + Sync> DynRawTransport for T {
    fn name(&self) -> &str {
        RawTransport::name(self)
    }

    async fn send_raw(
        &self,
        destinations: &[String],
        raw_message: &[u8],
    ) -> Result<SendResponse, TransportError> {
        RawTransport::send_raw(self, destinations, raw_message).await
    }

    async fn health_check(&self) -> Result<(), TransportError> {
        RawTransport::health_check(self).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    /// A mock transport for testing the trait and blanket impl.
    struct MockTransport {
        transport_name: String,
        should_fail: bool,
    }

    impl MockTransport {
        fn new(name: &str, should_fail: bool) -> Self {
            Self {
                transport_name: name.to_owned(),
                should_fail,
            }
        }
    }

    impl RawTransport for MockTransport {
        fn name(&self) -> &str {
            &self.transport_name
        }

        async fn send_raw(
            &self,
            _destinations: &[String],
            _raw_message: &[u8],
        ) -> Result<SendResponse, TransportError> {
            if self.should_fail {
                return Err(TransportError::Service("mock failure".into()));
            }
            Ok(SendResponse::success("mock-id"))
        }

        async fn health_check(&self) -> Result<(), TransportError> {
            if self.should_fail {
                return Err(TransportError::Connection("mock unhealthy".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn transport_send_raw_success() {
        let transport = MockTransport::new("test", false);
        let response = RawTransport::send_raw(&transport, &["a@example.com".into()], b"raw")
            .await
            .unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn transport_send_raw_failure() {
        let transport = MockTransport::new("test", true);
        let err = RawTransport::send_raw(&transport, &["a@example.com".into()], b"raw")
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Service(_)));
    }

    #[tokio::test]
    async fn blanket_dyn_transport_impl() {
        let transport: Arc<dyn DynRawTransport> = Arc::new(MockTransport::new("dyn-test", false));
        assert_eq!(transport.name(), "dyn-test");

        let response = transport
            .send_raw(&["a@example.com".into()], b"raw")
            .await
            .unwrap();
        assert_eq!(response.message_id.as_deref(), Some("mock-id"));

        transport.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn dyn_transport_health_check_failure() {
        let transport: Arc<dyn DynRawTransport> = Arc::new(MockTransport::new("sick", true));
        let err = transport.health_check().await.unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
    }
}
