//! Transport abstraction consumed by Consul API clients.
//!
//! API clients build a path and a parameter list and hand both to a [`Transport`]; the
//! transport owns connection handling, query encoding and HTTP status mapping. The
//! production implementation is [`crate::Consul`]; tests substitute stubs.

use crate::params::Param;
use crate::Result;

/// Issues read requests against a Consul agent.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform a `GET` of `path` with the given parameters and return the raw body.
    ///
    /// # Arguments
    ///
    /// * `path` - Absolute API path with any caller-supplied segments already encoded
    /// * `params` - Optional parameters, encoded into the query string by the transport
    ///
    /// # Errors
    ///
    /// Returns a transport error on connection failure, timeout or non-2xx status.
    async fn get(&self, path: &str, params: &[Param]) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Consistency;
    use crate::Error;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_transport_mock() {
        let mut mock = MockTransport::new();

        mock.expect_get()
            .withf(|path, params| {
                path.to_string() == "/v1/catalog/datacenters"
                    && params.to_vec() == vec![Param::Consistency(Consistency::Stale)]
            })
            .times(1)
            .returning(|_, _| Ok(r#"["dc1"]"#.to_string()));

        let body = mock
            .get("/v1/catalog/datacenters", &[Consistency::Stale.into()])
            .await
            .unwrap();
        assert_eq!(body, r#"["dc1"]"#);
    }

    #[tokio::test]
    async fn test_transport_as_trait_object() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .returning(|_, _| Err(Error::ServiceUnavailable("agent down".to_string())));

        let transport: Arc<dyn Transport> = Arc::new(mock);
        let err = transport.get("/v1/status/leader", &[]).await.unwrap_err();
        assert!(err.is_transport_error());
    }
}
