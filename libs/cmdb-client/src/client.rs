//! v3 API root client

use crate::attribute::{normalize_address, AttributeClient};
use crate::config::ClientConfig;
use crate::transport::{HttpTransport, ReqwestTransport};
use errors::CmdbResult;
use std::sync::Arc;
use tracing::info;

/// Entry point for the v3 API
///
/// Holds the base address and a shared transport; resource clients are
/// handed out per call and are cheap to create.
#[derive(Clone)]
pub struct Client {
    address: String,
    transport: Arc<dyn HttpTransport>,
}

impl Client {
    pub fn new(address: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            address: normalize_address(address.into()),
            transport,
        }
    }

    /// Build a client with a `reqwest` transport from configuration
    pub fn from_config(config: &ClientConfig) -> CmdbResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout())?;
        info!(address = %config.address, timeout_ms = config.timeout_ms, "CMDB client ready");
        Ok(Self::new(config.address.clone(), Arc::new(transport)))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Object attribute operations
    pub fn attribute(&self) -> AttributeClient {
        AttributeClient::new(self.address.clone(), self.transport.clone())
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::attribute::AttributeApi;
    use crate::mapstr::MapStr;
    use crate::test_utils::RecordingTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_attribute_shares_address_and_transport() {
        let transport = Arc::new(RecordingTransport::replying_json(
            json!({"result": true, "data": {"id": 3}}),
        ));
        let client = Client::new("http://cmdb:80/", transport.clone());
        assert_eq!(client.address(), "http://cmdb:80");

        let id = client
            .attribute()
            .create_object_attribute(&MapStr::new().set("bk_property_id", "mem"))
            .await
            .unwrap();
        assert_eq!(id, 3);
        assert_eq!(transport.calls()[0].url, "http://cmdb:80/api/v3/object/attr");
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = ClientConfig {
            address: "ftp://cmdb".to_string(),
            ..Default::default()
        };
        assert!(Client::from_config(&config).is_err());
    }
}
