//! Object attribute operations
//!
//! Four calls against the `/api/v3/object/attr` sub-resource:
//!
//! | Operation | Request |
//! |---|---|
//! | create | `POST   {base}/api/v3/object/attr` |
//! | delete | `DELETE {base}/api/v3/object/attr/{id}` |
//! | update | `PUT    {base}/api/v3/object/attr/{id}` |
//! | search | `POST   {base}/api/v3/object/attr/search` |
//!
//! Each call is one round trip. Nothing is retried.

use crate::condition::Condition;
use crate::envelope::{data_id, decode_list, ResponseEnvelope};
use crate::mapstr::MapStr;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use bytes::Bytes;
use errors::CmdbResult;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::sync::Arc;
use tracing::debug;

const ATTRIBUTE_PATH: &str = "/api/v3/object/attr";

/// Attribute operations of the v3 API
#[async_trait]
pub trait AttributeApi: Send + Sync {
    /// Create an attribute, returning the id assigned by the server
    async fn create_object_attribute(&self, data: &MapStr) -> CmdbResult<i64>;

    /// Delete the attribute whose `id` the condition names
    async fn delete_object_attribute(&self, cond: &dyn Condition) -> CmdbResult<()>;

    /// Overwrite fields of the attribute whose `id` the condition names
    async fn update_object_attribute(&self, data: &MapStr, cond: &dyn Condition)
        -> CmdbResult<()>;

    /// List attributes matching the condition, in server order
    async fn search_object_attributes(&self, cond: &dyn Condition) -> CmdbResult<Vec<MapStr>>;
}

/// Attribute client bound to one base address and transport
#[derive(Clone)]
pub struct AttributeClient {
    address: String,
    transport: Arc<dyn HttpTransport>,
}

impl AttributeClient {
    pub fn new(address: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            address: normalize_address(address.into()),
            transport,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.address, ATTRIBUTE_PATH)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.address, ATTRIBUTE_PATH, id)
    }

    fn search_url(&self) -> String {
        format!("{}{}/search", self.address, ATTRIBUTE_PATH)
    }
}

#[async_trait]
impl AttributeApi for AttributeClient {
    async fn create_object_attribute(&self, data: &MapStr) -> CmdbResult<i64> {
        let url = self.collection_url();
        let body = Bytes::from(data.to_json()?);

        let rst = self.transport.post(&url, &json_headers(), Some(body)).await?;
        let data = ResponseEnvelope::parse(&rst)?.into_data()?;

        let id = data_id(data.as_ref());
        debug!(id, "Created object attribute");
        Ok(id)
    }

    async fn delete_object_attribute(&self, cond: &dyn Condition) -> CmdbResult<()> {
        let id = cond.to_map_str().int("id")?;
        let url = self.item_url(id);

        let rst = self.transport.delete(&url, &HeaderMap::new(), None).await?;
        ResponseEnvelope::parse(&rst)?.into_data()?;

        debug!(id, "Deleted object attribute");
        Ok(())
    }

    async fn update_object_attribute(
        &self,
        data: &MapStr,
        cond: &dyn Condition,
    ) -> CmdbResult<()> {
        let id = cond.to_map_str().int("id")?;
        let url = self.item_url(id);
        let body = Bytes::from(data.to_json()?);

        let rst = self.transport.put(&url, &json_headers(), Some(body)).await?;
        ResponseEnvelope::parse(&rst)?.into_data()?;

        debug!(id, "Updated object attribute");
        Ok(())
    }

    async fn search_object_attributes(&self, cond: &dyn Condition) -> CmdbResult<Vec<MapStr>> {
        let url = self.search_url();
        let body = Bytes::from(cond.to_map_str().to_json()?);

        let rst = self.transport.post(&url, &json_headers(), Some(body)).await?;
        let data = ResponseEnvelope::parse(&rst)?.into_data()?;

        let attrs = decode_list(data)?;
        debug!(count = attrs.len(), "Searched object attributes");
        Ok(attrs)
    }
}

/// Trim one trailing `/` so paths join without `//`
pub(crate) fn normalize_address(address: String) -> String {
    match address.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => address,
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
