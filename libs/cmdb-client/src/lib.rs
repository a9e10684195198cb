//! Client binding for the configuration-center v3 API
//!
//! Builds request URLs, serializes [`MapStr`] payloads to JSON, sends them
//! through an injected [`HttpTransport`] and unwraps the
//! `{result, bk_error_msg, data}` envelope.
//!
//! ```ignore
//! use cmdb_client::{AttributeApi, Client, ClientConfig, Cond, MapStr};
//!
//! let client = Client::from_config(&ClientConfig::load(None)?)?;
//! let attrs = client.attribute();
//! let id = attrs
//!     .create_object_attribute(&MapStr::new().set("bk_property_id", "cpu"))
//!     .await?;
//! attrs
//!     .delete_object_attribute(&Cond::new().field("id").eq(id))
//!     .await?;
//! ```

pub mod attribute;
pub mod client;
pub mod condition;
pub mod config;
pub mod envelope;
pub mod mapstr;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_utils;

pub use attribute::{AttributeApi, AttributeClient};
pub use client::Client;
pub use condition::{Cond, Condition, FieldCond, Operator};
pub use config::ClientConfig;
pub use envelope::ResponseEnvelope;
pub use errors::{CmdbError, CmdbErrorTrait, CmdbResult, ErrorCategory};
pub use mapstr::MapStr;
pub use transport::{HttpTransport, ReqwestTransport};
