//! In-memory transport for unit tests

use crate::transport::HttpTransport;
use async_trait::async_trait;
use bytes::Bytes;
use errors::{CmdbError, CmdbResult};
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;

/// One request seen by [`RecordingTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

#[derive(Debug)]
enum Reply {
    Body(Bytes),
    Fail(String),
}

/// Transport that records every request and answers with a canned reply
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    calls: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn replying(body: impl Into<Bytes>) -> Self {
        Self {
            reply: Reply::Body(body.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying_json(value: Value) -> Self {
        Self::replying(value.to_string())
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Fail(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<Bytes>,
    ) -> CmdbResult<Bytes> {
        self.calls.lock().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });

        match &self.reply {
            Reply::Body(bytes) => Ok(bytes.clone()),
            Reply::Fail(message) => Err(CmdbError::Transport(message.clone())),
        }
    }
}
