//! Response envelope decoding
//!
//! Every v3 response is wrapped as
//! `{"result": bool, "bk_error_msg": string, "data": ...}`. Success is decided
//! by `result` alone; the HTTP status never enters into it.

use crate::mapstr::MapStr;
use errors::{CmdbError, CmdbResult};
use serde_json::Value;

/// Decoded `{result, bk_error_msg, data}` wrapper
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
    pub result: bool,
    pub bk_error_msg: String,
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    /// Parse a response body
    ///
    /// Field lookups are lenient: a missing or oddly typed `result` counts as
    /// failure and a missing `bk_error_msg` reads as an empty message. Only a
    /// body that is not JSON at all is a decode error.
    pub fn parse(body: &[u8]) -> CmdbResult<Self> {
        let value: Value = serde_json::from_slice(body)?;

        let result = value.get("result").map(truthy).unwrap_or(false);
        let bk_error_msg = value
            .get("bk_error_msg")
            .map(text_of)
            .unwrap_or_default();
        let data = value.get("data").filter(|d| !d.is_null()).cloned();

        Ok(Self {
            result,
            bk_error_msg,
            data,
        })
    }

    /// Turn `result: false` into [`CmdbError::Server`], otherwise hand back `data`
    pub fn into_data(self) -> CmdbResult<Option<Value>> {
        if !self.result {
            tracing::debug!(message = %self.bk_error_msg, "Server reported failure");
            return Err(CmdbError::Server(self.bk_error_msg));
        }
        Ok(self.data)
    }
}

/// Read `data.id` as an integer, 0 when absent
pub fn data_id(data: Option<&Value>) -> i64 {
    match data.and_then(|d| d.get("id")) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Decode search `data`: a JSON-encoded array of objects
///
/// An absent field or empty string is [`CmdbError::EmptyData`]. A structured
/// array (not wrapped in a string) is accepted as-is.
pub fn decode_list(data: Option<Value>) -> CmdbResult<Vec<MapStr>> {
    let list: Option<Vec<MapStr>> = match data {
        None => return Err(CmdbError::EmptyData),
        Some(Value::String(s)) if s.is_empty() => return Err(CmdbError::EmptyData),
        Some(Value::String(s)) => serde_json::from_str(&s)?,
        Some(other) => serde_json::from_value(other)?,
    };
    Ok(list.unwrap_or_default())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim(), "true" | "TRUE" | "True" | "1" | "t" | "T"),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
