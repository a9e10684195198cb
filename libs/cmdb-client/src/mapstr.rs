//! Ordered string-keyed JSON object with typed accessors
//!
//! `MapStr` is the payload type for every attribute request and the element
//! type of search results. Key order is preserved through serialization.

use errors::{CmdbError, CmdbResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered mapping from string keys to JSON values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapStr(Map<String, Value>);

impl MapStr {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Read `key` as an integer
    ///
    /// Accepts JSON integers within `i64` and floats without a fractional
    /// part. Anything else is a precondition failure naming the field.
    pub fn int(&self, key: &str) -> CmdbResult<i64> {
        match self.0.get(key) {
            None => Err(CmdbError::precondition(key, "field not found")),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                match n.as_f64() {
                    Some(f)
                        if n.is_f64()
                            && f.fract() == 0.0
                            && f >= i64::MIN as f64
                            && f < i64::MAX as f64 =>
                    {
                        Ok(f as i64)
                    },
                    _ => Err(CmdbError::precondition(
                        key,
                        format!("{} is not an integer", n),
                    )),
                }
            },
            Some(other) => Err(CmdbError::precondition(
                key,
                format!("{} is not an integer", other),
            )),
        }
    }

    /// Read `key` as a string; numbers and booleans render as their JSON text
    pub fn string(&self, key: &str) -> CmdbResult<String> {
        match self.0.get(key) {
            None => Err(CmdbError::precondition(key, "field not found")),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
            Some(other) => Err(CmdbError::precondition(
                key,
                format!("{} is not a string", other),
            )),
        }
    }

    /// Serialize to a JSON object body
    pub fn to_json(&self) -> CmdbResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    /// Parse a JSON object body
    pub fn from_json(bytes: &[u8]) -> CmdbResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for MapStr {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<MapStr> for Value {
    fn from(map: MapStr) -> Self {
        Value::Object(map.0)
    }
}

impl TryFrom<Value> for MapStr {
    type Error = CmdbError;

    fn try_from(value: Value) -> CmdbResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CmdbError::Decode(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MapStr {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for MapStr {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_accessor() {
        let data = MapStr::new()
            .set("id", 42)
            .set("big", u64::MAX)
            .set("float", 7.0)
            .set("frac", 7.5)
            .set("name", "host_ip")
            .set("neg", -3);

        assert_eq!(data.int("id").unwrap(), 42);
        assert_eq!(data.int("float").unwrap(), 7);
        assert_eq!(data.int("neg").unwrap(), -3);
        assert!(matches!(
            data.int("big"),
            Err(CmdbError::Precondition { .. })
        ));
        assert!(matches!(
            data.int("frac"),
            Err(CmdbError::Precondition { .. })
        ));
        assert!(matches!(
            data.int("name"),
            Err(CmdbError::Precondition { .. })
        ));

        match data.int("missing") {
            Err(CmdbError::Precondition { field, reason }) => {
                assert_eq!(field, "missing");
                assert_eq!(reason, "field not found");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_string_accessor() {
        let data = MapStr::new()
            .set("name", "host_ip")
            .set("id", 9)
            .set("editable", true)
            .set("option", json!({"min": 1}));

        assert_eq!(data.string("name").unwrap(), "host_ip");
        assert_eq!(data.string("id").unwrap(), "9");
        assert_eq!(data.string("editable").unwrap(), "true");
        assert!(data.string("option").is_err());
        assert!(data.string("missing").is_err());
    }

    #[test]
    fn test_to_json_keeps_insertion_order() {
        let data = MapStr::new()
            .set("bk_property_id", "cpu")
            .set("bk_obj_id", "host")
            .set("alpha", 1);

        let body = String::from_utf8(data.to_json().unwrap()).unwrap();
        assert_eq!(
            body,
            r#"{"bk_property_id":"cpu","bk_obj_id":"host","alpha":1}"#
        );
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(MapStr::from_json(br#"{"id":1}"#).is_ok());
        assert!(matches!(
            MapStr::from_json(b"[1,2]"),
            Err(CmdbError::Decode(_))
        ));
        assert!(MapStr::try_from(json!("text")).is_err());
    }
}
