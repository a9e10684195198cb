//! Query conditions
//!
//! A [`Condition`] is anything that can flatten itself into a [`MapStr`]
//! payload. [`Cond`] is the builder most callers use:
//!
//! ```ignore
//! let cond = Cond::new().field("id").eq(42);
//! let cond = Cond::new()
//!     .field("bk_obj_id").eq("host")
//!     .field("id").gte(10)
//!     .field("id").lt(20);
//! ```

use crate::mapstr::MapStr;
use serde_json::Value;

/// Query descriptor convertible to a flat key-value payload
pub trait Condition: Send + Sync {
    fn to_map_str(&self) -> MapStr;
}

impl Condition for MapStr {
    fn to_map_str(&self) -> MapStr {
        self.clone()
    }
}

/// Comparison operators understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    Like,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::In => "$in",
            Self::Nin => "$nin",
            Self::Like => "$regex",
        }
    }
}

/// Condition builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cond {
    fields: MapStr,
}

impl Cond {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a predicate on `name`
    pub fn field(self, name: impl Into<String>) -> FieldCond {
        FieldCond {
            cond: self,
            name: name.into(),
        }
    }

    // Eq replaces the field; other operators merge into an operator object
    fn push(mut self, name: String, op: Operator, value: Value) -> Self {
        if op == Operator::Eq {
            self.fields.insert(name, value);
            return self;
        }

        match self.fields.get(&name) {
            Some(Value::Object(ops)) if ops.keys().all(|k| k.starts_with('$')) => {
                let mut ops = ops.clone();
                ops.insert(op.as_str().to_string(), value);
                self.fields.insert(name, Value::Object(ops));
            },
            _ => {
                let mut ops = serde_json::Map::new();
                ops.insert(op.as_str().to_string(), value);
                self.fields.insert(name, Value::Object(ops));
            },
        }
        self
    }
}

impl Condition for Cond {
    fn to_map_str(&self) -> MapStr {
        self.fields.clone()
    }
}

/// A pending predicate on one field
#[derive(Debug, Clone)]
pub struct FieldCond {
    cond: Cond,
    name: String,
}

impl FieldCond {
    pub fn eq(self, value: impl Into<Value>) -> Cond {
        self.op(Operator::Eq, value.into())
    }

    pub fn ne(self, value: impl Into<Value>) -> Cond {
        self.op(Operator::Ne, value.into())
    }

    pub fn gt(self, value: impl Into<Value>) -> Cond {
        self.op(Operator::Gt, value.into())
    }

    pub fn gte(self, value: impl Into<Value>) -> Cond {
        self.op(Operator::Gte, value.into())
    }

    pub fn lt(self, value: impl Into<Value>) -> Cond {
        self.op(Operator::Lt, value.into())
    }

    pub fn lte(self, value: impl Into<Value>) -> Cond {
        self.op(Operator::Lte, value.into())
    }

    pub fn is_in<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Cond {
        let list = values.into_iter().map(Into::into).collect::<Vec<Value>>();
        self.op(Operator::In, Value::Array(list))
    }

    pub fn not_in<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Cond {
        let list = values.into_iter().map(Into::into).collect::<Vec<Value>>();
        self.op(Operator::Nin, Value::Array(list))
    }

    /// Regular-expression match
    pub fn like(self, pattern: impl Into<String>) -> Cond {
        self.op(Operator::Like, Value::String(pattern.into()))
    }

    fn op(self, op: Operator, value: Value) -> Cond {
        self.cond.push(self.name, op, value)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_produces_flat_field() {
        let cond = Cond::new().field("id").eq(42);
        let payload = cond.to_map_str();
        assert_eq!(payload.int("id").unwrap(), 42);
        assert_eq!(Value::from(payload), json!({"id": 42}));
    }

    #[test]
    fn test_operators_merge_on_same_field() {
        let cond = Cond::new()
            .field("bk_obj_id")
            .eq("host")
            .field("id")
            .gte(10)
            .field("id")
            .lt(20);

        assert_eq!(
            Value::from(cond.to_map_str()),
            json!({"bk_obj_id": "host", "id": {"$gte": 10, "$lt": 20}})
        );
    }

    #[test]
    fn test_eq_replaces_operator_object() {
        let cond = Cond::new().field("id").ne(1).field("id").eq(5);
        assert_eq!(cond.to_map_str().int("id").unwrap(), 5);
    }

    #[test]
    fn test_list_and_regex_operators() {
        let cond = Cond::new()
            .field("bk_property_type")
            .is_in(["int", "float"])
            .field("bk_obj_id")
            .not_in(["set"])
            .field("bk_property_name")
            .like("^cpu");

        assert_eq!(
            Value::from(cond.to_map_str()),
            json!({
                "bk_property_type": {"$in": ["int", "float"]},
                "bk_obj_id": {"$nin": ["set"]},
                "bk_property_name": {"$regex": "^cpu"}
            })
        );
    }

    #[test]
    fn test_operator_without_integer_id_fails_int_lookup() {
        let cond = Cond::new().field("id").gt(3);
        assert!(cond.to_map_str().int("id").is_err());
    }

    #[test]
    fn test_mapstr_is_its_own_condition() {
        let map = MapStr::new().set("id", 7);
        assert_eq!(map.to_map_str(), map);
    }
}
