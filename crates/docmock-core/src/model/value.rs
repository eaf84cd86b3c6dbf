use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::reference::DocumentReference;

/// Field mapping of a document or of a nested map value
pub type Fields = BTreeMap<String, Value>;

/// A document field value
///
/// Timestamps and references are their own variants, so traversals never
/// have to guess whether a map-like value is plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Reference(DocumentReference),
    Array(Vec<Value>),
    Map(Fields),
}

/// Result of [`Value::classify`]: the categories a tree walk distinguishes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueClass<'a> {
    /// Null, booleans, numbers and strings
    Primitive(&'a Value),
    /// Date/time value; opaque to traversal
    Timestamp(&'a DateTime<Utc>),
    Reference(&'a DocumentReference),
    Array(&'a [Value]),
    Map(&'a Fields),
}

impl Value {
    /// Classify this value for traversal
    pub fn classify(&self) -> ValueClass<'_> {
        match self {
            Value::Reference(r) => ValueClass::Reference(r),
            Value::Timestamp(t) => ValueClass::Timestamp(t),
            Value::Array(items) => ValueClass::Array(items),
            Value::Map(fields) => ValueClass::Map(fields),
            Value::Null
            | Value::Bool(_)
            | Value::Integer(_)
            | Value::Double(_)
            | Value::String(_) => ValueClass::Primitive(self),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as `f64`, integers included
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&DocumentReference> {
        match self {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Value::Map(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a nested value by dotted path (`items.0.text`)
    ///
    /// Array segments must parse as indices. Keys that themselves contain
    /// `.` cannot be addressed.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(self, |current, segment| match current {
            Value::Map(fields) => fields.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Double(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Timestamp(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Reference(r) => serializer.serialize_str(&r.path()),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<DocumentReference> for Value {
    fn from(r: DocumentReference) -> Self {
        Value::Reference(r)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::Map(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CollectionReference;
    use chrono::TimeZone;

    fn reference() -> DocumentReference {
        CollectionReference::new("collection").unwrap().doc("42").unwrap()
    }

    #[test]
    fn test_classify_separates_timestamps_and_references() {
        let now = Utc::now();
        assert!(matches!(
            Value::Timestamp(now).classify(),
            ValueClass::Timestamp(t) if *t == now
        ));
        assert!(matches!(
            Value::Reference(reference()).classify(),
            ValueClass::Reference(_)
        ));
        assert!(matches!(Value::Map(Fields::new()).classify(), ValueClass::Map(_)));
        assert!(matches!(Value::Array(vec![]).classify(), ValueClass::Array(_)));
        for primitive in [
            Value::Null,
            Value::Bool(true),
            Value::Integer(1),
            Value::Double(1.5),
            Value::from("s"),
        ] {
            assert!(matches!(primitive.classify(), ValueClass::Primitive(_)));
        }
    }

    #[test]
    fn test_serialize_renders_references_as_paths() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let value = Value::Map(Fields::from([
            ("ref".to_string(), Value::Reference(reference())),
            ("at".to_string(), Value::Timestamp(at)),
            ("n".to_string(), Value::Integer(42)),
            ("list".to_string(), Value::Array(vec![Value::Null, Value::Bool(false)])),
        ]));

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ref": "collection/42",
                "at": "2024-01-02T03:04:05Z",
                "n": 42,
                "list": [null, false],
            })
        );
    }

    #[test]
    fn test_from_json_distinguishes_integers_and_doubles() {
        let value = Value::from(serde_json::json!({"i": 7, "d": 2.5, "s": "x", "z": null}));
        let map = value.as_map().unwrap();

        assert_eq!(map["i"], Value::Integer(7));
        assert_eq!(map["d"], Value::Double(2.5));
        assert_eq!(map["s"], Value::from("x"));
        assert!(map["z"].is_null());
    }

    #[test]
    fn test_lookup_follows_maps_and_indices() {
        let value = Value::from(serde_json::json!({"items": [{"text": "foo"}]}));

        assert_eq!(value.lookup("items.0.text"), Some(&Value::from("foo")));
        assert_eq!(value.lookup("items.1.text"), None);
        assert_eq!(value.lookup("items.x"), None);
        assert_eq!(value.lookup("missing"), None);
    }

    #[test]
    fn test_as_f64_widens_integers() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Double(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::from("3").as_f64(), None);
    }
}
