#![forbid(unsafe_code)]

//! Dynamic values flowing between dependencies, combiners and callers.
//!
//! Composite values (`List`, `Record`) live behind an [`Arc`], so cloning a
//! value is O(1) and two clones of the same composite are *identical* in the
//! sense of [`Value::same`]. That identity is what the default memo equality
//! compares, and what "the same result" means for callers.

use std::fmt;
use std::sync::Arc;

/// A dependency output or selector result.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value (missing record field, unset props).
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Arc<str>),
    List(Arc<[Value]>),
    Record(Arc<Record>),
}

impl Value {
    /// Build a record value from `(key, value)` pairs, keeping their order.
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<Arc<str>>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Record(Arc::new(fields.into_iter().collect()))
    }

    /// Build a list value.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Kind name used in diagnostics and by kind-based equality policies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }

    /// Identity comparison.
    ///
    /// Scalars and strings compare by value (`NaN` is never the same as
    /// itself). Lists and records compare by allocation, never by contents.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// True when both values are composites sharing one allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Field lookup on a record. Anything else yields `Undefined`.
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        match self {
            Self::Record(record) => record.get(key).cloned().unwrap_or_default(),
            _ => Value::Undefined,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(&**s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(&**record),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(Arc::new(record))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Record(record) => {
                f.write_str("{")?;
                for (i, (key, value)) in record.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Insertion-ordered string-keyed map.
///
/// Inserting an existing key replaces its value in place, so key order is
/// always the order of first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(Arc<str>, Value)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Build from pairs whose keys are already unique. No duplicate scan.
    pub(crate) fn from_unique(fields: impl IntoIterator<Item = (Arc<str>, Value)>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<Arc<str>>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| &**k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| &**k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (&**k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<Arc<str>>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::{SerializeMap, SerializeSeq};
    use serde::{Serialize, Serializer};

    use super::{Record, Value};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Undefined | Value::Null => serializer.serialize_unit(),
                Value::Bool(b) => serializer.serialize_bool(*b),
                Value::Number(n) => serializer.serialize_f64(*n),
                Value::Str(s) => serializer.serialize_str(s),
                Value::List(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for item in items.iter() {
                        seq.serialize_element(item)?;
                    }
                    seq.end()
                }
                Value::Record(record) => record.serialize(serializer),
            }
        }
    }

    impl Serialize for Record {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_unique_keeps_pair_order() {
        let record = Record::from_unique([
            (Arc::from("z"), Value::from(1)),
            (Arc::from("a"), Value::from(2)),
        ]);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(record.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn scalars_are_same_by_value() {
        assert!(Value::from(1).same(&Value::from(1.0)));
        assert!(Value::from("a").same(&Value::from(String::from("a"))));
        assert!(Value::Undefined.same(&Value::Undefined));
        assert!(!Value::Undefined.same(&Value::Null));
        assert!(!Value::from(1).same(&Value::from("1")));
    }

    #[test]
    fn nan_is_never_same() {
        let nan = Value::from(f64::NAN);
        assert!(!nan.same(&nan.clone()));
    }

    #[test]
    fn composites_are_same_by_allocation() {
        let a = Value::record([("x", Value::from(1))]);
        let b = Value::record([("x", Value::from(1))]);
        assert!(a.same(&a.clone()));
        assert!(!a.same(&b));
        // Structurally equal all the same.
        assert_eq!(a, b);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!Value::from(1).ptr_eq(&Value::from(1)));
    }

    #[test]
    fn get_reads_record_fields() {
        let state = Value::record([("a", Value::from(1)), ("b", Value::from("two"))]);
        assert_eq!(state.get("a"), Value::from(1));
        assert_eq!(state.get("b").as_str(), Some("two"));
        assert!(state.get("missing").is_undefined());
        assert!(Value::from(3).get("a").is_undefined());
    }

    #[test]
    fn record_insert_keeps_first_position() {
        let mut record = Record::new();
        record.insert("y", Value::from(1));
        record.insert("x", Value::from(2));
        record.insert("y", Value::from(3));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["y", "x"]);
        assert_eq!(record.get("y"), Some(&Value::from(3)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Undefined.kind(), "undefined");
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(true).kind(), "boolean");
        assert_eq!(Value::from(1).kind(), "number");
        assert_eq!(Value::from("s").kind(), "string");
        assert_eq!(Value::list([]).kind(), "list");
        assert_eq!(Value::from(Record::new()).kind(), "record");
    }

    #[test]
    fn display_format() {
        let v = Value::record([
            ("x", Value::from(1)),
            ("y", Value::list([Value::from("a"), Value::Null])),
        ]);
        assert_eq!(v.to_string(), r#"{x: 1, y: ["a", null]}"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_records_in_key_order() {
        let v = Value::record([("b", Value::from(2)), ("a", Value::from(true))]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"b":2.0,"a":true}"#);
    }
}
