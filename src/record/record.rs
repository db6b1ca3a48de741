//! Flat record model and primitive value ordering.
//!
//! A record is a string-keyed map of primitive values (bool, number,
//! string). Nested and null values are rejected at construction, so every
//! operator downstream can treat field access as total.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::errors::{RecordError, RecordResult};

/// An ordered sequence of records.
///
/// Order is meaningful: operators that do not explicitly reorder preserve
/// the relative order of surviving records.
pub type Collection = Vec<Record>;

/// A flat, string-keyed map of primitive values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Inserts a field, replacing and returning any previous value.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NonPrimitiveField` if the value is null, an
    /// array, or an object.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> RecordResult<Option<Value>> {
        let field = field.into();
        if !is_primitive(&value) {
            return Err(RecordError::NonPrimitiveField {
                field,
                found: value_type_name(&value),
            });
        }
        Ok(self.fields.insert(field, value))
    }

    /// Returns the value of a field, if the record owns it
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns true if the record owns the field
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns an iterator over the record's field names
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns an iterator over field name / value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Returns the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a fresh record containing only the keys present in both the
    /// record and the selection. Keys absent from the record are omitted,
    /// never nulled.
    pub(crate) fn project(&self, selected: &[String]) -> Record {
        let fields = self
            .fields
            .iter()
            .filter(|(key, _)| selected.contains(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self { fields }
    }

    /// Builds a fresh record equal to this one except `field` holds
    /// `value`. The caller has already checked the value is primitive.
    pub(crate) fn with_field(&self, field: &str, value: Value) -> Record {
        let mut fields = self.fields.clone();
        fields.insert(field.to_string(), value);
        Self { fields }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Value> for Record {
    type Error = RecordError;

    /// Accepts a JSON object whose values are all primitive.
    fn try_from(value: Value) -> RecordResult<Self> {
        let fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(RecordError::NotAnObject {
                    found: value_type_name(&other),
                })
            }
        };

        for (field, value) in &fields {
            if !is_primitive(value) {
                return Err(RecordError::NonPrimitiveField {
                    field: field.clone(),
                    found: value_type_name(value),
                });
            }
        }

        Ok(Self { fields })
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Record::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Returns true for the value kinds a record may hold
pub(crate) fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// Returns the JSON type name of a value (for error messages)
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compares two optional field values for sorting.
///
/// Ordering rules:
/// - a missing field sorts before any present value
/// - for present values, type rank first: bool < number < string
/// - within a type, natural ordering; numbers compare as f64
///
/// The comparison is an explicit three-way `Ordering` so it stays correct
/// for both numeric and string fields.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_val), Some(b_val)) => {
            let type_order = |v: &Value| -> u8 {
                match v {
                    Value::Bool(_) => 0,
                    Value::Number(_) => 1,
                    Value::String(_) => 2,
                    // Excluded by the record contract
                    Value::Null | Value::Array(_) | Value::Object(_) => 3,
                }
            };

            let a_type = type_order(a_val);
            let b_type = type_order(b_val);

            if a_type != b_type {
                return a_type.cmp(&b_type);
            }

            match (a_val, b_val) {
                (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                (Value::Number(a_n), Value::Number(b_n)) => {
                    let a_f = a_n.as_f64().unwrap_or(0.0);
                    let b_f = b_n.as_f64().unwrap_or(0.0);
                    a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                }
                (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
                _ => Ordering::Equal,
            }
        }
    }
}
