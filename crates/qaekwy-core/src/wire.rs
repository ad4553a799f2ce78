//! Typed readers over JSON wire maps.
//!
//! Every reader names the field it failed on so a rejected document points
//! at the offending key.

use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// A JSON object as exchanged with the engine. Keys keep insertion order.
pub type WireMap = Map<String, Value>;

/// Borrows `value` as an object.
pub fn as_map<'a>(value: &'a Value, field: &str) -> Result<&'a WireMap> {
    value
        .as_object()
        .ok_or_else(|| ModelError::malformed(field, "expected an object"))
}

fn required<'a>(map: &'a WireMap, field: &str) -> Result<&'a Value> {
    map.get(field)
        .ok_or_else(|| ModelError::malformed(field, "missing"))
}

pub fn str_field<'a>(map: &'a WireMap, field: &str) -> Result<&'a str> {
    required(map, field)?
        .as_str()
        .ok_or_else(|| ModelError::malformed(field, "expected a string"))
}

pub fn opt_str_field<'a>(map: &'a WireMap, field: &str) -> Result<Option<&'a str>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ModelError::malformed(field, "expected a string")),
    }
}

pub fn i64_field(map: &WireMap, field: &str) -> Result<i64> {
    required(map, field)?
        .as_i64()
        .ok_or_else(|| ModelError::malformed(field, "expected an integer"))
}

pub fn opt_i64_field(map: &WireMap, field: &str) -> Result<Option<i64>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| ModelError::malformed(field, "expected an integer")),
    }
}

/// Reads a non-negative integer as a size or index.
pub fn usize_field(map: &WireMap, field: &str) -> Result<usize> {
    let value = required(map, field)?
        .as_u64()
        .ok_or_else(|| ModelError::malformed(field, "expected a non-negative integer"))?;
    usize::try_from(value).map_err(|_| ModelError::malformed(field, "out of range"))
}

/// Accepts any JSON number, integer or not.
pub fn f64_field(map: &WireMap, field: &str) -> Result<f64> {
    required(map, field)?
        .as_f64()
        .ok_or_else(|| ModelError::malformed(field, "expected a number"))
}

pub fn array_field<'a>(map: &'a WireMap, field: &str) -> Result<&'a Vec<Value>> {
    required(map, field)?
        .as_array()
        .ok_or_else(|| ModelError::malformed(field, "expected an array"))
}

/// Missing or null reads as an empty slice.
pub fn opt_array_field<'a>(map: &'a WireMap, field: &str) -> Result<&'a [Value]> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ModelError::malformed(field, "expected an array")),
    }
}

pub fn map_field<'a>(map: &'a WireMap, field: &str) -> Result<&'a WireMap> {
    as_map(required(map, field)?, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> WireMap {
        match json!({"name": "x", "length": 3, "scale": 1.5, "neg": -1, "items": [1, 2]}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_typed_reads() {
        let map = sample();
        assert_eq!(str_field(&map, "name").unwrap(), "x");
        assert_eq!(usize_field(&map, "length").unwrap(), 3);
        assert_eq!(i64_field(&map, "neg").unwrap(), -1);
        assert_eq!(f64_field(&map, "scale").unwrap(), 1.5);
        assert_eq!(f64_field(&map, "length").unwrap(), 3.0);
        assert_eq!(array_field(&map, "items").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_field_names_the_key() {
        let err = str_field(&sample(), "type").unwrap_err();
        assert_eq!(err, ModelError::malformed("type", "missing"));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let map = sample();
        assert!(str_field(&map, "length").is_err());
        assert!(usize_field(&map, "neg").is_err());
        assert!(i64_field(&map, "scale").is_err());
    }

    #[test]
    fn test_optional_reads() {
        let map = sample();
        assert_eq!(opt_str_field(&map, "absent").unwrap(), None);
        assert_eq!(opt_i64_field(&map, "neg").unwrap(), Some(-1));
        assert!(opt_array_field(&map, "absent").unwrap().is_empty());
    }
}
