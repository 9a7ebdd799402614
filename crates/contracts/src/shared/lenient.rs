//! Tolerant deserializers for values exported from CSV-backed endpoints.
//!
//! The backend serialises pandas frames directly, so the same column can
//! arrive as a number, a numeric string, an empty string or `null`.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Number, numeric string, `""` or `null` → `Option<f64>`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

/// Any scalar → `String`; `null` becomes an empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(format_number(&n)),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "expected scalar value, got {}",
            other
        ))),
    }
}

/// Object of counters, or the empty list the backend returns when there is no data.
pub fn count_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Array(items)) if items.is_empty() => Ok(BTreeMap::new()),
        Some(Value::Object(map)) => Ok(map
            .into_iter()
            .filter_map(|(k, v)| value_to_f64(&v).map(|n| (k, n.max(0.0) as u64)))
            .collect()),
        Some(other) => Err(de::Error::custom(format!(
            "expected object of counters, got {}",
            other
        ))),
    }
}

/// Deserializes `T`, falling back to `T::default()` for `[]`, `{}` or `null`.
///
/// Some aggregate endpoints return an empty list instead of an empty object
/// when the underlying file is missing.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(T::default()),
        Some(Value::Array(items)) if items.is_empty() => Ok(T::default()),
        Some(Value::Object(map)) if map.is_empty() => Ok(T::default()),
        Some(other) => serde_json::from_value(other).map_err(de::Error::custom),
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn format_number(n: &serde_json::Number) -> String {
    // pandas отдаёт целые id как 12.0
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "string")]
        id: String,
        #[serde(default, deserialize_with = "count_map")]
        types: BTreeMap<String, u64>,
    }

    #[test]
    fn test_price_variants() {
        let s: Sample = serde_json::from_str(r#"{"price": 3.5}"#).unwrap();
        assert_eq!(s.price, Some(3.5));
        let s: Sample = serde_json::from_str(r#"{"price": " 4.25 "}"#).unwrap();
        assert_eq!(s.price, Some(4.25));
        let s: Sample = serde_json::from_str(r#"{"price": ""}"#).unwrap();
        assert_eq!(s.price, None);
        let s: Sample = serde_json::from_str(r#"{"price": null}"#).unwrap();
        assert_eq!(s.price, None);
        let s: Sample = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(s.price, None);
    }

    #[test]
    fn test_id_from_number() {
        let s: Sample = serde_json::from_str(r#"{"id": 12.0}"#).unwrap();
        assert_eq!(s.id, "12");
        let s: Sample = serde_json::from_str(r#"{"id": "R-7"}"#).unwrap();
        assert_eq!(s.id, "R-7");
        let s: Sample = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(s.id, "");
    }

    #[test]
    fn test_types_empty_list() {
        let s: Sample = serde_json::from_str(r#"{"types": []}"#).unwrap();
        assert!(s.types.is_empty());
        let s: Sample = serde_json::from_str(r#"{"types": {"日报": 3, "月报": 1}}"#).unwrap();
        assert_eq!(s.types.get("日报"), Some(&3));
        assert!(serde_json::from_str::<Sample>(r#"{"types": "x"}"#).is_err());
    }
}
