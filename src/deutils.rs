// src/deutils.rs
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn default_zero_f64() -> f64 { 0.0 }
pub fn default_false() -> bool { false }

/// CBPi props arrive as duck-typed JSON: numbers, numeric strings, booleans
/// as "1"/"true", whatever the step plugin felt like storing. These helpers
/// accept anything plausible.
pub fn deserialize_bool_from_anything<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    let s = v.to_string().trim_matches('"').trim().to_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "y" | "t" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "f" | "off" => Ok(false),
        _ => Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(s.as_str()),
            &"expected boolean representation",
        )),
    }
}

pub fn deserialize_numeric_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let v = Value::deserialize(deserializer)?;
    value_as_f64(&v).ok_or_else(|| D::Error::custom("non-numeric"))
}

/// Tolerant numeric read from a JSON value: native number or numeric string.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(num) => num.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(num) => num.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Converts total seconds into "HH:MM:SS". Hours are always emitted: the
/// hop countdown column on the LCD is fixed width.
pub fn seconds_to_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Parses "HH:MM:SS" (or "MM:SS") into seconds. Returns `None` on anything
/// that is not a colon-separated run of integers.
pub fn hms_to_seconds(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut total: u64 = 0;
    for part in &parts {
        let n: u64 = part.trim().parse().ok()?;
        total = total * 60 + n;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seconds_to_hms_always_padded() {
        assert_eq!(seconds_to_hms(0), "00:00:00");
        assert_eq!(seconds_to_hms(1200), "00:20:00");
        assert_eq!(seconds_to_hms(3661), "01:01:01");
    }

    #[test]
    fn test_hms_roundtrip() {
        assert_eq!(hms_to_seconds("01:00:00"), Some(3600));
        assert_eq!(hms_to_seconds("00:20:00"), Some(1200));
        assert_eq!(hms_to_seconds("20:00"), Some(1200));
        assert_eq!(hms_to_seconds("Wait"), None);
        assert_eq!(hms_to_seconds(""), None);
    }

    #[test]
    fn test_value_as_f64_accepts_strings() {
        assert_eq!(value_as_f64(&json!(66.5)), Some(66.5));
        assert_eq!(value_as_f64(&json!("66.5")), Some(66.5));
        assert_eq!(value_as_f64(&json!("n.a.")), None);
        assert_eq!(value_as_f64(&json!(null)), None);
    }
}
