// src/settings.rs
//
// Display settings live in the host-owned config store, not in a local file:
// the brewer edits them from the CraftBeerPi web UI. Each key is declared
// lazily with its default on first access. Mode, refresh and the selected
// kettle/sensor are re-read every loop pass; address and charmap only at
// startup (the panel cannot be re-addressed without re-init anyway).

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::cbpirest::CbpiClient;
use crate::charmap::Charmap;

/// Declared type of a host config entry, mirrored from the host API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    String,
    Select,
    Number,
    Kettle,
    Sensor,
}

/// One enumerated choice for a select-typed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: Value,
}

/// A host config store entry: key, current value, declared type, human
/// label and optional choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "type")]
    pub config_type: ConfigType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Option<Vec<Choice>>,
}

/// Every setting this daemon declares, with its default and validation rule
/// in one place instead of stringly-typed get/add calls scattered around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Address,
    Charmap,
    Refresh,
    DisplayMode,
    SingleKettle,
    SensorType,
}

impl SettingKey {
    pub fn name(self) -> &'static str {
        match self {
            SettingKey::Address => "LCD_Address",
            SettingKey::Charmap => "LCD_Charactermap",
            SettingKey::Refresh => "LCD_Refresh",
            SettingKey::DisplayMode => "LCD_Display_Mode",
            SettingKey::SingleKettle => "LCD_Singledisplay_Kettle",
            SettingKey::SensorType => "LCD_Display_Sensortype",
        }
    }

    pub fn default_value(self) -> Value {
        match self {
            SettingKey::Address => json!("0x27"),
            SettingKey::Charmap => json!("A00"),
            SettingKey::Refresh => json!(3),
            SettingKey::DisplayMode => json!("Multidisplay"),
            SettingKey::SingleKettle => json!(""),
            SettingKey::SensorType => json!("OneWire"),
        }
    }

    fn config_type(self) -> ConfigType {
        match self {
            SettingKey::Address => ConfigType::String,
            SettingKey::Charmap | SettingKey::Refresh | SettingKey::DisplayMode | SettingKey::SensorType => {
                ConfigType::Select
            }
            SettingKey::SingleKettle => ConfigType::Kettle,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SettingKey::Address => "LCD address like 0x27 or 0x3f, reboot required",
            SettingKey::Charmap => "LCD character map like A00 or A02, reboot required",
            SettingKey::Refresh => "Time in sec to remain till next display",
            SettingKey::DisplayMode => "Select the mode of the LCD display",
            SettingKey::SingleKettle => "Select the kettle shown in single mode",
            SettingKey::SensorType => "Select the sensor type shown in sensor mode",
        }
    }

    fn choices(self) -> Option<Vec<Choice>> {
        fn select(values: &[&str]) -> Vec<Choice> {
            values
                .iter()
                .map(|v| Choice { label: v.to_string(), value: json!(v) })
                .collect()
        }
        match self {
            SettingKey::Charmap => Some(select(&["A00", "A02"])),
            SettingKey::Refresh => Some(
                (1..=6)
                    .map(|s| Choice { label: format!("{}s", s), value: json!(s) })
                    .collect(),
            ),
            SettingKey::DisplayMode => {
                Some(select(&["Multidisplay", "Singledisplay", "Sensordisplay"]))
            }
            SettingKey::SensorType => Some(select(&[
                "OneWire",
                "iSpindel",
                "MQTT_SENSOR",
                "eManometer",
                "PHSensor",
                "Http_Sensor",
                "CustomSensor",
            ])),
            SettingKey::Address | SettingKey::SingleKettle => None,
        }
    }

    fn entry(self) -> ConfigEntry {
        ConfigEntry {
            name: self.name().to_string(),
            value: self.default_value(),
            config_type: self.config_type(),
            description: self.label().to_string(),
            options: self.choices(),
        }
    }

    /// Validates a stored value against this key's rule; out-of-range or
    /// mistyped values fall back to the default.
    pub fn validate(self, value: Value) -> Value {
        match self {
            SettingKey::Refresh => match crate::deutils::value_as_i64(&value) {
                Some(s) if (1..=6).contains(&s) => json!(s),
                _ => self.default_value(),
            },
            SettingKey::Charmap => match value.as_str() {
                Some("A00") | Some("A02") => value,
                _ => self.default_value(),
            },
            _ => value,
        }
    }
}

/// Reads a setting, declaring it with its default if the host has never seen
/// the key. Every failure path degrades to the default: a broken config read
/// must not stall the render loop.
pub async fn ensure(client: &CbpiClient, key: SettingKey) -> Value {
    match client.get_config(key.name()).await {
        Ok(Some(entry)) => key.validate(entry.value),
        Ok(None) => {
            match client.add_config(&key.entry()).await {
                Ok(()) => info!("{} added to host config", key.name()),
                Err(e) => warn!("unable to declare {} in host config: {}", key.name(), e),
            }
            key.default_value()
        }
        Err(e) => {
            warn!("unable to read {} from host config: {}", key.name(), e);
            key.default_value()
        }
    }
}

/// Raw display mode string ("Multidisplay" | "Singledisplay" | "Sensordisplay").
pub async fn display_mode(client: &CbpiClient) -> String {
    ensure(client, SettingKey::DisplayMode)
        .await
        .as_str()
        .unwrap_or("Multidisplay")
        .to_string()
}

pub async fn refresh_secs(client: &CbpiClient) -> u64 {
    crate::deutils::value_as_i64(&ensure(client, SettingKey::Refresh).await)
        .map(|s| s.clamp(1, 6) as u64)
        .unwrap_or(3)
}

pub async fn lcd_address(client: &CbpiClient) -> u8 {
    let raw = ensure(client, SettingKey::Address).await;
    let text = raw.as_str().unwrap_or("0x27");
    parse_i2c_address(text).unwrap_or_else(|| {
        warn!("unparseable LCD address '{}', using 0x27", text);
        0x27
    })
}

pub async fn lcd_charmap(client: &CbpiClient) -> Charmap {
    let raw = ensure(client, SettingKey::Charmap).await;
    Charmap::from_config(raw.as_str().unwrap_or("A00"))
}

/// Kettle id for single mode; `None` when not configured yet.
pub async fn single_kettle(client: &CbpiClient) -> Option<String> {
    let raw = ensure(client, SettingKey::SingleKettle).await;
    match raw.as_str() {
        Some("") | None => None,
        Some(id) => Some(id.to_string()),
    }
}

/// Sensor type for sensor mode; `None` when not configured yet.
pub async fn sensor_type(client: &CbpiClient) -> Option<String> {
    let raw = ensure(client, SettingKey::SensorType).await;
    match raw.as_str() {
        Some("") | None => None,
        Some(t) => Some(t.to_string()),
    }
}

/// Host-owned keys this daemon reads but never declares.
pub async fn temp_unit(client: &CbpiClient) -> String {
    read_host_key(client, "TEMP_UNIT", "na").await
}

pub async fn brewery_name(client: &CbpiClient) -> String {
    read_host_key(client, "BREWERY_NAME", "no name").await
}

async fn read_host_key(client: &CbpiClient, key: &str, fallback: &str) -> String {
    match client.get_config(key).await {
        Ok(Some(entry)) => match entry.value {
            Value::String(s) if !s.is_empty() => s,
            other => crate::deutils::value_as_f64(&other)
                .map(|f| f.to_string())
                .unwrap_or_else(|| fallback.to_string()),
        },
        Ok(None) => fallback.to_string(),
        Err(e) => {
            warn!("unable to read {} from host config: {}", key, e);
            fallback.to_string()
        }
    }
}

/// "0x27" or "39" to a 7-bit bus address.
pub fn parse_i2c_address(text: &str) -> Option<u8> {
    let t = text.trim();
    let value = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).ok()?
    } else {
        t.parse().ok()?
    };
    (value <= 0x7f).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_i2c_address() {
        assert_eq!(parse_i2c_address("0x27"), Some(0x27));
        assert_eq!(parse_i2c_address("0x3F"), Some(0x3f));
        assert_eq!(parse_i2c_address("39"), Some(39));
        assert_eq!(parse_i2c_address("0xFF"), None); // not a 7-bit address
        assert_eq!(parse_i2c_address("garage"), None);
    }

    #[test]
    fn test_refresh_validation_clamps_to_choices() {
        assert_eq!(SettingKey::Refresh.validate(json!(4)), json!(4));
        assert_eq!(SettingKey::Refresh.validate(json!("2")), json!(2));
        assert_eq!(SettingKey::Refresh.validate(json!(42)), json!(3));
        assert_eq!(SettingKey::Refresh.validate(json!("fast")), json!(3));
    }

    #[test]
    fn test_charmap_validation() {
        assert_eq!(SettingKey::Charmap.validate(json!("A02")), json!("A02"));
        assert_eq!(SettingKey::Charmap.validate(json!("A99")), json!("A00"));
    }

    #[test]
    fn test_entry_declares_choices() {
        let entry = SettingKey::DisplayMode.entry();
        assert_eq!(entry.name, "LCD_Display_Mode");
        assert_eq!(entry.config_type, ConfigType::Select);
        let options = entry.options.unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, json!("Multidisplay"));

        let entry = SettingKey::SingleKettle.entry();
        assert_eq!(entry.config_type, ConfigType::Kettle);
        assert!(entry.options.is_none());
    }
}
