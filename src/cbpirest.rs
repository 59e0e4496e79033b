// src/cbpirest.rs
//
// Thin client for the CraftBeerPi REST API. The host owns configuration,
// kettles, sensors, actors and the step engine; we only ever read state and
// fire notifications.

use reqwest::{Client, Error as ReqwestError, header};
use serde::Serialize;
use serde_json::{Error as SerdeJsonError, Value, json};
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use crate::brewinfo::{ActorSnapshot, KettleSnapshot, SensorSnapshot, StepSnapshot};
use crate::settings::ConfigEntry;

/// Custom error type for CbpiClient operations.
#[derive(Debug)]
pub enum CbpiClientError {
    /// Error during HTTP request (network issue, timeout, bad status).
    HttpRequestError(ReqwestError),
    /// Error deserializing the response payload from JSON.
    DeserializationError(SerdeJsonError),
    /// The response was missing an expected field.
    MissingField(&'static str),
}

impl Display for CbpiClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CbpiClientError::HttpRequestError(e) => write!(f, "HTTP request error: {}", e),
            CbpiClientError::DeserializationError(e) => write!(f, "JSON deserialization error: {}", e),
            CbpiClientError::MissingField(field) => write!(f, "host response missing '{}' field", field),
        }
    }
}

impl std::error::Error for CbpiClientError {}

impl From<ReqwestError> for CbpiClientError {
    fn from(err: ReqwestError) -> Self {
        CbpiClientError::HttpRequestError(err)
    }
}

impl From<SerdeJsonError> for CbpiClientError {
    fn from(err: SerdeJsonError) -> Self {
        CbpiClientError::DeserializationError(err)
    }
}

/// User-facing alert severity, mirrored from the host notification API.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Warning,
    Error,
    Success,
}

/// A client for one CraftBeerPi host.
#[derive(Debug)]
pub struct CbpiClient {
    base_url: String,
    client: Client,
}

impl CbpiClient {
    /// Creates a new `CbpiClient` with populated headers and tight timeouts.
    /// The render loop runs on a 1-6 s cadence, so a slow host answer is
    /// better dropped than awaited.
    pub fn new(base_url: &str) -> Self {
        const VERSION: &'static str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(500))
            .timeout(Duration::from_millis(800))
            .default_headers(headers)
            .build()
            .expect("reqwest client construction cannot fail with static options");

        CbpiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, CbpiClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        response.error_for_status_ref()?;
        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text)?;
        Ok(value)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<(), CbpiClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;
        response.error_for_status_ref()?;
        Ok(())
    }

    /// Reads one entry from the host config store. `Ok(None)` means the key
    /// has never been declared.
    pub async fn get_config(&self, key: &str) -> Result<Option<ConfigEntry>, CbpiClientError> {
        let value = self.get_json("/config").await?;
        match value.get(key) {
            Some(entry) => Ok(Some(serde_json::from_value(entry.clone())?)),
            None => Ok(None),
        }
    }

    /// Declares a config entry in the host store (lazy creation on first run).
    pub async fn add_config(&self, entry: &ConfigEntry) -> Result<(), CbpiClientError> {
        let body = serde_json::to_value(entry)?;
        self.post_json("/config", &body).await
    }

    /// Full step list; the caller picks the active one.
    pub async fn step_state(&self) -> Result<Vec<StepSnapshot>, CbpiClientError> {
        let value = self.get_json("/step").await?;
        let steps = value
            .get("steps")
            .cloned()
            .ok_or(CbpiClientError::MissingField("steps"))?;
        Ok(serde_json::from_value(steps)?)
    }

    pub async fn kettle_state(&self) -> Result<Vec<KettleSnapshot>, CbpiClientError> {
        let value = self.get_json("/kettle").await?;
        let data = value
            .get("data")
            .cloned()
            .ok_or(CbpiClientError::MissingField("data"))?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn sensor_state(&self) -> Result<Vec<SensorSnapshot>, CbpiClientError> {
        let value = self.get_json("/sensor").await?;
        let data = value
            .get("data")
            .cloned()
            .ok_or(CbpiClientError::MissingField("data"))?;
        Ok(serde_json::from_value(data)?)
    }

    /// Latest reading for one sensor. `Ok(None)` when the sensor exists but
    /// has no numeric value yet.
    pub async fn sensor_value(&self, sensor_id: &str) -> Result<Option<f64>, CbpiClientError> {
        let value = self.get_json(&format!("/sensor/{}/value", sensor_id)).await?;
        Ok(value.get("value").and_then(crate::deutils::value_as_f64))
    }

    /// Heater (or cooler) actor on/off state.
    pub async fn actor_state(&self, actor_id: &str) -> Result<ActorSnapshot, CbpiClientError> {
        let value = self.get_json(&format!("/actor/{}", actor_id)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Host product version, shown on the standby screen.
    pub async fn system_version(&self) -> Result<String, CbpiClientError> {
        let value = self.get_json("/system").await?;
        value
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(CbpiClientError::MissingField("version"))
    }

    /// Fire-and-forget user-facing alert.
    pub async fn notify(
        &self,
        title: &str,
        message: &str,
        kind: NotificationType,
    ) -> Result<(), CbpiClientError> {
        let body = json!({
            "title": title,
            "message": message,
            "type": serde_json::to_value(kind)?,
        });
        self.post_json("/notification", &body).await
    }
}
