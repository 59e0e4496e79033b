/*
 *  brewinfo.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  Snapshot DTOs for host-owned brewing state. Everything here is borrowed
 *  for one render pass: fetched fresh each iteration, never cached.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::deutils::{
    default_false,
    default_zero_f64,
    deserialize_bool_from_anything,
    deserialize_numeric_f64,
};

/// One step of the running brew recipe. Status "A" marks the active step.
#[derive(Debug, Clone, Deserialize)]
pub struct StepSnapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub state_text: String,
    #[serde(default)]
    pub props: Map<String, Value>,
}

impl StepSnapshot {
    pub fn is_active(&self) -> bool {
        self.status == "A"
    }

    /// Boil steps get the combined Set|Act line and the hop countdown.
    pub fn is_boil(&self) -> bool {
        self.name.to_lowercase().contains("boil")
    }
}

/// Picks the active step out of a state snapshot, if any.
pub fn active_step(steps: &[StepSnapshot]) -> Option<&StepSnapshot> {
    steps.iter().find(|s| s.is_active())
}

/// A brewing vessel with its heater actor and temperature sensor.
#[derive(Debug, Clone, Deserialize)]
pub struct KettleSnapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_zero_f64")]
    #[serde(deserialize_with = "deserialize_numeric_f64")]
    pub target_temp: f64,
    #[serde(default)]
    pub heater: Option<String>,
    #[serde(default)]
    pub sensor: Option<String>,
}

impl KettleSnapshot {
    /// Placeholder used when the configured kettle cannot be resolved; the
    /// render loop must keep going with something printable.
    pub fn placeholder() -> Self {
        KettleSnapshot {
            id: String::new(),
            name: "error".to_string(),
            target_temp: 0.0,
            heater: None,
            sensor: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorSnapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub sensor_type: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub props: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActorSnapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_false")]
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub state: bool,
}
