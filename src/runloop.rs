/*
 *  runloop.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  The display loop: poll host state, pick a screen, render, sleep.
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

use chrono::Local;
use log::{error, info, warn};
use std::time::Duration;
use tokio::time::sleep;

use crate::brewinfo::{self, KettleSnapshot, StepSnapshot};
use crate::cbpirest::{CbpiClient, NotificationType};
use crate::charmap::Charmap;
use crate::config::Config;
use crate::display::drivers::hd44780::Hd44780Driver;
use crate::display::{LcdPanel, error::DisplayError};
use crate::netutil;
use crate::screens::{self, Frame, Screen};
use crate::settings;

/// Standby refreshes every second regardless of LCD_Refresh so the clock
/// line keeps ticking.
const STANDBY_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the host client, the panel and the heater blink toggle. One instance
/// per physical display; runs for process lifetime.
pub struct DisplayLoop {
    client: CbpiClient,
    panel: Option<LcdPanel>,
    charmap: Charmap,
    blink: bool,
}

impl DisplayLoop {
    /// Resolves the startup-only settings (address, charmap), brings up the
    /// panel and returns the loop. A panel that fails to initialize is
    /// logged, surfaced as a one-time host notification, and left out: the
    /// loop still runs so a fixed address takes effect on restart.
    pub async fn start(cfg: &Config) -> Self {
        let base_url = cfg.host_url.as_deref().unwrap_or("http://127.0.0.1:8000");
        let client = CbpiClient::new(base_url);

        let address = match cfg.i2c_address {
            Some(addr) => addr,
            None => settings::lcd_address(&client).await,
        };
        info!("LCD address: 0x{:02X}", address);

        let charmap = settings::lcd_charmap(&client).await;
        info!("LCD charmap: {:?}", charmap);

        let bus = cfg.i2c_bus.as_deref().unwrap_or("/dev/i2c-1");
        let panel = match Self::open_panel(bus, address, charmap) {
            Ok(panel) => Some(panel),
            Err(e) => {
                error!("LCD panel not initialized: {}", e);
                let message = format!(
                    "LCD at 0x{:02X} did not answer. Check the address with \
                     'i2cdetect -y 1' and the LCD_Address setting. ({})",
                    address, e
                );
                if let Err(ne) = client
                    .notify("BrauLCD", &message, NotificationType::Error)
                    .await
                {
                    warn!("could not deliver panel-failure notification: {}", ne);
                }
                None
            }
        };

        DisplayLoop { client, panel, charmap, blink: false }
    }

    fn open_panel(bus: &str, address: u8, charmap: Charmap) -> Result<LcdPanel, DisplayError> {
        let driver = Hd44780Driver::new(bus, address)?;
        LcdPanel::new(Box::new(driver), charmap)
    }

    /// The unbounded polling loop. Mode and refresh interval are re-read
    /// every iteration; nothing below this point may return an error.
    pub async fn run(mut self) {
        info!("Entering display loop");
        loop {
            let mode = settings::display_mode(&self.client).await;
            let refresh = Duration::from_secs(settings::refresh_secs(&self.client).await);

            let steps = match self.client.step_state().await {
                Ok(steps) => steps,
                Err(e) => {
                    warn!("step state unavailable: {}", e);
                    Vec::new()
                }
            };
            let active = brewinfo::active_step(&steps).cloned();

            match (Screen::select(active.is_some(), &mode), active) {
                (Screen::Single, Some(step)) => {
                    let kettle_id = settings::single_kettle(&self.client).await;
                    self.show_kettle(&step, kettle_id.as_deref(), false).await;
                    sleep(refresh).await;
                }
                (Screen::Multi, Some(step)) => {
                    self.show_multidisplay(&step, refresh).await;
                }
                (Screen::Sensor, _) => {
                    self.show_sensordisplay(refresh).await;
                }
                _ => {
                    self.show_standby().await;
                    sleep(STANDBY_INTERVAL).await;
                }
            }
        }
    }

    async fn show_standby(&mut self) {
        let version = match self.client.system_version().await {
            Ok(v) => v,
            Err(e) => {
                warn!("no host version found: {}", e);
                "no vers.".to_string()
            }
        };
        let brewery = settings::brewery_name(&self.client).await;
        let brewery = self.charmap.decode(&brewery);
        let ip = netutil::local_ipv4();
        let frame = screens::standby_frame(&version, &brewery, &ip, Local::now());
        self.write(&frame);
    }

    /// Renders one kettle screen for the current step; shared by single and
    /// multi mode (multi shows the heater glyph steady instead of blinking).
    async fn show_kettle(&mut self, step: &StepSnapshot, kettle_id: Option<&str>, multi: bool) {
        let kettle = self.resolve_kettle(kettle_id).await;
        let heater_on = self.heater_state(&kettle).await;
        let sensor_value = self.kettle_sensor_value(&kettle).await;
        let unit = settings::temp_unit(&self.client).await;

        let step_name = self.charmap.decode(&step.name);
        let kettle_name = self.charmap.decode(&kettle.name);
        let view = screens::KettleView {
            step_name: &step_name,
            step_is_boil: step.is_boil(),
            step_props: &step.props,
            timer: screens::step_timer(&step.state_text),
            kettle: &kettle,
            kettle_name: &kettle_name,
            sensor_value,
            heater_on,
            unit: &unit,
        };
        let frame = screens::kettle_frame(&view, multi, &mut self.blink);
        self.write(&frame);
    }

    /// Iterates all known kettles, holding each on screen for one refresh
    /// interval. Kettles whose lookup fails are logged and skipped.
    async fn show_multidisplay(&mut self, step: &StepSnapshot, refresh: Duration) {
        let kettles = match self.client.kettle_state().await {
            Ok(kettles) => kettles,
            Err(e) => {
                warn!("kettle state unavailable: {}", e);
                Vec::new()
            }
        };
        if kettles.is_empty() {
            // Nothing to cycle through; keep the cadence anyway.
            sleep(refresh).await;
            return;
        }
        for kettle in &kettles {
            self.show_kettle(step, Some(&kettle.id), true).await;
            sleep(refresh).await;
        }
    }

    /// Iterates all sensors of the configured type, one per refresh
    /// interval. Without a configured type, shows a static hint.
    async fn show_sensordisplay(&mut self, refresh: Duration) {
        let Some(sensor_type) = settings::sensor_type(&self.client).await else {
            let frame = screens::sensor_placeholder_frame();
            self.write(&frame);
            sleep(refresh).await;
            return;
        };

        let sensors = match self.client.sensor_state().await {
            Ok(sensors) => sensors,
            Err(e) => {
                warn!("sensor state unavailable: {}", e);
                Vec::new()
            }
        };

        let mut shown = 0usize;
        for sensor in sensors.iter().filter(|s| s.sensor_type == sensor_type) {
            let value = match self.client.sensor_value(&sensor.id).await {
                Ok(value) => value,
                Err(e) => {
                    warn!("sensor {} value unavailable: {}", sensor.id, e);
                    None
                }
            };
            let name = self.charmap.decode(&sensor.name);
            let frame = screens::sensor_frame(&name, value);
            self.write(&frame);
            sleep(refresh).await;
            shown += 1;
        }
        if shown == 0 {
            // No sensor matched the configured type; sleep so the loop
            // never spins hot against the host.
            sleep(refresh).await;
        }
    }

    async fn resolve_kettle(&self, kettle_id: Option<&str>) -> KettleSnapshot {
        let Some(id) = kettle_id else {
            warn!("no kettle configured for single mode");
            return KettleSnapshot::placeholder();
        };
        match self.client.kettle_state().await {
            Ok(kettles) => match kettles.into_iter().find(|k| k.id == id) {
                Some(kettle) => kettle,
                None => {
                    warn!("no kettle found with id {}", id);
                    KettleSnapshot::placeholder()
                }
            },
            Err(e) => {
                warn!("kettle lookup failed for {}: {}", id, e);
                KettleSnapshot::placeholder()
            }
        }
    }

    async fn heater_state(&self, kettle: &KettleSnapshot) -> bool {
        let Some(heater_id) = kettle.heater.as_deref() else {
            return false;
        };
        match self.client.actor_state(heater_id).await {
            Ok(actor) => actor.state,
            Err(e) => {
                warn!("heater {} state unavailable: {}", heater_id, e);
                false
            }
        }
    }

    async fn kettle_sensor_value(&self, kettle: &KettleSnapshot) -> Option<f64> {
        let sensor_id = kettle.sensor.as_deref()?;
        match self.client.sensor_value(sensor_id).await {
            Ok(value) => value,
            Err(e) => {
                warn!("sensor {} value unavailable: {}", sensor_id, e);
                None
            }
        }
    }

    /// Pushes a frame to the panel. Write failures are logged and swallowed;
    /// the next scheduled pass is the implicit retry.
    fn write(&mut self, frame: &Frame) {
        if let Some(panel) = self.panel.as_mut() {
            if let Err(e) = panel.write_frame(frame) {
                error!("failed to write frame to panel: {}", e);
            }
        }
    }
}
