/*
 *  screens.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  Screen selection and fixed 20x4 line layout. Everything in here is a pure
 *  function from snapshots to a Frame so it can be tested without a panel.
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

use chrono::{DateTime, Local};

use crate::brewinfo::KettleSnapshot;
use crate::deutils::hms_to_seconds;
use crate::glyphs::GLYPH_MUG;
use crate::hops::next_hop_timer;

pub const ROWS: usize = 4;
pub const COLS: usize = 20;

/// Which of the four fixed screens a render pass shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Standby,
    Multi,
    Single,
    Sensor,
}

impl Screen {
    /// Pure transition function of (active step present) x (mode setting).
    /// No step means standby regardless of mode; an unrecognized mode falls
    /// through to standby as well.
    pub fn select(step_active: bool, mode: &str) -> Screen {
        if !step_active {
            return Screen::Standby;
        }
        match mode {
            "Multidisplay" => Screen::Multi,
            "Singledisplay" => Screen::Single,
            "Sensordisplay" => Screen::Sensor,
            _ => Screen::Standby,
        }
    }
}

/// Four fixed-width lines plus the heater indicator cell at (0,19).
/// Invariant: every line is exactly `COLS` characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub lines: [String; ROWS],
    pub heater_cell: Option<char>,
}

impl Frame {
    pub fn new(lines: [String; ROWS]) -> Self {
        Frame {
            lines: lines.map(|l| fit(&l, COLS)),
            heater_cell: None,
        }
    }

    fn with_heater(mut self, cell: char) -> Self {
        self.heater_cell = Some(cell);
        self
    }
}

/// Truncate to `width` characters, then pad with spaces. Counts chars, not
/// bytes; decoded CGRAM codes and the degree sign are single cells.
pub fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    for _ in len..width {
        out.push(' ');
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Remaining-time text derived from the step state description.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTimer {
    pub text: String,
    pub running: bool,
}

/// Normalizes the host's free-text step state ("Status: 00:14:23",
/// "Waiting for Target Temp", empty) into the line-2 column.
pub fn step_timer(state_text: &str) -> StepTimer {
    let cleaned = state_text.replace("Status: ", "");
    if cleaned.contains("Waiting for Target Temp") {
        StepTimer { text: "Wait".to_string(), running: false }
    } else if cleaned.is_empty() {
        StepTimer { text: cleaned, running: false }
    } else {
        StepTimer { text: cleaned, running: true }
    }
}

/// Heater indicator for the top-right cell. Single mode blinks the mug each
/// render pass while the heater is on, so the brewer can see the loop is
/// alive even when the temperature sits still; multi mode shows it steady.
pub fn heater_cell(heater_on: bool, multi: bool, blink: &mut bool) -> char {
    if multi {
        return if heater_on { GLYPH_MUG as char } else { ' ' };
    }
    if heater_on && !*blink {
        *blink = true;
        GLYPH_MUG as char
    } else {
        *blink = false;
        ' '
    }
}

/// Standby screen: product banner, brewery, IP, wall clock.
pub fn standby_frame(version: &str, brewery: &str, ip: &str, now: DateTime<Local>) -> Frame {
    Frame::new([
        format!("CBPI       {}", version),
        brewery.to_string(),
        format!("IP: {}", ip),
        now.format("%Y-%m-%d %H:%M:%S").to_string(),
    ])
}

/// Inputs for one kettle screen, assembled by the loop from host snapshots.
/// Names arrive already charmap-decoded.
#[derive(Debug, Clone)]
pub struct KettleView<'a> {
    pub step_name: &'a str,
    pub step_is_boil: bool,
    pub step_props: &'a serde_json::Map<String, serde_json::Value>,
    pub timer: StepTimer,
    pub kettle: &'a KettleSnapshot,
    pub kettle_name: &'a str,
    pub sensor_value: Option<f64>,
    pub heater_on: bool,
    pub unit: &'a str,
}

/// Single-kettle screen, also rendered per kettle in multi mode.
pub fn kettle_frame(view: &KettleView<'_>, multi: bool, blink: &mut bool) -> Frame {
    let line1 = view.step_name.to_string();

    // Kettle name is an 11-char column when the step timer is shown.
    let line2 = if view.timer.running {
        format!("{:<11} {}", truncate(view.kettle_name, 11), view.timer.text)
    } else {
        view.kettle_name.to_string()
    };

    let (line3, line4) = if view.step_is_boil {
        let line3 = match view.sensor_value {
            Some(value) => format!(
                "Set|Act:{:4.0}°{:5.1}°{}",
                view.kettle.target_temp, value, view.unit
            ),
            None => format!("Set|Act:{:4.0}° n.a °{}", view.kettle.target_temp, view.unit),
        };
        let time_left = hms_to_seconds(&view.timer.text).map(|s| s as i64);
        let line4 = match time_left.and_then(|t| next_hop_timer(view.step_props, t)) {
            Some(hop) => format!("Add Hop in: {}", hop),
            None => String::new(),
        };
        (line3, line4)
    } else {
        let line3 = format!("Targ. Temp:{:6.2}°{}", view.kettle.target_temp, view.unit);
        let line4 = match view.sensor_value {
            Some(value) => format!("Curr. Temp:{:6.2}°{}", value, view.unit),
            None => "Curr. Temp: No Data".to_string(),
        };
        (line3, line4)
    };

    Frame::new([line1, line2, line3, line4])
        .with_heater(heater_cell(view.heater_on, multi, blink))
}

/// One sensor of the configured type, shown in turn.
pub fn sensor_frame(sensor_name: &str, value: Option<f64>) -> Frame {
    let value_text = match value {
        Some(v) => v.to_string(),
        None => "No Data".to_string(),
    };
    Frame::new([
        "CBPi4 LCD Sensormode".to_string(),
        "-".repeat(COLS),
        sensor_name.to_string(),
        value_text,
    ])
}

/// Shown while no sensor type has been configured for sensor mode.
pub fn sensor_placeholder_frame() -> Frame {
    Frame::new([
        "CBPi4 LCD Sensormode".to_string(),
        "-".repeat(COLS),
        "no sensor selected".to_string(),
        "or defined".to_string(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{Map, json};

    fn kettle() -> KettleSnapshot {
        serde_json::from_value(json!({
            "id": "k1", "name": "MashTun", "target_temp": 66.5,
            "heater": "h1", "sensor": "t1"
        }))
        .unwrap()
    }

    fn view<'a>(
        kettle: &'a KettleSnapshot,
        props: &'a Map<String, serde_json::Value>,
        boil: bool,
        timer: StepTimer,
        sensor_value: Option<f64>,
    ) -> KettleView<'a> {
        KettleView {
            step_name: if boil { "Boil" } else { "Mash Step" },
            step_is_boil: boil,
            step_props: props,
            timer,
            kettle,
            kettle_name: &kettle.name,
            sensor_value,
            heater_on: true,
            unit: "C",
        }
    }

    fn assert_frame_width(frame: &Frame) {
        for line in &frame.lines {
            assert_eq!(line.chars().count(), COLS, "line {:?}", line);
        }
    }

    #[test]
    fn test_screen_selection() {
        assert_eq!(Screen::select(false, "Multidisplay"), Screen::Standby);
        assert_eq!(Screen::select(false, "whatever"), Screen::Standby);
        assert_eq!(Screen::select(true, "Multidisplay"), Screen::Multi);
        assert_eq!(Screen::select(true, "Singledisplay"), Screen::Single);
        assert_eq!(Screen::select(true, "Sensordisplay"), Screen::Sensor);
        // Unrecognized mode takes the default branch.
        assert_eq!(Screen::select(true, "Discodisplay"), Screen::Standby);
    }

    #[test]
    fn test_all_frames_are_exactly_20_chars() {
        let now = Local.with_ymd_and_hms(2026, 8, 31, 18, 4, 5).unwrap();
        assert_frame_width(&standby_frame("4.4.7", "Hausbrauerei Überberg", "Not connected", now));
        assert_frame_width(&sensor_frame("Fermenter Probe", Some(18.25)));
        assert_frame_width(&sensor_placeholder_frame());

        let k = kettle();
        let props = Map::new();
        let mut blink = false;
        let timer = StepTimer { text: "00:45:00".to_string(), running: true };
        assert_frame_width(&kettle_frame(&view(&k, &props, true, timer, Some(98.4)), false, &mut blink));
        let timer = StepTimer { text: "Wait".to_string(), running: false };
        assert_frame_width(&kettle_frame(&view(&k, &props, false, timer, None), true, &mut blink));
    }

    #[test]
    fn test_standby_layout() {
        let now = Local.with_ymd_and_hms(2026, 8, 31, 18, 4, 5).unwrap();
        let frame = standby_frame("4.4.7", "Braustube", "192.168.0.17", now);
        assert_eq!(frame.lines[0], "CBPI       4.4.7    ");
        assert_eq!(frame.lines[1], "Braustube           ");
        assert_eq!(frame.lines[2], "IP: 192.168.0.17    ");
        assert_eq!(frame.lines[3], "2026-08-31 18:04:05 ");
        assert!(frame.heater_cell.is_none());
    }

    #[test]
    fn test_step_timer_normalization() {
        assert_eq!(
            step_timer("Status: 00:14:23"),
            StepTimer { text: "00:14:23".to_string(), running: true }
        );
        let wait = step_timer("Waiting for Target Temp");
        assert_eq!(wait.text, "Wait");
        assert!(!wait.running);
        assert!(!step_timer("").running);
    }

    #[test]
    fn test_non_boil_kettle_lines() {
        let k = kettle();
        let props = Map::new();
        let mut blink = false;
        let timer = StepTimer { text: "00:14:23".to_string(), running: true };
        let frame = kettle_frame(&view(&k, &props, false, timer, Some(64.31)), false, &mut blink);
        assert_eq!(frame.lines[0], "Mash Step           ");
        assert_eq!(frame.lines[1], "MashTun     00:14:23");
        assert_eq!(frame.lines[2], "Targ. Temp: 66.50°C ");
        assert_eq!(frame.lines[3], "Curr. Temp: 64.31°C ");
    }

    #[test]
    fn test_kettle_name_column_is_11_wide() {
        let mut k = kettle();
        k.name = "Extraordinary Lauter Tun".to_string();
        let props = Map::new();
        let mut blink = false;
        let timer = StepTimer { text: "00:05:00".to_string(), running: true };
        let view = KettleView { kettle_name: &k.name, ..view(&k, &props, false, timer, None) };
        let frame = kettle_frame(&view, false, &mut blink);
        assert_eq!(frame.lines[1], "Extraordina 00:05:00");
    }

    #[test]
    fn test_boil_lines_with_hop_countdown() {
        let k = kettle();
        let props: Map<String, serde_json::Value> = [
            ("Hop_1".to_string(), json!(10)),
            ("Hop_2".to_string(), json!(40)),
            ("Hop_3".to_string(), json!(70)),
        ]
        .into_iter()
        .collect();
        let mut blink = false;
        let timer = StepTimer { text: "01:00:00".to_string(), running: true };
        let frame = kettle_frame(&view(&k, &props, true, timer, Some(99.6)), false, &mut blink);
        assert_eq!(frame.lines[2], "Set|Act:  66° 99.6°C");
        assert_eq!(frame.lines[3], "Add Hop in: 00:20:00");
    }

    #[test]
    fn test_boil_sensor_fallback() {
        let k = kettle();
        let props = Map::new();
        let mut blink = false;
        let timer = StepTimer { text: "01:00:00".to_string(), running: true };
        let frame = kettle_frame(&view(&k, &props, true, timer, None), false, &mut blink);
        assert_eq!(frame.lines[2], "Set|Act:  66° n.a °C");
        // no hops configured: line 4 stays blank
        assert_eq!(frame.lines[3], " ".repeat(20));
    }

    #[test]
    fn test_heater_blink_single_vs_multi() {
        let mut blink = false;
        // single mode: consecutive passes alternate mug and blank
        assert_eq!(heater_cell(true, false, &mut blink), GLYPH_MUG as char);
        assert_eq!(heater_cell(true, false, &mut blink), ' ');
        assert_eq!(heater_cell(true, false, &mut blink), GLYPH_MUG as char);
        // heater off: always blank, resets the toggle
        assert_eq!(heater_cell(false, false, &mut blink), ' ');

        // multi mode: steady, toggle untouched
        let mut blink = false;
        assert_eq!(heater_cell(true, true, &mut blink), GLYPH_MUG as char);
        assert_eq!(heater_cell(true, true, &mut blink), GLYPH_MUG as char);
        assert_eq!(heater_cell(false, true, &mut blink), ' ');
        assert!(!blink);
    }
}
