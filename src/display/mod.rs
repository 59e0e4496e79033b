/*
 *  display/mod.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  LCD subsystem: driver trait, drivers, and the 20x4 panel frontend
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

pub mod error;
pub mod traits;
pub mod drivers;

use log::debug;

use crate::charmap::Charmap;
use crate::glyphs::GLYPH_SET;
use crate::screens::Frame;
use error::DisplayError;
use traits::CharDisplay;

pub type BoxedDriver = Box<dyn CharDisplay>;

/// 20x4 panel frontend over any character display driver. Owns charmap
/// encoding and the frame write path; the driver owns the wire.
pub struct LcdPanel {
    driver: BoxedDriver,
    charmap: Charmap,
}

impl LcdPanel {
    /// Initializes the controller, uploads the custom glyph set and hides
    /// the cursor. Fails when the panel does not answer (wrong address,
    /// loose wiring); the caller decides how loudly to complain.
    pub fn new(mut driver: BoxedDriver, charmap: Charmap) -> Result<Self, DisplayError> {
        driver.init()?;
        for (code, pattern) in &GLYPH_SET {
            driver.create_glyph(*code, pattern)?;
        }
        driver.set_cursor_visible(false)?;
        debug!("LCD panel initialized, {} custom glyphs loaded", GLYPH_SET.len());
        Ok(LcdPanel { driver, charmap })
    }

    /// Writes a full frame: four fixed-width lines, then the heater
    /// indicator cell at (0, 19) when the frame carries one. No partial
    /// updates; the panel always shows a whole frame.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.driver.set_cursor_visible(false)?;
        for (row, line) in frame.lines.iter().enumerate() {
            let encoded: Vec<u8> = line.chars().map(|c| self.charmap.encode_char(c)).collect();
            self.driver.set_cursor(row as u8, 0)?;
            self.driver.write_bytes(&encoded)?;
        }
        if let Some(cell) = frame.heater_cell {
            self.driver.set_cursor(0, 19)?;
            self.driver.write_bytes(&[self.charmap.encode_char(cell)])?;
        }
        Ok(())
    }
}
