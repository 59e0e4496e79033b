/*
 *  display/traits.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  Core trait definition for character display drivers
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

use crate::display::error::DisplayError;

/// Minimal hardware abstraction every character display driver implements.
///
/// The panel frontend only needs cursor positioning, byte writes at the
/// cursor, CGRAM glyph upload and cursor visibility. Anything bus-specific
/// stays inside the driver.
pub trait CharDisplay: Send {
    /// Rows and columns of the panel.
    fn dimensions(&self) -> (u8, u8);

    /// Initialize the display controller. Must be called before any other
    /// operation; fails when the panel does not answer on the bus.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor to (row, col), zero-based.
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Write raw character codes at the cursor. The caller is responsible
    /// for charmap encoding; codes 0..=7 address uploaded glyphs.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;

    /// Upload a 5x8 glyph pattern into CGRAM slot `code` (0..=7). Leaves the
    /// cursor position undefined; callers reposition afterwards.
    fn create_glyph(&mut self, code: u8, pattern: &[u8; 8]) -> Result<(), DisplayError>;

    /// Show or hide the underline cursor.
    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError>;

    /// Blank the whole panel.
    fn clear(&mut self) -> Result<(), DisplayError>;
}
