/*
 *  glyphs.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  Custom 5x8 glyph patterns uploaded to the HD44780 CGRAM.
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

/// CGRAM slot assignments. Codes 0..=5 are printable once uploaded.
pub const GLYPH_MUG: u8 = 0x00;
pub const GLYPH_SNOWFLAKE: u8 = 0x01;
pub const GLYPH_A_UMLAUT: u8 = 0x02;
pub const GLYPH_O_UMLAUT: u8 = 0x03;
pub const GLYPH_U_UMLAUT: u8 = 0x04;
pub const GLYPH_ESZETT: u8 = 0x05;

/// Beer mug, shown top-right while the kettle heater is on.
pub const PATTERN_MUG: [u8; 8] = [0b11100, 0b00000, 0b11100, 0b11111, 0b11101, 0b11101, 0b11111, 0b11100];

/// Snowflake for cooling actors. Closer to a star, like the ones on a fridge.
pub const PATTERN_SNOWFLAKE: [u8; 8] = [0b00100, 0b10101, 0b01110, 0b11111, 0b01110, 0b10101, 0b00100, 0b00000];

// The A00 ROM only carries the lowercase umlauts, so the uppercase forms and
// the eszett are uploaded as custom glyphs. A02 panels have them natively.
pub const PATTERN_A_UMLAUT: [u8; 8] = [0b10001, 0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b00000];
pub const PATTERN_O_UMLAUT: [u8; 8] = [0b10001, 0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110, 0b00000];
pub const PATTERN_U_UMLAUT: [u8; 8] = [0b01010, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110, 0b00000];
pub const PATTERN_ESZETT: [u8; 8] = [0b00000, 0b00000, 0b11100, 0b10010, 0b10100, 0b10010, 0b11100, 0b10000];

/// Upload set in slot order, one entry per CGRAM code.
pub const GLYPH_SET: [(u8, [u8; 8]); 6] = [
    (GLYPH_MUG, PATTERN_MUG),
    (GLYPH_SNOWFLAKE, PATTERN_SNOWFLAKE),
    (GLYPH_A_UMLAUT, PATTERN_A_UMLAUT),
    (GLYPH_O_UMLAUT, PATTERN_O_UMLAUT),
    (GLYPH_U_UMLAUT, PATTERN_U_UMLAUT),
    (GLYPH_ESZETT, PATTERN_ESZETT),
];
