/*
 *  display/error.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  Unified error types for the LCD subsystem
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

use std::error::Error;
use std::fmt;

/// Unified error type for all panel operations
#[derive(Debug)]
pub enum DisplayError {
    /// Hardware initialization failed (wrong address, panel absent)
    InitializationFailed(String),

    /// I2C communication error
    I2cError(String),

    /// Cursor position outside the 20x4 grid
    OutOfBounds { row: u8, col: u8 },

    /// CGRAM slot outside 0..=7
    InvalidGlyphSlot(u8),

    /// Generic error with message
    Other(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InitializationFailed(msg) =>
                write!(f, "Display initialization failed: {}", msg),
            DisplayError::I2cError(msg) =>
                write!(f, "I2C communication error: {}", msg),
            DisplayError::OutOfBounds { row, col } =>
                write!(f, "Cursor position ({}, {}) outside the panel", row, col),
            DisplayError::InvalidGlyphSlot(slot) =>
                write!(f, "Invalid CGRAM slot {} (must be 0..=7)", slot),
            DisplayError::Other(msg) =>
                write!(f, "{}", msg),
        }
    }
}

impl Error for DisplayError {}

// Conversion from Linux I2C errors
impl From<linux_embedded_hal::I2CError> for DisplayError {
    fn from(err: linux_embedded_hal::I2CError) -> Self {
        DisplayError::I2cError(format!("{:?}", err))
    }
}
