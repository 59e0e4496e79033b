/*
 *  display/drivers/hd44780.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  HD44780 character controller behind a PCF8574 I2C backpack, 4-bit mode.
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

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use linux_embedded_hal::{Delay, I2cdev};
use log::info;

use crate::display::error::DisplayError;
use crate::display::traits::CharDisplay;

// PCF8574 pin mapping: P0=RS, P1=RW, P2=EN, P3=backlight, P4..P7=D4..D7.
const FLAG_RS: u8 = 0x01;
const FLAG_EN: u8 = 0x04;
const FLAG_BACKLIGHT: u8 = 0x08;

// HD44780 instruction set (the subset we drive).
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_CGRAM: u8 = 0x40;
const CMD_SET_DDRAM: u8 = 0x80;

const ENTRY_LEFT_TO_RIGHT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const CURSOR_ON: u8 = 0x02;
const FUNCTION_4BIT_2LINE_5X8: u8 = 0x08;

// DDRAM start address of each row on a 20x4 panel.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// 20x4 HD44780 on `/dev/i2c-*`. The byte-level bus access is owned by
/// `linux_embedded_hal`; this driver only sequences controller commands.
pub struct Hd44780Driver {
    i2c: I2cdev,
    delay: Delay,
    address: u8,
    rows: u8,
    cols: u8,
    cursor_visible: bool,
}

impl Hd44780Driver {
    /// Opens the bus; the panel itself is not touched until `init`.
    pub fn new(i2c_bus_path: &str, address: u8) -> Result<Self, DisplayError> {
        info!("Opening HD44780 on {} at address 0x{:02X}", i2c_bus_path, address);
        let i2c = I2cdev::new(i2c_bus_path)
            .map_err(|e| DisplayError::InitializationFailed(format!(
                "failed to open {}: {}", i2c_bus_path, e
            )))?;
        Ok(Hd44780Driver {
            i2c,
            delay: Delay,
            address,
            rows: 4,
            cols: 20,
            cursor_visible: false,
        })
    }

    fn write_expander(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[byte | FLAG_BACKLIGHT])
            .map_err(DisplayError::from)
    }

    /// Latches one 4-bit transfer: data lines on P4..P7 plus an EN pulse.
    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), DisplayError> {
        let data = (nibble & 0xf0) | mode;
        self.write_expander(data | FLAG_EN)?;
        self.delay.delay_us(1);
        self.write_expander(data)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(byte & 0xf0, mode)?;
        self.write_nibble(byte << 4, mode)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.write_byte(cmd, 0)
    }

    fn data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.write_byte(value, FLAG_RS)
    }

    fn display_control(&mut self) -> Result<(), DisplayError> {
        let cursor = if self.cursor_visible { CURSOR_ON } else { 0 };
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON | cursor)
    }
}

impl CharDisplay for Hd44780Driver {
    fn dimensions(&self) -> (u8, u8) {
        (self.rows, self.cols)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on sequence per the HD44780 datasheet: three "8-bit" probes,
        // then the switch to 4-bit transfers.
        self.delay.delay_ms(50);
        for _ in 0..3 {
            self.write_nibble(0x30, 0)?;
            self.delay.delay_ms(5);
        }
        self.write_nibble(0x20, 0)?;
        self.delay.delay_ms(5);

        self.command(CMD_FUNCTION_SET | FUNCTION_4BIT_2LINE_5X8)?;
        self.display_control()?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT_TO_RIGHT)?;
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= self.rows || col >= self.cols {
            return Err(DisplayError::OutOfBounds { row, col });
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        for b in bytes {
            self.data(*b)?;
        }
        Ok(())
    }

    fn create_glyph(&mut self, code: u8, pattern: &[u8; 8]) -> Result<(), DisplayError> {
        if code > 7 {
            return Err(DisplayError::InvalidGlyphSlot(code));
        }
        self.command(CMD_SET_CGRAM | (code << 3))?;
        for row in pattern {
            self.data(row & 0x1f)?;
        }
        // Back to DDRAM addressing, home position.
        self.command(CMD_SET_DDRAM)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError> {
        self.cursor_visible = visible;
        self.display_control()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        // Clear is the one slow instruction on this controller.
        self.delay.delay_ms(2);
        Ok(())
    }
}
