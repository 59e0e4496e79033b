/*
 *  display/drivers/mock.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  Mock character display for testing without hardware
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

use std::sync::{Arc, Mutex};

use crate::display::error::DisplayError;
use crate::display::traits::CharDisplay;

const ROWS: usize = 4;
const COLS: usize = 20;

/// Mock display driver for unit and integration tests. Records every write
/// into a 4x20 character grid and counts operations; the shared state handle
/// stays inspectable after the driver is boxed behind the panel.
#[derive(Debug, Clone)]
pub struct MockDriver {
    state: Arc<Mutex<MockDriverState>>,
}

/// Internal state for the mock driver (shared for inspection in tests)
#[derive(Debug)]
pub struct MockDriverState {
    /// The visible character cells, raw codes as sent
    pub grid: [[u8; COLS]; ROWS],

    /// Uploaded CGRAM patterns by slot
    pub glyphs: [Option<[u8; 8]>; 8],

    /// Cursor position (row, col)
    pub cursor: (u8, u8),

    /// Whether the underline cursor is visible
    pub cursor_visible: bool,

    /// Number of times init() was called
    pub init_count: usize,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Simulate failures (for error-path testing)
    pub simulate_init_failure: bool,
    pub simulate_write_failure: bool,
}

impl Default for MockDriverState {
    fn default() -> Self {
        MockDriverState {
            grid: [[b' '; COLS]; ROWS],
            glyphs: [None; 8],
            cursor: (0, 0),
            cursor_visible: true,
            init_count: 0,
            clear_count: 0,
            simulate_init_failure: false,
            simulate_write_failure: false,
        }
    }
}

impl MockDriverState {
    /// One grid row as a string, raw codes mapped through `char`.
    pub fn row_text(&self, row: usize) -> String {
        self.grid[row].iter().map(|&b| b as char).collect()
    }
}

impl MockDriver {
    pub fn new() -> Self {
        MockDriver { state: Arc::new(Mutex::new(MockDriverState::default())) }
    }

    /// Handle to the shared state for assertions after the driver is boxed.
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl CharDisplay for MockDriver {
    fn dimensions(&self) -> (u8, u8) {
        (ROWS as u8, COLS as u8)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.lock().unwrap();
        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("simulated".to_string()));
        }
        state.init_count += 1;
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row as usize >= ROWS || col as usize >= COLS {
            return Err(DisplayError::OutOfBounds { row, col });
        }
        self.state.lock().unwrap().cursor = (row, col);
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let mut state = self.state.lock().unwrap();
        if state.simulate_write_failure {
            return Err(DisplayError::I2cError("simulated".to_string()));
        }
        let (row, mut col) = state.cursor;
        for &b in bytes {
            if (col as usize) < COLS {
                state.grid[row as usize][col as usize] = b;
                col += 1;
            }
        }
        state.cursor = (row, col.min(COLS as u8 - 1));
        Ok(())
    }

    fn create_glyph(&mut self, code: u8, pattern: &[u8; 8]) -> Result<(), DisplayError> {
        if code > 7 {
            return Err(DisplayError::InvalidGlyphSlot(code));
        }
        self.state.lock().unwrap().glyphs[code as usize] = Some(*pattern);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError> {
        self.state.lock().unwrap().cursor_visible = visible;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.lock().unwrap();
        state.grid = [[b' '; COLS]; ROWS];
        state.clear_count += 1;
        Ok(())
    }
}
