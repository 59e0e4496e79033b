/*
 *  lib.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  Library surface so integration tests can drive the render path against
 *  the mock driver.
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

pub mod brewinfo;
pub mod cbpirest;
pub mod charmap;
pub mod config;
pub mod deutils;
pub mod display;
pub mod glyphs;
pub mod hops;
pub mod netutil;
pub mod runloop;
pub mod screens;
pub mod settings;
