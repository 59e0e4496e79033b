/*
 *  tests/panel_integration.rs
 *
 *  Integration tests for the panel write path over the mock driver
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 */

use chrono::{Local, TimeZone};
use serde_json::{Map, json};

use braulcd::brewinfo::KettleSnapshot;
use braulcd::charmap::Charmap;
use braulcd::display::LcdPanel;
use braulcd::display::drivers::mock::MockDriver;
use braulcd::glyphs::{GLYPH_MUG, GLYPH_U_UMLAUT};
use braulcd::screens;

fn panel(charmap: Charmap) -> (LcdPanel, MockDriver) {
    let driver = MockDriver::new();
    let handle = driver.clone();
    let panel = LcdPanel::new(Box::new(driver), charmap).expect("mock init cannot fail");
    (panel, handle)
}

#[test]
fn test_init_uploads_glyphs_and_hides_cursor() {
    let (_panel, driver) = panel(Charmap::A00);
    let state = driver.state();
    let state = state.lock().unwrap();
    assert_eq!(state.init_count, 1);
    assert!(!state.cursor_visible);
    // six custom glyphs in slots 0..=5, slots 6/7 untouched
    for slot in 0..6 {
        assert!(state.glyphs[slot].is_some(), "slot {} empty", slot);
    }
    assert!(state.glyphs[6].is_none());
    assert!(state.glyphs[7].is_none());
}

#[test]
fn test_standby_frame_fills_the_grid() {
    let (mut panel, driver) = panel(Charmap::A00);
    let now = Local.with_ymd_and_hms(2026, 8, 31, 18, 4, 5).unwrap();
    let frame = screens::standby_frame("4.4.7", "Braustube", "192.168.0.17", now);
    panel.write_frame(&frame).unwrap();

    let state = driver.state();
    let state = state.lock().unwrap();
    assert_eq!(state.row_text(0), "CBPI       4.4.7    ");
    assert_eq!(state.row_text(1), "Braustube           ");
    assert_eq!(state.row_text(2), "IP: 192.168.0.17    ");
    assert_eq!(state.row_text(3), "2026-08-31 18:04:05 ");
}

#[test]
fn test_kettle_frame_places_heater_glyph_top_right() {
    let (mut panel, driver) = panel(Charmap::A00);
    let kettle: KettleSnapshot = serde_json::from_value(json!({
        "id": "k1", "name": "Würzepfanne", "target_temp": 100.0,
        "heater": "h1", "sensor": "t1"
    }))
    .unwrap();
    let charmap = Charmap::A00;
    let kettle_name = charmap.decode(&kettle.name);
    let props = Map::new();
    let view = screens::KettleView {
        step_name: "Boil",
        step_is_boil: true,
        step_props: &props,
        timer: screens::step_timer("Status: 00:45:00"),
        kettle: &kettle,
        kettle_name: &kettle_name,
        sensor_value: Some(99.6),
        heater_on: true,
        unit: "C",
    };
    let mut blink = false;
    let frame = screens::kettle_frame(&view, true, &mut blink);
    panel.write_frame(&frame).unwrap();

    let state = driver.state();
    let state = state.lock().unwrap();
    // heater glyph lands in the last cell of row 0, over the padded line
    assert_eq!(state.grid[0][19], GLYPH_MUG);
    assert_eq!(&state.grid[0][..4], b"Boil");
    // lowercase umlaut encodes to the A00 ROM code, not a CGRAM slot
    assert_eq!(state.grid[1][1], 0xf5);
    // degree sign is 0xDF in the A00 ROM
    assert_eq!(state.row_text(2), "Set|Act: 100\u{df} 99.6\u{df}C");
}

#[test]
fn test_a00_umlaut_substitution_reaches_the_wire() {
    let (mut panel, driver) = panel(Charmap::A00);
    let frame = screens::sensor_frame(&Charmap::A00.decode("Würze Übertemp"), Some(18.25));
    panel.write_frame(&frame).unwrap();

    let state = driver.state();
    let state = state.lock().unwrap();
    // Ü was decoded to its CGRAM code before hitting the panel
    assert_eq!(state.grid[2][6], GLYPH_U_UMLAUT);
    assert_eq!(state.row_text(3), "18.25               ");
}

#[test]
fn test_write_failure_is_an_error_not_a_panic() {
    let (mut panel, driver) = panel(Charmap::A00);
    driver.state().lock().unwrap().simulate_write_failure = true;
    let frame = screens::sensor_placeholder_frame();
    assert!(panel.write_frame(&frame).is_err());
}
