//! WASM bindings for venue seat layouts.
//!
//! Lets the browser-based venue editor generate and audit seats with the same
//! code the CLI uses.

use log::{error, info};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

use seatgen_core::{
    generate, validate, validate_along, GeneratedSeat, LayoutOptions, Polygon, RowSpec, Section,
};

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsError> {
    let level: Option<String> = serde_wasm_bindgen::from_value(level)?;
    log::set_max_level(seatgen_core::parse_log_level(level.as_deref()));
    Ok(())
}

/// Lays out seats for one section.
///
/// # Arguments
/// * `section` - `{ id, name, polygon: { vertices: [{x, y}] }, zone? }`.
/// * `rows` - Array of `{ label, seatCount, numberRangeStart, numberRangeEnd, direction }`.
/// * `options` - Partial `LayoutOptions`; `null`/`undefined` for defaults.
///
/// # Returns
/// `{ seats, diagnostics }`; throws on invalid input or an infeasible row.
#[wasm_bindgen]
pub fn generate_layout(section: JsValue, rows: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let section: Section = serde_wasm_bindgen::from_value(section)?;
    let rows: Vec<RowSpec> = serde_wasm_bindgen::from_value(rows)?;
    let options: LayoutOptions = if options.is_null() || options.is_undefined() {
        LayoutOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };
    let layout = generate(&section, &rows, &options)?;
    Ok(to_js(&layout)?)
}

/// Audits seats against a row list.
///
/// When `axis` (radians) is given, also checks each row's numbering direction.
#[wasm_bindgen]
pub fn validate_layout(seats: JsValue, rows: JsValue, axis: Option<f64>) -> Result<JsValue, JsError> {
    let seats: Vec<GeneratedSeat> = serde_wasm_bindgen::from_value(seats)?;
    let rows: Vec<RowSpec> = serde_wasm_bindgen::from_value(rows)?;
    let report = match axis {
        Some(axis) => validate_along(&seats, &rows, axis),
        None => validate(&seats, &rows),
    };
    Ok(to_js(&report)?)
}

/// Default row axis (radians) for a polygon: the angle of its longest edge.
#[wasm_bindgen]
pub fn dominant_edge_angle(polygon: JsValue) -> Result<f64, JsError> {
    let polygon: Polygon = serde_wasm_bindgen::from_value(polygon)?;
    polygon.validate()?;
    Ok(polygon.dominant_edge_angle())
}

/// Whether a polygon's edges cross each other (the generator assumes they don't).
#[wasm_bindgen]
pub fn is_self_intersecting(polygon: JsValue) -> Result<bool, JsError> {
    let polygon: Polygon = serde_wasm_bindgen::from_value(polygon)?;
    Ok(polygon.is_self_intersecting())
}

/// Maps serialize as plain objects, so `unexpectedRows` reads naturally in JS.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
