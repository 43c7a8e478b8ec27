// src/lib.rs
//! Fatigue damage of a stress signal by ASTM E1049-85 rainflow counting,
//! a fixed-width range histogram and Miner's rule with Goodman correction.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

pub mod config;
pub mod damage;
pub mod error;
pub mod histogram;
pub mod material;
pub mod peaks;
pub mod pipeline;
pub mod rainflow;
pub mod report;
pub mod signal;

#[cfg(feature = "cli")]
pub mod app_logic;
#[cfg(feature = "cli")]
pub mod logging;

pub use error::{FatigueError, Result};

// When the "wasm" feature is enabled, expose the pipeline to the host with the default material.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn run_damage(stress: &[f64], width: f64) -> std::result::Result<f64, JsValue> {
    pipeline::calculate_damage(stress, width, &material::Material::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn run_damage_history(
    stress: &[f64],
    width: f64,
    start: usize,
) -> std::result::Result<Vec<f64>, JsValue> {
    pipeline::damage_history(stress, width, start, &material::Material::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
