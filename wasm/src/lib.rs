//! WebAssembly module for crop claim evaluation
//!
//! Provides client-side computation for:
//! - Previewing the risk score of an aggregated weather record
//! - Linear mapping with clamping
//! - Sliding window planning
//! - Crop name matching

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::aggregation::*;
pub use shared::models::*;
pub use shared::scoring::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Score a deviation record given as a JSON object of field name to number.
///
/// Returns the final probability in `[0, 99]`.
#[wasm_bindgen]
pub fn score_deviation(deviation_json: &str) -> Result<f64, JsValue> {
    let deviation: AggregatedRecord = serde_json::from_str(deviation_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid deviation JSON: {}", e)))?;

    let contributions = score_contributions(&deviation);
    Ok(claim_probability(total_risk_points(&contributions)))
}

/// Score a worst-window record against an ideal profile, both as JSON objects
#[wasm_bindgen]
pub fn score_against_profile(worst_window_json: &str, profile_json: &str) -> Result<f64, JsValue> {
    let worst: AggregatedRecord = serde_json::from_str(worst_window_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid worst window JSON: {}", e)))?;
    let profile: IdealProfile = serde_json::from_str(profile_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid profile JSON: {}", e)))?;

    let deviation = absolute_deviation(&worst, &profile);
    Ok(claim_probability(total_risk_points(&score_contributions(&deviation))))
}

/// Map `value` from one range onto another
#[wasm_bindgen]
pub fn map_linear(
    value: f64,
    from_start: f64,
    from_end: f64,
    to_start: f64,
    to_end: f64,
    clamp: bool,
) -> f64 {
    linear_map(
        value,
        ValueRange::new(from_start, from_end),
        ValueRange::new(to_start, to_end),
        clamp,
    )
}

/// Whether a probability means the claim holds
#[wasm_bindgen]
pub fn is_claim_valid(probability: f64) -> bool {
    ClaimProbability::new(probability)
        .map(|p| p.is_valid())
        .unwrap_or(false)
}

/// Number of windows an evaluation would average for `sample_count` samples
#[wasm_bindgen]
pub fn window_count(sample_count: usize, check_intervals: usize) -> usize {
    if sample_count == 0 {
        return 0;
    }
    let size = shared::windowing::effective_window_size(check_intervals, sample_count);
    shared::windowing::sliding_windows(sample_count, size).len()
}

/// Compare crop names the way profile selection does
#[wasm_bindgen]
pub fn crop_names_match(a: &str, b: &str) -> bool {
    normalize_crop_name(a) == normalize_crop_name(b)
}
