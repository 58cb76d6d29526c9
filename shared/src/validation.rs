//! Validation utilities for claim inputs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::normalize_crop_name;
use crate::types::GpsCoordinates;

// ============================================================================
// Claim Validations
// ============================================================================

/// Validate that the insured period does not end before it starts
pub fn validate_insured_period(
    insured_from: DateTime<Utc>,
    insured_to: DateTime<Utc>,
) -> Result<(), &'static str> {
    if insured_from > insured_to {
        return Err("Insured period must not end before it starts");
    }
    Ok(())
}

/// Validate latitude is within [-90, 90] and longitude within [-180, 180]
pub fn validate_coordinates(location: &GpsCoordinates) -> Result<(), &'static str> {
    if location.latitude < Decimal::from(-90) || location.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if location.longitude < Decimal::from(-180) || location.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate the crop name has something left after dropping spaces
pub fn validate_crop_name(name: &str) -> Result<(), &'static str> {
    if normalize_crop_name(name).is_empty() {
        return Err("Crop name must not be blank");
    }
    Ok(())
}

/// Validate the insured area is positive
pub fn validate_area(area: Decimal) -> Result<(), &'static str> {
    if area <= Decimal::ZERO {
        return Err("Insured area must be positive");
    }
    Ok(())
}

// ============================================================================
// Evaluation Settings
// ============================================================================

/// Validate the sliding-window size requested by the caller
pub fn validate_check_intervals(check_intervals: usize) -> Result<(), &'static str> {
    if check_intervals == 0 {
        return Err("Check intervals must be at least 1");
    }
    Ok(())
}

/// Validate the validity threshold is a probability
pub fn validate_threshold(threshold: f64) -> Result<(), &'static str> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err("Validity threshold must be between 0 and 100");
    }
    Ok(())
}
