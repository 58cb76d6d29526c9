//! Common types used across the evaluator

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Inclusive span of calendar days
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every day from `start` to `end`, both included. Empty when `start > end`.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .collect()
    }
}

/// A numeric interval used as the source or target of a linear map.
///
/// `from` is not required to be below `to`; a descending range maps inversely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub from: f64,
    pub to: f64,
}

impl ValueRange {
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    pub fn lower(&self) -> f64 {
        self.from.min(self.to)
    }

    pub fn upper(&self) -> f64 {
        self.from.max(self.to)
    }
}

/// Optional clamp bounds. `None` means no limit on that side.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ClampBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ClampBounds {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}
