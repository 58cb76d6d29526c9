//! Claim risk scoring model
//!
//! Each weather factor owns a fixed budget of risk points. A factor's deviation from
//! the ideal profile is mapped linearly from its source range onto `[0, cap]` and
//! clamped there. The points are summed, remapped from `[0, 90]` onto `[0, 100]` and
//! clamped to `[0, 99]` to give the final probability.
//!
//! The factor caps sum to 95 while the normalization divisor is 90, so a history at
//! the adverse end of every factor saturates at 99.

use serde::{Deserialize, Serialize};

use crate::aggregation::AggregatedRecord;
use crate::types::{ClampBounds, ValueRange};

/// Probability above which a claim is no longer considered valid
pub const DEFAULT_VALIDITY_THRESHOLD: f64 = 70.0;

/// Raw risk points that map to a probability of 100
pub const RISK_NORMALIZATION_RANGE: ValueRange = ValueRange::new(0.0, 90.0);

/// Probability scale the raw points are remapped onto
pub const PROBABILITY_RANGE: ValueRange = ValueRange::new(0.0, 100.0);

/// Final clamp applied to the probability
pub const PROBABILITY_BOUNDS: ClampBounds = ClampBounds::between(0.0, 99.0);

/// One weather factor's share of the risk budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactor {
    pub name: &'static str,
    /// Field of the deviation record this factor reads
    pub field: &'static str,
    pub source: ValueRange,
    pub cap: f64,
}

impl RiskFactor {
    const fn new(name: &'static str, field: &'static str, from: f64, to: f64, cap: f64) -> Self {
        Self {
            name,
            field,
            source: ValueRange::new(from, to),
            cap,
        }
    }

    /// Points awarded for `value`, always within `[0, cap]` for finite input
    pub fn points(&self, value: f64) -> f64 {
        let mapped = linear_map(value, self.source, ValueRange::new(0.0, self.cap), true);
        clamp_value(mapped, ClampBounds::at_most(self.cap))
    }
}

/// The seven factors scored against the worst window
pub static RISK_FACTORS: [RiskFactor; 7] = [
    RiskFactor::new("avg humidity", "avghumidity", 0.0, 100.0, 15.0),
    RiskFactor::new("avg temperature", "avgtemp_c", 0.0, 50.0, 10.0),
    RiskFactor::new("max temperature", "maxtemp_c", 0.0, 50.0, 15.0),
    RiskFactor::new("chance of rain", "daily_chance_of_rain", 30.0, 100.0, 10.0),
    RiskFactor::new("max wind", "maxwind_kph", 0.0, 30.0, 15.0),
    RiskFactor::new("total snow", "totalsnow_cm", 0.0, 50.0, 15.0),
    RiskFactor::new("total precipitation", "totalprecip_in", 0.0, 30.0, 15.0),
];

/// Clamp `value` into `bounds`; an absent bound leaves that side open
pub fn clamp_value(value: f64, bounds: ClampBounds) -> f64 {
    let mut clamped = value;
    if let Some(min) = bounds.min {
        if clamped < min {
            clamped = min;
        }
    }
    if let Some(max) = bounds.max {
        if clamped > max {
            clamped = max;
        }
    }
    clamped
}

/// Affine interpolation of `value` from `source` onto `target`.
///
/// With `clamp`, the result is held inside the target range's own endpoints.
/// A degenerate source range (`from == to`) yields a non-finite slope, so callers
/// must not pass one.
pub fn linear_map(value: f64, source: ValueRange, target: ValueRange, clamp: bool) -> f64 {
    let slope = (target.to - target.from) / (source.to - source.from);
    let mapped = target.from + slope * (value - source.from);
    if clamp {
        clamp_value(mapped, ClampBounds::between(target.lower(), target.upper()))
    } else {
        mapped
    }
}

/// Points one factor contributed to the total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreContribution {
    pub factor: String,
    pub field: String,
    /// Deviation that was scored; `None` when the field was unavailable
    pub value: Option<f64>,
    pub points: f64,
    pub cap: f64,
}

/// Final probability in `[0, 99]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct ClaimProbability(f64);

impl ClaimProbability {
    /// Wrap a probability, rejecting non-finite values
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether the claim holds: risk at or below `threshold`
    pub fn is_valid_at(&self, threshold: f64) -> bool {
        self.0 <= threshold
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(DEFAULT_VALIDITY_THRESHOLD)
    }
}

impl std::fmt::Display for ClaimProbability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = (self.0 * 100.0).round() / 100.0;
        write!(f, "{}", rounded)
    }
}

/// Score every factor against a deviation record.
///
/// Missing fields contribute zero points and keep `value: None`.
pub fn score_contributions(deviation: &AggregatedRecord) -> Vec<ScoreContribution> {
    RISK_FACTORS
        .iter()
        .map(|factor| {
            let value = deviation.get(factor.field);
            ScoreContribution {
                factor: factor.name.to_string(),
                field: factor.field.to_string(),
                value,
                points: value.map(|v| factor.points(v)).unwrap_or(0.0),
                cap: factor.cap,
            }
        })
        .collect()
}

/// Sum of the points of every contribution
pub fn total_risk_points(contributions: &[ScoreContribution]) -> f64 {
    contributions.iter().map(|c| c.points).sum()
}

/// Remap raw risk points onto the probability scale and clamp to `[0, 99]`
pub fn claim_probability(raw_points: f64) -> f64 {
    clamp_value(
        linear_map(raw_points, RISK_NORMALIZATION_RANGE, PROBABILITY_RANGE, true),
        PROBABILITY_BOUNDS,
    )
}
