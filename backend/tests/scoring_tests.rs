//! Scoring model tests
//!
//! Tests for the pure pipeline stages the evaluator is built from:
//! - Linear mapping and clamping
//! - Risk factor budgets and the final probability
//! - Sliding windows and field-wise aggregation

use proptest::prelude::*;
use shared::{
    average_numeric_fields, claim_probability, clamp_value, effective_window_size, linear_map,
    max_numeric_fields, score_contributions, sliding_windows, total_risk_points,
    AggregatedRecord, ClampBounds, ValueRange, RISK_FACTORS,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Each factor reaches exactly its cap at the top of its source range
    #[test]
    fn test_each_factor_reaches_cap() {
        for factor in RISK_FACTORS.iter() {
            assert_eq!(factor.points(factor.source.to), factor.cap, "{}", factor.name);
            assert_eq!(factor.points(factor.source.to * 2.0), factor.cap, "{}", factor.name);
        }
    }

    /// Chance of rain only starts scoring above 30%
    #[test]
    fn test_rain_factor_dead_zone() {
        let rain = RISK_FACTORS
            .iter()
            .find(|f| f.field == "daily_chance_of_rain")
            .unwrap();
        assert_eq!(rain.points(0.0), 0.0);
        assert_eq!(rain.points(30.0), 0.0);
        assert!(rain.points(31.0) > 0.0);
    }

    /// Final remap divides by 90 even though caps sum to 95
    #[test]
    fn test_probability_normalization() {
        assert_eq!(claim_probability(0.0), 0.0);
        assert_eq!(claim_probability(9.0), 10.0);
        assert_eq!(claim_probability(90.0), 99.0);
        assert_eq!(claim_probability(95.0), 99.0);
    }

    /// Threshold crossing: 63 raw points is exactly 70%
    #[test]
    fn test_threshold_boundary() {
        assert_eq!(claim_probability(63.0), 70.0);
    }

    /// Scoring a mixed record
    #[test]
    fn test_partial_deviation_record() {
        let deviation = AggregatedRecord::from_iter([
            ("avghumidity", 20.0),
            ("maxwind_kph", 15.0),
            ("totalsnow_cm", 0.0),
        ]);
        let contributions = score_contributions(&deviation);
        // 3 points humidity + 7.5 points wind
        assert_eq!(total_risk_points(&contributions), 10.5);
    }

    /// Window averages then field maxima
    #[test]
    fn test_average_then_max() {
        let samples: Vec<AggregatedRecord> = [1.0, 3.0, 5.0, 1.0]
            .iter()
            .map(|v| AggregatedRecord::from_iter([("uv", *v)]))
            .collect();
        let averages: Vec<AggregatedRecord> = sliding_windows(samples.len(), 2)
            .into_iter()
            .map(|w| average_numeric_fields(&samples[w]))
            .collect();
        let worst = max_numeric_fields(&averages);
        assert_eq!(worst.get("uv"), Some(4.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for non-degenerate ranges
    fn range_strategy() -> impl Strategy<Value = ValueRange> {
        (-1000.0f64..1000.0, 0.5f64..500.0, any::<bool>()).prop_map(|(from, span, up)| {
            if up {
                ValueRange::new(from, from + span)
            } else {
                ValueRange::new(from, from - span)
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Clamped linear maps never leave the target range
        #[test]
        fn prop_linear_map_stays_in_target(
            value in -1e6f64..1e6,
            source in range_strategy(),
            target in range_strategy(),
        ) {
            let mapped = linear_map(value, source, target, true);
            prop_assert!(mapped >= target.lower() && mapped <= target.upper());
        }

        /// Endpoints of the source land on endpoints of the target
        #[test]
        fn prop_linear_map_endpoints(source in range_strategy(), target in range_strategy()) {
            let start = linear_map(source.from, source, target, false);
            prop_assert!((start - target.from).abs() < 1e-9);
        }

        /// Clamping respects every present bound, including zero
        #[test]
        fn prop_clamp_value_respects_bounds(
            value in -1e6f64..1e6,
            min in proptest::option::of(-100.0f64..0.0),
            max in proptest::option::of(0.0f64..100.0),
        ) {
            let clamped = clamp_value(value, ClampBounds::new(min, max));
            if let Some(min) = min {
                prop_assert!(clamped >= min);
            }
            if let Some(max) = max {
                prop_assert!(clamped <= max);
            }
            if min.is_none() && max.is_none() {
                prop_assert_eq!(clamped, value);
            }
        }

        /// Contributions stay within their caps and the probability within [0, 99]
        #[test]
        fn prop_probability_bounded(deviations in proptest::collection::vec(0.0f64..500.0, 7)) {
            let deviation: AggregatedRecord = RISK_FACTORS
                .iter()
                .zip(deviations)
                .map(|(factor, value)| (factor.field, value))
                .collect();
            let contributions = score_contributions(&deviation);
            for c in &contributions {
                prop_assert!(c.points >= 0.0 && c.points <= c.cap);
            }
            let p = claim_probability(total_risk_points(&contributions));
            prop_assert!((0.0..=99.0).contains(&p));
        }

        /// Windows are contiguous, sized, and cover every start position
        #[test]
        fn prop_sliding_windows_shape(len in 0usize..200, size in 1usize..50) {
            let windows = sliding_windows(len, size);
            if size > len {
                prop_assert!(windows.is_empty());
            } else {
                prop_assert_eq!(windows.len(), len - size + 1);
                for (i, w) in windows.iter().enumerate() {
                    prop_assert_eq!(w.start, i);
                    prop_assert_eq!(w.len(), size);
                }
            }
        }

        /// The effective window always fits the data when there is any
        #[test]
        fn prop_effective_window_fits(configured in 0usize..100, samples in 1usize..500) {
            let size = effective_window_size(configured, samples);
            prop_assert!(size >= 1 && size <= samples);
            prop_assert!(!sliding_windows(samples, size).is_empty());
        }
    }
}
