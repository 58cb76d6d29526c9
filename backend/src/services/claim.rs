//! Claim evaluation service
//!
//! Runs one claim through the pipeline: resolve the region, list the past days of
//! the insured period, fetch their hourly history one request at a time, pick the
//! crop's ideal profile, find the worst smoothed window and score its deviation
//! from the ideal.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use shared::{
    absolute_deviation, average_numeric_fields, claim_probability, effective_window_size,
    filter_past_dates_before, format_dates, matching_profiles, max_numeric_fields,
    score_contributions, sliding_windows, total_risk_points, AggregatedRecord, ClaimProbability,
    InsuredLand, ScoreContribution, WeatherSample, DEFAULT_VALIDITY_THRESHOLD,
};

use crate::config::EvaluationConfig;
use crate::error::{AppError, AppResult};
use crate::external::{IdealProfileCatalog, ReverseGeocoder, WeatherHistory};

/// Knobs for a single evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationOptions {
    /// Configured sliding window size; clamped to the samples available
    pub check_intervals: usize,
    /// Pause issued before every weather history request
    pub request_delay: Duration,
    /// Probability at or below which the claim is valid
    pub validity_threshold: f64,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            check_intervals: 5,
            request_delay: Duration::from_millis(100),
            validity_threshold: DEFAULT_VALIDITY_THRESHOLD,
        }
    }
}

impl From<&EvaluationConfig> for EvaluationOptions {
    fn from(config: &EvaluationConfig) -> Self {
        Self {
            check_intervals: config.check_intervals,
            request_delay: config.request_delay(),
            validity_threshold: config.validity_threshold,
        }
    }
}

/// Outcome of evaluating one claim
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClaimAssessment {
    pub region: String,
    pub crop: String,
    pub dates: Vec<NaiveDate>,
    pub sample_count: usize,
    pub window_size: usize,
    pub window_count: usize,
    pub worst_window: AggregatedRecord,
    pub deviation: AggregatedRecord,
    pub contributions: Vec<ScoreContribution>,
    pub raw_risk_points: f64,
    pub probability: ClaimProbability,
    pub validity_threshold: f64,
    pub valid: bool,
}

impl ClaimAssessment {
    /// One-line verdict printed by the command line tool
    pub fn summary(&self) -> String {
        format!(
            "probability that the claim is valid is {}% and the claim can be considered as {}valid",
            self.probability,
            if self.valid { "" } else { "not " }
        )
    }
}

/// Evaluates claims against historical weather
pub struct ClaimEvaluator<G, W, P> {
    geocoder: G,
    weather: W,
    profiles: P,
    options: EvaluationOptions,
}

impl<G, W, P> ClaimEvaluator<G, W, P>
where
    G: ReverseGeocoder,
    W: WeatherHistory,
    P: IdealProfileCatalog,
{
    pub fn new(geocoder: G, weather: W, profiles: P, options: EvaluationOptions) -> Self {
        Self {
            geocoder,
            weather,
            profiles,
            options,
        }
    }

    /// Evaluate `land` as of the current local day
    pub async fn evaluate(&self, land: &InsuredLand) -> AppResult<ClaimAssessment> {
        self.evaluate_as_of(land, Local::now().date_naive()).await
    }

    /// Evaluate `land`, treating every day before `today` as past
    #[tracing::instrument(skip(self, land), fields(crop = %land.crop.name))]
    pub async fn evaluate_as_of(
        &self,
        land: &InsuredLand,
        today: NaiveDate,
    ) -> AppResult<ClaimAssessment> {
        land.validate()
            .map_err(|e| AppError::invalid_claim("land", e))?;

        let region = self.geocoder.region_name(&land.location).await?;
        tracing::info!(%region, "resolved location");

        let all_dates = land.insured_period();
        let dates = filter_past_dates_before(&all_dates, today);
        tracing::info!(
            insured_days = all_dates.len(),
            past_days = dates.len(),
            "computed date range"
        );
        tracing::debug!(dates = ?format_dates(&dates), "querying past days");
        if dates.is_empty() {
            return Err(AppError::InsufficientData(
                "insured period has no past days to query".to_string(),
            ));
        }

        let samples = self.fetch_history(&region, &dates).await?;
        tracing::info!(samples = samples.len(), "fetched weather history");

        let catalog = self.profiles.ideal_profiles().await?;
        let matches = matching_profiles(&catalog, &land.crop.name);
        let ideal = *matches
            .first()
            .ok_or_else(|| AppError::NoMatchingProfile(land.crop.name.clone()))?;
        if matches.len() > 1 {
            tracing::warn!(
                crop = %land.crop.name,
                matches = matches.len(),
                "several ideal profiles match the crop, using the first"
            );
        }

        // The deviation is taken from the per-field maxima across windows, not per
        // window: a window colder than the ideal never outweighs a warmer one.
        let (window_size, window_averages) = self.window_averages(&samples)?;
        let worst_window = max_numeric_fields(&window_averages);
        let deviation = absolute_deviation(&worst_window, ideal);

        let contributions = score_contributions(&deviation);
        for missing in contributions.iter().filter(|c| c.value.is_none()) {
            tracing::warn!(factor = %missing.factor, field = %missing.field, "factor missing from history or profile, scored as zero");
        }
        let raw_risk_points = total_risk_points(&contributions);
        let probability = ClaimProbability::new(claim_probability(raw_risk_points)).ok_or_else(|| {
            AppError::InsufficientData("weather history produced a non-finite score".to_string())
        })?;
        let valid = probability.is_valid_at(self.options.validity_threshold);

        tracing::info!(
            raw_risk_points,
            probability = probability.value(),
            valid,
            "claim scored"
        );

        Ok(ClaimAssessment {
            region,
            crop: land.crop.name.clone(),
            dates,
            sample_count: samples.len(),
            window_size,
            window_count: window_averages.len(),
            worst_window,
            deviation,
            contributions,
            raw_risk_points,
            probability,
            validity_threshold: self.options.validity_threshold,
            valid,
        })
    }

    /// Fetch each date in ascending order, sleeping before every request.
    /// Requests are never issued concurrently.
    async fn fetch_history(&self, region: &str, dates: &[NaiveDate]) -> AppResult<Vec<WeatherSample>> {
        let mut samples = Vec::new();
        for date in dates {
            if !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }
            tracing::debug!(%date, "fetching weather history");
            let day = self.weather.hourly_samples(region, *date).await?;
            samples.extend(day);
        }
        Ok(samples)
    }

    /// Average every sliding window of the sample sequence
    fn window_averages(&self, samples: &[WeatherSample]) -> AppResult<(usize, Vec<AggregatedRecord>)> {
        if samples.is_empty() {
            return Err(AppError::InsufficientData(
                "weather service returned no samples for the insured period".to_string(),
            ));
        }

        let window_size = effective_window_size(self.options.check_intervals, samples.len());
        if window_size != self.options.check_intervals {
            tracing::warn!(
                configured = self.options.check_intervals,
                effective = window_size,
                "window size clamped to available samples"
            );
        }

        let averages: Vec<AggregatedRecord> = sliding_windows(samples.len(), window_size)
            .into_iter()
            .map(|window| average_numeric_fields(&samples[window]))
            .collect();

        Ok((window_size, averages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_config() {
        let config = EvaluationConfig {
            check_intervals: 8,
            request_delay_ms: 250,
            validity_threshold: 65.0,
        };
        let options = EvaluationOptions::from(&config);
        assert_eq!(options.check_intervals, 8);
        assert_eq!(options.request_delay, Duration::from_millis(250));
        assert_eq!(options.validity_threshold, 65.0);
    }

    #[test]
    fn test_summary_wording() {
        let mut assessment = ClaimAssessment {
            region: "Jammu and Kashmir".to_string(),
            crop: "ragi".to_string(),
            dates: Vec::new(),
            sample_count: 24,
            window_size: 5,
            window_count: 20,
            worst_window: AggregatedRecord::new(),
            deviation: AggregatedRecord::new(),
            contributions: Vec::new(),
            raw_risk_points: 12.0,
            probability: ClaimProbability::new(13.333333).unwrap(),
            validity_threshold: 70.0,
            valid: true,
        };
        assert_eq!(
            assessment.summary(),
            "probability that the claim is valid is 13.33% and the claim can be considered as valid"
        );

        assessment.probability = ClaimProbability::new(99.0).unwrap();
        assessment.valid = false;
        assert_eq!(
            assessment.summary(),
            "probability that the claim is valid is 99% and the claim can be considered as not valid"
        );
    }

    #[test]
    fn test_default_options() {
        let options = EvaluationOptions::default();
        assert_eq!(options.check_intervals, 5);
        assert_eq!(options.request_delay, Duration::from_millis(100));
        assert_eq!(options.validity_threshold, 70.0);
    }
}
