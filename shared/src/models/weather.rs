//! Weather data models

use serde::{Deserialize, Serialize};

use crate::aggregation::NumericFields;

/// One weather observation, in the daily-summary field vocabulary used by the
/// ideal-profile catalog. Hourly observations are converted into this shape by the
/// weather-history client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(default)]
    pub maxtemp_c: Option<f64>,
    #[serde(default)]
    pub maxtemp_f: Option<f64>,
    #[serde(default)]
    pub mintemp_c: Option<f64>,
    #[serde(default)]
    pub mintemp_f: Option<f64>,
    #[serde(default)]
    pub avgtemp_c: Option<f64>,
    #[serde(default)]
    pub avgtemp_f: Option<f64>,
    #[serde(default)]
    pub maxwind_mph: Option<f64>,
    #[serde(default)]
    pub maxwind_kph: Option<f64>,
    #[serde(default)]
    pub totalprecip_mm: Option<f64>,
    #[serde(default)]
    pub totalprecip_in: Option<f64>,
    #[serde(default)]
    pub totalsnow_cm: Option<f64>,
    #[serde(default)]
    pub avgvis_km: Option<f64>,
    #[serde(default)]
    pub avgvis_miles: Option<f64>,
    #[serde(default)]
    pub avghumidity: Option<f64>,
    #[serde(default)]
    pub daily_will_it_rain: Option<f64>,
    #[serde(default)]
    pub daily_chance_of_rain: Option<f64>,
    #[serde(default)]
    pub daily_will_it_snow: Option<f64>,
    #[serde(default)]
    pub daily_chance_of_snow: Option<f64>,
    #[serde(default)]
    pub uv: Option<f64>,
}

/// Reference conditions under which a crop is presumed unharmed
pub type IdealProfile = WeatherSample;

impl WeatherSample {
    /// Whether this record's crop label names `crop_name`, ignoring case and spaces
    pub fn matches_crop(&self, crop_name: &str) -> bool {
        self.crop
            .as_deref()
            .map(|label| normalize_crop_name(label) == normalize_crop_name(crop_name))
            .unwrap_or(false)
    }
}

impl NumericFields for WeatherSample {
    fn numeric_fields(&self) -> Vec<(&str, Option<f64>)> {
        vec![
            ("maxtemp_c", self.maxtemp_c),
            ("maxtemp_f", self.maxtemp_f),
            ("mintemp_c", self.mintemp_c),
            ("mintemp_f", self.mintemp_f),
            ("avgtemp_c", self.avgtemp_c),
            ("avgtemp_f", self.avgtemp_f),
            ("maxwind_mph", self.maxwind_mph),
            ("maxwind_kph", self.maxwind_kph),
            ("totalprecip_mm", self.totalprecip_mm),
            ("totalprecip_in", self.totalprecip_in),
            ("totalsnow_cm", self.totalsnow_cm),
            ("avgvis_km", self.avgvis_km),
            ("avgvis_miles", self.avgvis_miles),
            ("avghumidity", self.avghumidity),
            ("daily_will_it_rain", self.daily_will_it_rain),
            ("daily_chance_of_rain", self.daily_chance_of_rain),
            ("daily_will_it_snow", self.daily_will_it_snow),
            ("daily_chance_of_snow", self.daily_chance_of_snow),
            ("uv", self.uv),
        ]
    }
}

/// Lowercase and drop every space, so "Finger Millet" and "fingermillet" compare equal
pub fn normalize_crop_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Every catalog entry for `crop_name`, in catalog order.
///
/// A well-formed catalog yields exactly one; callers decide what to do with
/// none or several.
pub fn matching_profiles<'a>(catalog: &'a [IdealProfile], crop_name: &str) -> Vec<&'a IdealProfile> {
    catalog
        .iter()
        .filter(|profile| profile.matches_crop(crop_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(crop: &str) -> IdealProfile {
        IdealProfile {
            crop: Some(crop.to_string()),
            avghumidity: Some(60.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_crop_match_ignores_case_and_spaces() {
        let p = profile("Finger Millet");
        assert!(p.matches_crop("fingermillet"));
        assert!(p.matches_crop("  FINGER millet "));
        assert!(!p.matches_crop("millet"));
    }

    #[test]
    fn test_unlabelled_sample_never_matches() {
        assert!(!WeatherSample::default().matches_crop("ragi"));
    }

    #[test]
    fn test_matching_profiles() {
        let catalog = vec![profile("wheat"), profile("Ragi"), profile("rice")];
        let matches = matching_profiles(&catalog, "ragi");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].crop.as_deref(), Some("Ragi"));
        assert!(matching_profiles(&catalog, "barley").is_empty());
    }

    #[test]
    fn test_matching_profiles_reports_duplicates_in_order() {
        let mut second = profile("ragi ");
        second.avghumidity = Some(80.0);
        let catalog = vec![profile("Ragi"), profile("rice"), second];
        let matches = matching_profiles(&catalog, "ragi");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].avghumidity, Some(60.0));
        assert_eq!(matches[1].avghumidity, Some(80.0));
    }

    #[test]
    fn test_deserialize_catalog_entry_with_missing_fields() {
        let json = r#"{"crop": "ragi", "maxtemp_c": 32, "avghumidity": 55.5}"#;
        let sample: WeatherSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.maxtemp_c, Some(32.0));
        assert_eq!(sample.avghumidity, Some(55.5));
        assert_eq!(sample.uv, None);
    }

    #[test]
    fn test_numeric_fields_skip_crop_label() {
        let ragi = profile("ragi");
        let fields = ragi.numeric_fields();
        assert_eq!(fields.len(), 19);
        assert!(fields.iter().all(|(name, _)| *name != "crop"));
    }
}
