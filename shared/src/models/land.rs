//! Insured land models

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::temporal::generate_date_sequence_in;
use crate::types::GpsCoordinates;

/// A crop covered by the policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Crop {
    pub id: i64,
    pub name: String,
}

/// A parcel of land insured over a period.
///
/// Created by the caller and never mutated during evaluation. The JSON form uses
/// camelCase keys and epoch milliseconds for the insured period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsuredLand {
    pub location: GpsCoordinates,
    pub area: Decimal,
    pub crop: Crop,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub insured_from: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub insured_to: DateTime<Utc>,
}

impl InsuredLand {
    /// Check the invariants the evaluator relies on
    pub fn validate(&self) -> Result<(), &'static str> {
        crate::validation::validate_insured_period(self.insured_from, self.insured_to)?;
        crate::validation::validate_coordinates(&self.location)?;
        crate::validation::validate_crop_name(&self.crop.name)?;
        crate::validation::validate_area(self.area)?;
        Ok(())
    }

    /// Every local calendar day of the insured period, both ends included
    pub fn insured_period(&self) -> Vec<NaiveDate> {
        self.insured_period_in(&Local)
    }

    /// Same as [`InsuredLand::insured_period`], resolving days in `tz`
    pub fn insured_period_in<Tz: TimeZone>(&self, tz: &Tz) -> Vec<NaiveDate> {
        generate_date_sequence_in(self.insured_from, self.insured_to, tz)
    }
}
