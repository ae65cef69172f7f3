use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::{HeightUnit, WeightUnit};

const KG_PER_LB: f64 = 0.453_592;
const CM_PER_FT: f64 = 30.48;

/// Body mass index rounded to one decimal place.
///
/// Returns `None` if weight or height is not set.
#[must_use]
pub fn bmi(
    weight: f64,
    weight_unit: WeightUnit,
    height: f64,
    height_unit: HeightUnit,
) -> Option<f64> {
    if weight <= 0.0 || height <= 0.0 {
        return None;
    }

    let weight_kg = match weight_unit {
        WeightUnit::Kilogram => weight,
        WeightUnit::Pound => weight * KG_PER_LB,
    };
    let height_cm = match height_unit {
        HeightUnit::Centimeter => height,
        HeightUnit::Foot => height * CM_PER_FT,
    };
    let height_m = height_cm / 100.0;

    Some((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BMICategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl From<f64> for BMICategory {
    fn from(bmi: f64) -> Self {
        if bmi < 18.5 {
            BMICategory::Underweight
        } else if bmi < 25.0 {
            BMICategory::NormalWeight
        } else if bmi < 30.0 {
            BMICategory::Overweight
        } else {
            BMICategory::Obese
        }
    }
}

impl fmt::Display for BMICategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BMICategory::Underweight => "Underweight",
                BMICategory::NormalWeight => "Normal weight",
                BMICategory::Overweight => "Overweight",
                BMICategory::Obese => "Obese",
            }
        )
    }
}

/// Calendar age in whole years.
///
/// Returns `None` without a date of birth or if the date of birth lies after `today`.
#[must_use]
pub fn age(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> Option<u32> {
    let date_of_birth = date_of_birth?;

    if date_of_birth > today {
        return None;
    }

    let mut years = today.year() - date_of_birth.year();

    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }

    u32::try_from(years).ok()
}

/// Formats seconds as `MM:SS`. Minutes are not rolled over into hours.
#[must_use]
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}
