use std::fmt;

use chrono::{Local, NaiveDate};

use crate::{BMICategory, ReadError, UpdateError, ValidationError, age, bmi};

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Result<Option<Profile>, ReadError>;
    async fn replace_profile(&self, profile: Profile) -> Result<Profile, UpdateError>;

    /// A profile without a name has not gone through onboarding yet.
    async fn is_onboarding_required(&self) -> bool {
        !matches!(self.get_profile().await, Ok(Some(profile)) if profile.is_complete())
    }

    fn validate_profile_weight(&self, weight: &str) -> Result<f64, ValidationError> {
        validate_non_negative_decimal(weight, "Weight")
    }

    fn validate_profile_height(&self, height: &str) -> Result<f64, ValidationError> {
        validate_non_negative_decimal(height, "Height")
    }

    fn validate_workout_days_per_week(&self, days: &str) -> Result<u32, ValidationError> {
        match days.trim().parse::<u32>() {
            Ok(parsed_days) if parsed_days <= 7 => Ok(parsed_days),
            _ => Err(ValidationError::Other(
                "Workout days must be an integer between 0 and 7".into(),
            )),
        }
    }

    fn validate_date_of_birth(&self, date: &str) -> Result<Option<NaiveDate>, ValidationError> {
        if date.trim().is_empty() {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
            Ok(parsed_date) => {
                if parsed_date <= Local::now().date_naive() {
                    Ok(Some(parsed_date))
                } else {
                    Err(ValidationError::Other(
                        "Date of birth must not be in the future".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other("Invalid date".into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<Option<Profile>, ReadError>;
    async fn write_profile(&self, profile: Profile) -> Result<Profile, UpdateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub gender: Gender,
    pub workout_days_per_week: u32,
    pub preferred_time_of_day: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            date_of_birth: None,
            weight: 0.0,
            weight_unit: WeightUnit::Kilogram,
            height: 0.0,
            height_unit: HeightUnit::Centimeter,
            gender: Gender::Other,
            workout_days_per_week: 0,
            preferred_time_of_day: String::new(),
        }
    }
}

impl Profile {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }

    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        bmi(self.weight, self.weight_unit, self.height, self.height_unit)
    }

    #[must_use]
    pub fn bmi_category(&self) -> Option<BMICategory> {
        self.bmi().map(BMICategory::from)
    }

    #[must_use]
    pub fn age(&self, today: NaiveDate) -> Option<u32> {
        age(self.date_of_birth, today)
    }

    /// Switches the weight unit. The number is kept as entered.
    #[must_use]
    pub fn toggle_weight_unit(&self) -> Self {
        Self {
            weight_unit: match self.weight_unit {
                WeightUnit::Kilogram => WeightUnit::Pound,
                WeightUnit::Pound => WeightUnit::Kilogram,
            },
            ..self.clone()
        }
    }

    /// Switches the height unit. The number is kept as entered.
    #[must_use]
    pub fn toggle_height_unit(&self) -> Self {
        Self {
            height_unit: match self.height_unit {
                HeightUnit::Centimeter => HeightUnit::Foot,
                HeightUnit::Foot => HeightUnit::Centimeter,
            },
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Kilogram,
    Pound,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WeightUnit::Kilogram => "kg",
                WeightUnit::Pound => "lbs",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightUnit {
    Centimeter,
    Foot,
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HeightUnit::Centimeter => "cm",
                HeightUnit::Foot => "ft",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        match value {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Gender::Male => "male",
                Gender::Female => "female",
                Gender::Other => "other",
            }
        )
    }
}

fn validate_non_negative_decimal(value: &str, field: &str) -> Result<f64, ValidationError> {
    let value = value.replace(',', ".");
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(parsed_value) if parsed_value.is_finite() && parsed_value >= 0.0 => Ok(parsed_value),
        Ok(_) => Err(ValidationError::Other(
            format!("{field} must not be negative").into(),
        )),
        Err(_) => Err(ValidationError::Other(
            format!("{field} must be a decimal number").into(),
        )),
    }
}
