//! JSON records of the persisted state.
//!
//! Field names and value encodings follow the stored documents: camelCase fields, units and
//! exercise types as lowercase strings, an empty string for a missing date of birth and set
//! timestamps in epoch milliseconds.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use workout_diary_domain as domain;

const DATE_FORMAT: &str = "%Y-%m-%d";

const LEGACY_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_52d4_8a3e_4b0f_9c27_d5e1_a4b8_3f60);

/// Identifiers that are not UUIDs, such as the base36 strings of older records, are mapped to
/// a name-based UUID, so the same string always yields the same identifier.
fn parse_id(id: &str) -> Uuid {
    Uuid::parse_str(id).unwrap_or_else(|_| Uuid::new_v5(&LEGACY_ID_NAMESPACE, id.as_bytes()))
}

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error("invalid date of birth: {0}")]
    InvalidDate(String),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub date_of_birth: String,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub gender: Gender,
    pub workout_days_per_week: u32,
    pub preferred_time_of_day: String,
}

impl From<&domain::Profile> for Profile {
    fn from(value: &domain::Profile) -> Self {
        Self {
            name: value.name.clone(),
            date_of_birth: value
                .date_of_birth
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            weight: value.weight,
            weight_unit: value.weight_unit.into(),
            height: value.height,
            height_unit: value.height_unit.into(),
            gender: value.gender.into(),
            workout_days_per_week: value.workout_days_per_week,
            preferred_time_of_day: value.preferred_time_of_day.clone(),
        }
    }
}

impl TryFrom<Profile> for domain::Profile {
    type Error = RecordError;

    fn try_from(value: Profile) -> Result<Self, Self::Error> {
        let date_of_birth = if value.date_of_birth.is_empty() {
            None
        } else {
            // Older records may carry a full timestamp.
            let date = value
                .date_of_birth
                .get(..10)
                .unwrap_or(&value.date_of_birth);
            Some(
                NaiveDate::parse_from_str(date, DATE_FORMAT)
                    .map_err(|_| RecordError::InvalidDate(value.date_of_birth.clone()))?,
            )
        };
        Ok(Self {
            name: value.name,
            date_of_birth,
            weight: value.weight,
            weight_unit: value.weight_unit.into(),
            height: value.height,
            height_unit: value.height_unit.into(),
            gender: value.gender.into(),
            workout_days_per_week: value.workout_days_per_week,
            preferred_time_of_day: value.preferred_time_of_day,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "lbs")]
    Pound,
}

impl From<domain::WeightUnit> for WeightUnit {
    fn from(value: domain::WeightUnit) -> Self {
        match value {
            domain::WeightUnit::Kilogram => Self::Kilogram,
            domain::WeightUnit::Pound => Self::Pound,
        }
    }
}

impl From<WeightUnit> for domain::WeightUnit {
    fn from(value: WeightUnit) -> Self {
        match value {
            WeightUnit::Kilogram => Self::Kilogram,
            WeightUnit::Pound => Self::Pound,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightUnit {
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "ft")]
    Foot,
}

impl From<domain::HeightUnit> for HeightUnit {
    fn from(value: domain::HeightUnit) -> Self {
        match value {
            domain::HeightUnit::Centimeter => Self::Centimeter,
            domain::HeightUnit::Foot => Self::Foot,
        }
    }
}

impl From<HeightUnit> for domain::HeightUnit {
    fn from(value: HeightUnit) -> Self {
        match value {
            HeightUnit::Centimeter => Self::Centimeter,
            HeightUnit::Foot => Self::Foot,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl From<domain::Gender> for Gender {
    fn from(value: domain::Gender) -> Self {
        match value {
            domain::Gender::Male => Self::Male,
            domain::Gender::Female => Self::Female,
            domain::Gender::Other => Self::Other,
        }
    }
}

impl From<Gender> for domain::Gender {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Male => Self::Male,
            Gender::Female => Self::Female,
            Gender::Other => Self::Other,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub exercises: Vec<Exercise>,
    pub completed: bool,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title.to_string(),
            date: value.date,
            exercises: value.exercises.iter().map(Exercise::from).collect(),
            completed: value.completed,
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = RecordError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&value.id).into(),
            title: domain::Name::new(&value.title)?,
            date: value.date,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            completed: value.completed,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<Vec<Set>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        let (exercise_type, sets, duration) = match &value.kind {
            domain::ExerciseKind::Sets(sets) => (
                ExerciseType::Set,
                Some(sets.iter().map(Set::from).collect()),
                None,
            ),
            domain::ExerciseKind::Timer(duration) => {
                (ExerciseType::Timer, None, Some(u32::from(*duration)))
            }
        };
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            exercise_type,
            sets,
            duration,
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = RecordError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&value.id).into(),
            name: domain::Name::new(&value.name)?,
            kind: match value.exercise_type {
                ExerciseType::Set => domain::ExerciseKind::Sets(
                    value
                        .sets
                        .unwrap_or_default()
                        .into_iter()
                        .map(domain::Set::try_from)
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                ExerciseType::Timer => {
                    domain::ExerciseKind::Timer(domain::Time::new(value.duration.unwrap_or(0)))
                }
            },
            notes: value.notes,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Set,
    Timer,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Set {
    pub id: String,
    pub weight: f32,
    pub reps: u32,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            id: value.id.to_string(),
            weight: value.weight.into(),
            reps: value.reps.into(),
            completed: value.completed,
            timestamp: value.timestamp.map(|t| t.timestamp_millis()),
        }
    }
}

impl TryFrom<Set> for domain::Set {
    type Error = RecordError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&value.id).into(),
            weight: domain::Weight::new(value.weight)?,
            reps: domain::Reps::new(value.reps),
            completed: value.completed,
            timestamp: value
                .timestamp
                .map(|t| DateTime::from_timestamp_millis(t).ok_or(RecordError::InvalidTimestamp(t)))
                .transpose()?,
        })
    }
}
