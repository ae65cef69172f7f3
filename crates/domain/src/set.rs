use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};
use uuid::Uuid;

/// One discrete entry of a set-based exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub weight: Weight,
    pub reps: Reps,
    pub completed: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Set {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SetID::generate(),
            weight: Weight::default(),
            reps: Reps::default(),
            completed: false,
            timestamp: None,
        }
    }

    /// Flips the completion flag. A completed set remembers when it was completed.
    #[must_use]
    pub fn toggle_completed(&self, now: DateTime<Utc>) -> Self {
        let completed = !self.completed;
        Self {
            completed,
            timestamp: if completed { Some(now) } else { None },
            ..self.clone()
        }
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Display, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub const STEP: f32 = 2.5;

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn increment(self) -> Self {
        Self(self.0 + Self::STEP)
    }

    #[must_use]
    pub fn decrement(self) -> Self {
        Self((self.0 - Self::STEP).max(0.0))
    }
}

impl From<Weight> for f32 {
    fn from(value: Weight) -> Self {
        value.0
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must not be negative")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<Reps> for u32 {
    fn from(value: Reps) -> Self {
        value.0
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Ok(Reps::new(parsed_value)),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be a non-negative integer")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_set_new() {
        let set = Set::new();
        assert!(!set.id.is_nil());
        assert_eq!(set.weight, Weight::default());
        assert_eq!(set.reps, Reps::default());
        assert!(!set.completed);
        assert_eq!(set.timestamp, None);
    }

    #[test]
    fn test_set_ids_are_unique() {
        assert_ne!(Set::new().id, Set::new().id);
    }

    #[test]
    fn test_set_toggle_completed() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 18, 30, 0).unwrap();
        let set = Set {
            id: 1.into(),
            weight: Weight(20.0),
            reps: Reps(8),
            completed: false,
            timestamp: None,
        };

        let completed = set.toggle_completed(now);
        assert_eq!(
            completed,
            Set {
                completed: true,
                timestamp: Some(now),
                ..set.clone()
            }
        );
        assert_eq!(completed.toggle_completed(now), set);
    }

    #[test]
    fn test_set_id_nil() {
        assert!(SetID::nil().is_nil());
        assert_eq!(SetID::nil(), SetID::default());
    }

    #[rstest]
    #[case(0.0, 2.5)]
    #[case(2.5, 5.0)]
    #[case(97.5, 100.0)]
    fn test_weight_increment(#[case] value: f32, #[case] expected: f32) {
        assert_eq!(Weight(value).increment(), Weight(expected));
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1.0, 0.0)]
    #[case(2.5, 0.0)]
    #[case(100.0, 97.5)]
    fn test_weight_decrement(#[case] value: f32, #[case] expected: f32) {
        assert_eq!(Weight(value).decrement(), Weight(expected));
    }

    #[rstest]
    #[case("0", Ok(Weight(0.0)))]
    #[case("42.5", Ok(Weight(42.5)))]
    #[case("42,5", Ok(Weight(42.5)))]
    #[case(" 7 ", Ok(Weight(7.0)))]
    #[case("-1", Err(WeightError::OutOfRange))]
    #[case("inf", Err(WeightError::OutOfRange))]
    #[case("", Err(WeightError::ParseError))]
    #[case("heavy", Err(WeightError::ParseError))]
    fn test_weight_try_from_str(#[case] value: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(value), expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(11, 12)]
    #[case(u32::MAX, u32::MAX)]
    fn test_reps_increment(#[case] value: u32, #[case] expected: u32) {
        assert_eq!(Reps(value).increment(), Reps(expected));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(12, 11)]
    fn test_reps_decrement(#[case] value: u32, #[case] expected: u32) {
        assert_eq!(Reps(value).decrement(), Reps(expected));
    }

    #[rstest]
    #[case("8", Ok(Reps(8)))]
    #[case("-1", Err(RepsError::ParseError))]
    #[case("1.5", Err(RepsError::ParseError))]
    fn test_reps_try_from_str(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }
}
