use std::fmt;

use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{Name, Set, SetID, format_time};

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub kind: ExerciseKind,
    pub notes: Option<String>,
}

/// The type-specific part of an exercise. The variant is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseKind {
    Sets(Vec<Set>),
    Timer(Time),
}

impl Exercise {
    /// Creates an exercise from a submitted form.
    ///
    /// Set-based exercises start with one empty set, timer-based exercises with the default
    /// duration. Returns `None` if the name is empty.
    #[must_use]
    pub fn from_draft(draft: &ExerciseDraft) -> Option<Self> {
        let name = Name::new(&draft.name).ok()?;
        Some(Self {
            id: ExerciseID::generate(),
            name,
            kind: match draft.exercise_type {
                ExerciseType::Set => ExerciseKind::Sets(vec![Set::new()]),
                ExerciseType::Timer => ExerciseKind::Timer(Time::DEFAULT),
            },
            notes: draft
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(str::to_string),
        })
    }

    #[must_use]
    pub fn exercise_type(&self) -> ExerciseType {
        match self.kind {
            ExerciseKind::Sets(_) => ExerciseType::Set,
            ExerciseKind::Timer(_) => ExerciseType::Timer,
        }
    }

    #[must_use]
    pub fn sets(&self) -> &[Set] {
        match &self.kind {
            ExerciseKind::Sets(sets) => sets,
            ExerciseKind::Timer(_) => &[],
        }
    }

    #[must_use]
    pub fn duration(&self) -> Option<Time> {
        match self.kind {
            ExerciseKind::Sets(_) => None,
            ExerciseKind::Timer(duration) => Some(duration),
        }
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.sets().len()
    }

    #[must_use]
    pub fn num_completed_sets(&self) -> usize {
        self.sets().iter().filter(|s| s.completed).count()
    }

    #[must_use]
    pub fn add_set(&self) -> Self {
        match &self.kind {
            ExerciseKind::Sets(sets) => Self {
                kind: ExerciseKind::Sets(sets.iter().cloned().chain([Set::new()]).collect()),
                ..self.clone()
            },
            ExerciseKind::Timer(_) => self.clone(),
        }
    }

    #[must_use]
    pub fn replace_set(&self, set: &Set) -> Self {
        self.map_set(set.id, |_| set.clone())
    }

    #[must_use]
    pub fn increase_weight(&self, set_id: SetID) -> Self {
        self.map_set(set_id, |s| Set {
            weight: s.weight.increment(),
            ..s.clone()
        })
    }

    #[must_use]
    pub fn decrease_weight(&self, set_id: SetID) -> Self {
        self.map_set(set_id, |s| Set {
            weight: s.weight.decrement(),
            ..s.clone()
        })
    }

    #[must_use]
    pub fn increase_reps(&self, set_id: SetID) -> Self {
        self.map_set(set_id, |s| Set {
            reps: s.reps.increment(),
            ..s.clone()
        })
    }

    #[must_use]
    pub fn decrease_reps(&self, set_id: SetID) -> Self {
        self.map_set(set_id, |s| Set {
            reps: s.reps.decrement(),
            ..s.clone()
        })
    }

    #[must_use]
    pub fn toggle_set_completed(&self, set_id: SetID, now: DateTime<Utc>) -> Self {
        self.map_set(set_id, |s| s.toggle_completed(now))
    }

    #[must_use]
    pub fn increase_duration(&self) -> Self {
        self.map_duration(Time::increment)
    }

    #[must_use]
    pub fn decrease_duration(&self) -> Self {
        self.map_duration(Time::decrement)
    }

    fn map_set(&self, set_id: SetID, f: impl Fn(&Set) -> Set) -> Self {
        match &self.kind {
            ExerciseKind::Sets(sets) => Self {
                kind: ExerciseKind::Sets(
                    sets.iter()
                        .map(|s| if s.id == set_id { f(s) } else { s.clone() })
                        .collect(),
                ),
                ..self.clone()
            },
            ExerciseKind::Timer(_) => self.clone(),
        }
    }

    fn map_duration(&self, f: impl Fn(Time) -> Time) -> Self {
        match self.kind {
            ExerciseKind::Sets(_) => self.clone(),
            ExerciseKind::Timer(duration) => Self {
                kind: ExerciseKind::Timer(f(duration)),
                ..self.clone()
            },
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
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

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseType {
    Set,
    Timer,
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ExerciseType::Set => "set",
                ExerciseType::Timer => "timer",
            }
        )
    }
}

/// Input of the add-exercise form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub name: String,
    pub exercise_type: ExerciseType,
    pub notes: Option<String>,
}

impl Default for ExerciseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            exercise_type: ExerciseType::Set,
            notes: None,
        }
    }
}

/// Duration in seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl Time {
    pub const DEFAULT: Time = Time(60);
    pub const STEP: u32 = 30;

    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self(seconds)
    }

    #[must_use]
    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(Self::STEP))
    }

    #[must_use]
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(Self::STEP))
    }
}

impl From<Time> for u32 {
    fn from(value: Time) -> Self {
        value.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format_time(self.0))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Reps, Weight};

    use super::*;

    fn set(id: u128, weight: f32, reps: u32, completed: bool) -> Set {
        Set {
            id: id.into(),
            weight: Weight::new(weight).unwrap(),
            reps: Reps::new(reps),
            completed,
            timestamp: None,
        }
    }

    fn squats() -> Exercise {
        Exercise {
            id: 1.into(),
            name: Name::new("Squats").unwrap(),
            kind: ExerciseKind::Sets(vec![set(1, 60.0, 5, true), set(2, 0.0, 0, false)]),
            notes: None,
        }
    }

    fn plank() -> Exercise {
        Exercise {
            id: 2.into(),
            name: Name::new("Plank").unwrap(),
            kind: ExerciseKind::Timer(Time(60)),
            notes: Some("Keep the back straight".to_string()),
        }
    }

    #[test]
    fn test_exercise_from_draft_set() {
        let exercise = Exercise::from_draft(&ExerciseDraft {
            name: " Squats ".to_string(),
            exercise_type: ExerciseType::Set,
            notes: Some("Low bar".to_string()),
        })
        .unwrap();

        assert!(!exercise.id.is_nil());
        assert_eq!(exercise.name, Name::new("Squats").unwrap());
        assert_eq!(exercise.exercise_type(), ExerciseType::Set);
        assert_eq!(exercise.num_sets(), 1);
        assert_eq!(exercise.sets()[0].weight, Weight::default());
        assert_eq!(exercise.sets()[0].reps, Reps::default());
        assert!(!exercise.sets()[0].completed);
        assert_eq!(exercise.duration(), None);
        assert_eq!(exercise.notes, Some("Low bar".to_string()));
    }

    #[test]
    fn test_exercise_from_draft_timer() {
        let exercise = Exercise::from_draft(&ExerciseDraft {
            name: "Plank".to_string(),
            exercise_type: ExerciseType::Timer,
            notes: Some("  ".to_string()),
        })
        .unwrap();

        assert_eq!(exercise.exercise_type(), ExerciseType::Timer);
        assert_eq!(exercise.duration(), Some(Time(60)));
        assert!(exercise.sets().is_empty());
        assert_eq!(exercise.notes, None);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_exercise_from_draft_without_name(#[case] name: &str) {
        assert_eq!(
            Exercise::from_draft(&ExerciseDraft {
                name: name.to_string(),
                ..ExerciseDraft::default()
            }),
            None
        );
    }

    #[test]
    fn test_exercise_num_sets() {
        assert_eq!(squats().num_sets(), 2);
        assert_eq!(squats().num_completed_sets(), 1);
        assert_eq!(plank().num_sets(), 0);
        assert_eq!(plank().num_completed_sets(), 0);
    }

    #[test]
    fn test_exercise_add_set() {
        let exercise = squats().add_set();
        assert_eq!(exercise.num_sets(), 3);
        assert_eq!(&exercise.sets()[..2], squats().sets());
        let new_set = &exercise.sets()[2];
        assert_eq!(new_set.weight, Weight::default());
        assert_eq!(new_set.reps, Reps::default());
        assert!(!new_set.completed);
    }

    #[test]
    fn test_exercise_add_set_to_timer() {
        assert_eq!(plank().add_set(), plank());
    }

    #[test]
    fn test_exercise_replace_set() {
        assert_eq!(
            squats().replace_set(&set(2, 40.0, 10, false)).sets(),
            &[set(1, 60.0, 5, true), set(2, 40.0, 10, false)]
        );
        assert_eq!(squats().replace_set(&set(3, 40.0, 10, false)), squats());
    }

    #[test]
    fn test_exercise_adjust_set() {
        assert_eq!(
            squats().increase_weight(2.into()).sets()[1],
            set(2, 2.5, 0, false)
        );
        assert_eq!(
            squats().decrease_weight(1.into()).sets()[0],
            set(1, 57.5, 5, true)
        );
        assert_eq!(
            squats().decrease_weight(2.into()).sets()[1],
            set(2, 0.0, 0, false)
        );
        assert_eq!(
            squats().increase_reps(1.into()).sets()[0],
            set(1, 60.0, 6, true)
        );
        assert_eq!(
            squats().decrease_reps(2.into()).sets()[1],
            set(2, 0.0, 0, false)
        );
        assert_eq!(squats().increase_reps(3.into()), squats());
    }

    #[test]
    fn test_exercise_toggle_set_completed() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 18, 30, 0).unwrap();
        let exercise = squats().toggle_set_completed(2.into(), now);
        assert_eq!(exercise.num_completed_sets(), 2);
        assert_eq!(exercise.sets()[1].timestamp, Some(now));
        assert_eq!(exercise.sets()[0], squats().sets()[0]);
    }

    #[test]
    fn test_exercise_adjust_set_of_timer() {
        assert_eq!(plank().increase_weight(1.into()), plank());
        assert_eq!(plank().increase_reps(1.into()), plank());
    }

    #[test]
    fn test_exercise_adjust_duration() {
        assert_eq!(plank().increase_duration().duration(), Some(Time(90)));
        assert_eq!(plank().decrease_duration().duration(), Some(Time(30)));
        assert_eq!(
            plank()
                .decrease_duration()
                .decrease_duration()
                .decrease_duration()
                .duration(),
            Some(Time(0))
        );
        assert_eq!(squats().increase_duration(), squats());
    }

    #[rstest]
    #[case(ExerciseType::Set, "set")]
    #[case(ExerciseType::Timer, "timer")]
    fn test_exercise_type_display(#[case] exercise_type: ExerciseType, #[case] string: &str) {
        assert_eq!(exercise_type.to_string(), string);
    }

    #[rstest]
    #[case(0, 30)]
    #[case(60, 90)]
    fn test_time_increment(#[case] value: u32, #[case] expected: u32) {
        assert_eq!(Time(value).increment(), Time(expected));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(20, 0)]
    #[case(90, 60)]
    fn test_time_decrement(#[case] value: u32, #[case] expected: u32) {
        assert_eq!(Time(value).decrement(), Time(expected));
    }

    #[test]
    fn test_time_display() {
        assert_eq!(Time(90).to_string(), "01:30");
    }
}
