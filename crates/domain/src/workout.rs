use chrono::{DateTime, Local, NaiveDate, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Exercise, ExerciseDraft, ExerciseID, Name, ReadError, UpdateError,
    ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_current_workout(&self) -> Result<Option<Workout>, ReadError>;
    async fn start_workout(
        &self,
        title: Name,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, CreateError>;
    async fn replace_current_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn complete_workout(&self) -> Result<Option<Workout>, UpdateError>;
    async fn discard_current_workout(&self) -> Result<(), DeleteError>;
    async fn get_history(&self) -> Result<Vec<Workout>, ReadError>;

    async fn get_recent_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        Ok(newest_first(self.get_history().await?))
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Option<Workout>, ReadError> {
        Ok(self
            .get_history()
            .await?
            .into_iter()
            .find(|w| w.id == id))
    }

    /// Adds an exercise to the current workout and stores the result.
    ///
    /// Returns `None` if no workout is in progress. A draft without name leaves the workout
    /// untouched.
    async fn add_exercise(&self, draft: &ExerciseDraft) -> Result<Option<Workout>, UpdateError> {
        self.modify_current_workout(|w| w.add_exercise(draft)).await
    }

    async fn replace_exercise(&self, exercise: &Exercise) -> Result<Option<Workout>, UpdateError> {
        self.modify_current_workout(|w| w.replace_exercise(exercise))
            .await
    }

    async fn remove_exercise(&self, index: usize) -> Result<Option<Workout>, UpdateError> {
        self.modify_current_workout(|w| w.remove_exercise(index))
            .await
    }

    async fn modify_current_workout(
        &self,
        f: impl FnOnce(&Workout) -> Workout,
    ) -> Result<Option<Workout>, UpdateError> {
        let Some(workout) = self.get_current_workout().await? else {
            return Ok(None);
        };
        let modified_workout = f(&workout);
        if modified_workout == workout {
            return Ok(Some(workout));
        }
        Ok(Some(self.replace_current_workout(modified_workout).await?))
    }

    fn validate_workout_title(&self, title: &str) -> Result<Name, ValidationError> {
        Name::new(title).map_err(|err| ValidationError::Other(err.into()))
    }

    async fn validate_new_workout(&self, title: &str) -> Result<Name, ValidationError> {
        let title = self.validate_workout_title(title)?;
        match self.get_current_workout().await {
            Ok(None) => Ok(title),
            Ok(Some(_)) => Err(ValidationError::Conflict("current workout".to_string())),
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

/// Persistence of the in-progress workout slot and the history of completed workouts.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_current_workout(&self) -> Result<Option<Workout>, ReadError>;
    async fn write_current_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_current_workout(&self) -> Result<(), DeleteError>;
    async fn read_history(&self) -> Result<Vec<Workout>, ReadError>;
    /// Fails with [`CreateError::Conflict`] if the history already contains the workout.
    async fn append_to_history(&self, workout: Workout) -> Result<Workout, CreateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub title: Name,
    pub date: DateTime<Utc>,
    pub exercises: Vec<Exercise>,
    pub completed: bool,
}

impl Workout {
    #[must_use]
    pub fn new(title: Name, exercises: Vec<Exercise>, now: DateTime<Utc>) -> Self {
        Self {
            id: WorkoutID::generate(),
            title,
            date: now,
            exercises,
            completed: false,
        }
    }

    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }

    #[must_use]
    pub fn add_exercise(&self, draft: &ExerciseDraft) -> Self {
        match Exercise::from_draft(draft) {
            Some(exercise) => Self {
                exercises: self.exercises.iter().cloned().chain([exercise]).collect(),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    #[must_use]
    pub fn remove_exercise(&self, index: usize) -> Self {
        Self {
            exercises: self
                .exercises
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, e)| e.clone())
                .collect(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn replace_exercise(&self, exercise: &Exercise) -> Self {
        Self {
            exercises: self
                .exercises
                .iter()
                .map(|e| {
                    if e.id == exercise.id {
                        exercise.clone()
                    } else {
                        e.clone()
                    }
                })
                .collect(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn exercise(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn complete(&self) -> Self {
        Self {
            completed: true,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn num_exercises(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(Exercise::num_sets).sum()
    }

    #[must_use]
    pub fn num_completed_sets(&self) -> usize {
        self.exercises.iter().map(Exercise::num_completed_sets).sum()
    }

    /// Share of completed sets in percent, rounded half up. A workout without sets yields 0.
    #[must_use]
    pub fn completion_percentage(&self) -> usize {
        let total = self.num_sets().max(1);
        (self.num_completed_sets() * 200 + total) / (total * 2)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
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

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[must_use]
pub fn newest_first(mut workouts: Vec<Workout>) -> Vec<Workout> {
    workouts.sort_by(|a, b| b.date.cmp(&a.date));
    workouts
}
