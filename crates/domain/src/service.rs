use chrono::Utc;
use log::{debug, error, info};

use crate::{
    CreateError, DeleteError, Exercise, Name, Profile, ProfileRepository, ProfileService,
    ReadError, UpdateError, Workout, WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: ProfileRepository> ProfileService for Service<R> {
    async fn get_profile(&self) -> Result<Option<Profile>, ReadError> {
        log_on_error!(self.repository.read_profile(), "get", "profile")
    }

    async fn replace_profile(&self, profile: Profile) -> Result<Profile, UpdateError> {
        log_on_error!(
            self.repository.write_profile(profile),
            "replace",
            "profile"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_current_workout(&self) -> Result<Option<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_current_workout(),
            "get",
            "current workout"
        )
    }

    async fn start_workout(
        &self,
        title: Name,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, CreateError> {
        log_on_error!(
            async {
                if self.repository.read_current_workout().await?.is_some() {
                    return Err(CreateError::Conflict);
                }
                let workout = Workout::new(title, exercises, Utc::now());
                let workout = self.repository.write_current_workout(workout).await?;
                info!("started workout \"{}\"", workout.title);
                Ok::<_, CreateError>(workout)
            },
            "start",
            "workout"
        )
    }

    async fn replace_current_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            async {
                match self.repository.read_current_workout().await? {
                    Some(current) if current.id == workout.id => {
                        self.repository.write_current_workout(workout).await
                    }
                    Some(_) => Err(UpdateError::Conflict),
                    None => Err(UpdateError::NotFound),
                }
            },
            "replace",
            "current workout"
        )
    }

    async fn complete_workout(&self) -> Result<Option<Workout>, UpdateError> {
        log_on_error!(
            async {
                let Some(workout) = self.repository.read_current_workout().await? else {
                    debug!("no workout in progress");
                    return Ok(None);
                };
                let workout = workout.complete();
                match self.repository.append_to_history(workout.clone()).await {
                    Ok(_) => {}
                    Err(CreateError::Conflict) => {
                        debug!("workout {} already in history", *workout.id);
                    }
                    Err(err) => return Err(err.into()),
                }
                self.repository.delete_current_workout().await?;
                info!("completed workout \"{}\"", workout.title);
                Ok::<_, UpdateError>(Some(workout))
            },
            "complete",
            "workout"
        )
    }

    async fn discard_current_workout(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_current_workout(),
            "discard",
            "current workout"
        )
    }

    async fn get_history(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(self.repository.read_history(), "get", "history")
    }
}
