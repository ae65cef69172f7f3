use std::collections::VecDeque;

use ::log::debug;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;
use workout_diary_app::log;
use workout_diary_domain as domain;

use crate::{
    Error,
    key_value::KeyValueStore,
    record::{Profile, Workout},
};

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    #[strum(serialize = "@workout_diary:workouts")]
    Workouts,
    #[strum(serialize = "@workout_diary:current_workout")]
    CurrentWorkout,
    #[strum(serialize = "@workout_diary:user_profile")]
    UserProfile,
    #[strum(serialize = "log")]
    Log,
}

/// Persisted application state on top of a key-value store, one JSON document per key.
pub struct LocalStorage<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Seeds an empty history and the default profile if they are not stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be accessed.
    pub fn initialize(&self) -> Result<(), Error> {
        if self.store.get(Key::Workouts.as_ref())?.is_none() {
            debug!("initializing workout history");
            self.set(Key::Workouts, &Vec::<Workout>::new())?;
        }
        if self.store.get(Key::UserProfile.as_ref())?.is_none() {
            debug!("initializing user profile");
            self.set(Key::UserProfile, &Profile::from(&domain::Profile::default()))?;
        }
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, Error> {
        match self.store.get(key.as_ref())? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: Key, value: &T) -> Result<(), Error> {
        self.store
            .set(key.as_ref(), &serde_json::to_string(value)?)
            .map_err(Error::from)
    }

    fn remove(&self, key: Key) -> Result<(), Error> {
        self.store.remove(key.as_ref()).map_err(Error::from)
    }

    fn read_workouts(&self) -> Result<Vec<domain::Workout>, Error> {
        self.get::<Vec<Workout>>(Key::Workouts)?
            .unwrap_or_default()
            .into_iter()
            .map(|w| domain::Workout::try_from(w).map_err(Error::from))
            .collect()
    }
}

impl<S: KeyValueStore> domain::ProfileRepository for LocalStorage<S> {
    async fn read_profile(&self) -> Result<Option<domain::Profile>, domain::ReadError> {
        Ok(self
            .get::<Profile>(Key::UserProfile)
            .map_err(domain::StorageError::from)?
            .map(domain::Profile::try_from)
            .transpose()
            .map_err(|err| domain::StorageError::from(Error::from(err)))?)
    }

    async fn write_profile(
        &self,
        profile: domain::Profile,
    ) -> Result<domain::Profile, domain::UpdateError> {
        self.set(Key::UserProfile, &Profile::from(&profile))
            .map_err(domain::StorageError::from)?;
        Ok(profile)
    }
}

impl<S: KeyValueStore> domain::WorkoutRepository for LocalStorage<S> {
    async fn read_current_workout(&self) -> Result<Option<domain::Workout>, domain::ReadError> {
        Ok(self
            .get::<Workout>(Key::CurrentWorkout)
            .map_err(domain::StorageError::from)?
            .map(domain::Workout::try_from)
            .transpose()
            .map_err(|err| domain::StorageError::from(Error::from(err)))?)
    }

    async fn write_current_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        self.set(Key::CurrentWorkout, &Workout::from(&workout))
            .map_err(domain::StorageError::from)?;
        Ok(workout)
    }

    async fn delete_current_workout(&self) -> Result<(), domain::DeleteError> {
        self.remove(Key::CurrentWorkout)
            .map_err(domain::StorageError::from)?;
        Ok(())
    }

    async fn read_history(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self.read_workouts().map_err(domain::StorageError::from)?)
    }

    async fn append_to_history(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        let mut workouts = self.read_workouts().map_err(domain::StorageError::from)?;
        if workouts.iter().any(|w| w.id == workout.id) {
            return Err(domain::CreateError::Conflict);
        }
        workouts.push(workout.clone());
        self.set(
            Key::Workouts,
            &workouts.iter().map(Workout::from).collect::<Vec<_>>(),
        )
        .map_err(domain::StorageError::from)?;
        Ok(workout)
    }
}

impl<S: KeyValueStore> log::Repository for LocalStorage<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.get::<VecDeque<log::Entry>>(Key::Log)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let entries = log::prepend(self.read_entries()?, entry);
        self.set(Key::Log, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
