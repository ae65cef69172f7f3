#![warn(clippy::pedantic)]

use std::sync::{Arc, Mutex};

use anyhow::Context;
use workout_diary_app::{Config, log};
use workout_diary_domain as domain;

use crate::{key_value::FileStore, local_storage::LocalStorage};

pub mod key_value;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod record;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] key_value::StoreError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Record(#[from] record::RecordError),
}

impl From<Error> for domain::StorageError {
    fn from(value: Error) -> Self {
        match value {
            Error::Store(err) => domain::StorageError::Other(Box::new(err)),
            Error::Serde(_) | Error::Record(_) => domain::StorageError::Corrupt(value.to_string()),
        }
    }
}

/// Opens the local storage in the configured data directory and seeds missing documents.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the stored documents cannot be
/// accessed.
pub fn open(config: &Config) -> anyhow::Result<domain::Service<LocalStorage<FileStore>>> {
    let storage = LocalStorage::new(file_store(config)?);
    storage
        .initialize()
        .context("failed to initialize local storage")?;
    Ok(domain::Service::new(storage))
}

/// Opens the persisted log entries in the configured data directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_log(
    config: &Config,
) -> anyhow::Result<workout_diary_app::Service<LocalStorage<FileStore>>> {
    Ok(workout_diary_app::Service::new(LocalStorage::new(file_store(config)?)))
}

/// Installs the logger, persisting log entries next to the application data.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or a logger is already installed.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    log::init(
        Arc::new(Mutex::new(LocalStorage::new(file_store(config)?))),
        config.log_level,
    )
    .context("failed to initialize logger")
}

fn file_store(config: &Config) -> anyhow::Result<FileStore> {
    FileStore::new(&config.data_dir).with_context(|| {
        format!(
            "failed to open data directory {}",
            config.data_dir.display()
        )
    })
}

#[cfg(test)]
mod tests {
    pub mod data;

    use ::log::Level;
    use pretty_assertions::assert_eq;
    use workout_diary_app::log::{Repository, Service as _};
    use workout_diary_domain::{
        ExerciseDraft, ExerciseType, Name, ProfileService, WorkoutService,
    };

    use super::*;
    use data::PROFILE;

    #[tokio::test]
    async fn test_open() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("data"));

        let service = open(&config).unwrap();

        assert_eq!(
            service.get_profile().await.unwrap(),
            Some(domain::Profile::default())
        );
        assert!(service.is_onboarding_required().await);
        assert!(service.get_history().await.unwrap().is_empty());
        assert!(dir.path().join("data").is_dir());
    }

    #[tokio::test]
    async fn test_open_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());

        let service = open(&config).unwrap();
        service.replace_profile(PROFILE.clone()).await.unwrap();
        service
            .start_workout(Name::new("Push").unwrap(), vec![])
            .await
            .unwrap();
        service
            .add_exercise(&ExerciseDraft {
                name: "Bench Press".to_string(),
                exercise_type: ExerciseType::Set,
                notes: None,
            })
            .await
            .unwrap();
        let current = service.get_current_workout().await.unwrap().unwrap();

        let service = open(&config).unwrap();

        assert_eq!(service.get_profile().await.unwrap(), Some(PROFILE.clone()));
        assert_eq!(
            service.get_current_workout().await.unwrap(),
            Some(current.clone())
        );

        let completed = service.complete_workout().await.unwrap().unwrap();

        let service = open(&config).unwrap();

        assert_eq!(service.get_current_workout().await.unwrap(), None);
        assert_eq!(service.get_history().await.unwrap(), vec![completed.clone()]);
        assert_eq!(completed.id, current.id);
        assert!(completed.completed);
    }

    #[test]
    fn test_open_log() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        let entry = log::Entry {
            time: "Jun 15 18:00:00".to_string(),
            level: Level::Error,
            message: "failed to read workout history".to_string(),
        };

        assert!(open_log(&config).unwrap().get_log_entries().unwrap().is_empty());

        LocalStorage::new(FileStore::new(dir.path()).unwrap())
            .write_entry(entry.clone())
            .unwrap();

        assert_eq!(
            open_log(&config).unwrap().get_log_entries().unwrap(),
            [entry]
        );
    }

    #[test]
    fn test_storage_error() {
        let err = domain::StorageError::from(Error::Record(record::RecordError::InvalidDate(
            "1990-13-01".to_string(),
        )));
        assert!(
            matches!(err, domain::StorageError::Corrupt(message) if message == "invalid date of birth: 1990-13-01")
        );
    }
}
