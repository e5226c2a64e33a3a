//! File-backed profile store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::PersistenceError;
use crate::profile::Profile;

/// Save file name, relative to the working directory
pub const DEFAULT_SAVE_PATH: &str = "save-data.json";

/// Reads and writes the profile document at a fixed path
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_PATH)
    }
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the profile
    pub fn load(&self) -> Result<Profile, PersistenceError> {
        let json = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                PersistenceError::Missing {
                    path: self.path.clone(),
                }
            } else {
                PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let profile: Profile =
            serde_json::from_str(&json).map_err(|source| PersistenceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        profile
            .validate()
            .map_err(|source| PersistenceError::Invalid {
                path: self.path.clone(),
                source,
            })?;

        log::info!(
            "Loaded profile from {} ({} gems, high score {})",
            self.path.display(),
            profile.gems,
            profile.high_score
        );
        Ok(profile)
    }

    /// Load the profile, starting fresh only if no save file exists yet
    ///
    /// A save file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(&self) -> Result<Profile, PersistenceError> {
        match self.load() {
            Err(PersistenceError::Missing { path }) => {
                log::warn!("No save file at {}, starting a new profile", path.display());
                Ok(Profile::default())
            }
            other => other,
        }
    }

    /// Write the profile, replacing the save file atomically
    pub fn save(&self, profile: &Profile) -> Result<(), PersistenceError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        profile
            .serialize(&mut ser)
            .map_err(PersistenceError::Encode)?;

        let tmp = self.path.with_extension("json.tmp");
        let io_err = |source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, &buf).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        log::info!("Profile saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join(DEFAULT_SAVE_PATH))
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(matches!(store.load(), Err(PersistenceError::Missing { .. })));
        assert_eq!(store.load_or_default().unwrap(), Profile::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut profile = Profile::default();
        profile.add_gem();
        profile.record_score(42);
        store.save(&profile).unwrap();

        assert_eq!(store.load().unwrap(), profile);
        assert!(!dir.path().join("save-data.json.tmp").exists());

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n    \"gems\": 1"));
    }

    #[test]
    fn test_corrupt_file_is_not_replaced_by_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(PersistenceError::Parse { .. })));
        assert!(matches!(
            store.load_or_default(),
            Err(PersistenceError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut profile = Profile::default();
        profile.ships[0].selected = false;
        fs::write(store.path(), serde_json::to_string(&profile).unwrap()).unwrap();
        assert!(matches!(store.load(), Err(PersistenceError::Invalid { .. })));
    }

    #[test]
    fn test_reads_handwritten_save_layout() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let json = r#"{
            "gems": 7,
            "highscore": 131,
            "spaceships": [
                {"name": "Basic", "filename": "images/ship.png", "cost": 0,
                 "unlocked": true, "selected": true},
                {"name": "Red", "filename": "images/red.png", "cost": 20,
                 "unlocked": false, "selected": false}
            ]
        }"#;
        fs::write(store.path(), json).unwrap();
        let profile = store.load().unwrap();
        assert_eq!(profile.gems, 7);
        assert_eq!(profile.high_score, 131);
        assert_eq!(profile.ships.len(), 2);
    }
}
