//! Error types for the profile record and its persistence

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Broken invariants in a loaded or edited profile
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileError {
    NoShips,
    SelectionCount { selected: usize },
    SelectedShipLocked { index: usize },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoShips => write!(f, "profile has no ships"),
            Self::SelectionCount { selected } => {
                write!(f, "exactly one ship must be selected, found {selected}")
            }
            Self::SelectedShipLocked { index } => {
                write!(f, "selected ship {index} is not unlocked")
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// Refused shop actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShopError {
    UnknownShip { index: usize },
    ShipLocked { index: usize },
    AlreadyUnlocked { index: usize },
    InsufficientGems { cost: u32, gems: u32 },
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownShip { index } => write!(f, "no ship at index {index}"),
            Self::ShipLocked { index } => write!(f, "ship {index} is locked"),
            Self::AlreadyUnlocked { index } => write!(f, "ship {index} is already unlocked"),
            Self::InsufficientGems { cost, gems } => {
                write!(f, "ship costs {cost} gems but only {gems} available")
            }
        }
    }
}

impl std::error::Error for ShopError {}

/// Failure to read or write the save file
#[derive(Debug)]
pub enum PersistenceError {
    /// No save file at the path
    Missing { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Encode(serde_json::Error),
    Invalid { path: PathBuf, source: ProfileError },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "save file {} not found", path.display()),
            Self::Io { path, .. } => write!(f, "failed to access {}", path.display()),
            Self::Parse { path, .. } => write!(f, "save file {} is corrupt", path.display()),
            Self::Encode(_) => write!(f, "failed to encode profile"),
            Self::Invalid { path, .. } => {
                write!(f, "save file {} holds an invalid profile", path.display())
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Missing { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Encode(source) => Some(source),
            Self::Invalid { source, .. } => Some(source),
        }
    }
}
