//! Cross-session player record
//!
//! Gems, the best score and the ship collection. This is the only state that
//! outlives a round. The JSON field names match the save-file format.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ShopError};

/// A ship in the hangar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    /// Sprite asset path
    pub filename: String,
    /// Price in gems
    pub cost: u32,
    pub unlocked: bool,
    pub selected: bool,
}

impl Ship {
    fn stock(name: &str, filename: &str, cost: u32) -> Self {
        Self {
            name: name.to_string(),
            filename: filename.to_string(),
            cost,
            unlocked: false,
            selected: false,
        }
    }
}

/// The persisted player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub gems: u32,
    #[serde(rename = "highscore")]
    pub high_score: u32,
    #[serde(rename = "spaceships")]
    pub ships: Vec<Ship>,
}

impl Default for Profile {
    /// Fresh profile: no gems, the first ship unlocked and flown
    fn default() -> Self {
        let mut ships = vec![
            Ship::stock("Starter", "images/ships/ship1.png", 0),
            Ship::stock("Falcon", "images/ships/ship2.png", 10),
            Ship::stock("Viper", "images/ships/ship3.png", 25),
            Ship::stock("Nova", "images/ships/ship4.png", 50),
            Ship::stock("Comet", "images/ships/ship5.png", 75),
            Ship::stock("Eclipse", "images/ships/ship6.png", 100),
        ];
        ships[0].unlocked = true;
        ships[0].selected = true;
        Self {
            gems: 0,
            high_score: 0,
            ships,
        }
    }
}

impl Profile {
    /// Check the ship-selection invariants
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.ships.is_empty() {
            return Err(ProfileError::NoShips);
        }
        let selected: Vec<usize> = self
            .ships
            .iter()
            .enumerate()
            .filter(|(_, s)| s.selected)
            .map(|(i, _)| i)
            .collect();
        match selected.as_slice() {
            [index] if !self.ships[*index].unlocked => {
                Err(ProfileError::SelectedShipLocked { index: *index })
            }
            [_] => Ok(()),
            _ => Err(ProfileError::SelectionCount {
                selected: selected.len(),
            }),
        }
    }

    /// Index of the selected ship
    pub fn selected_index(&self) -> Option<usize> {
        self.ships.iter().position(|s| s.selected)
    }

    pub fn selected_ship(&self) -> Option<&Ship> {
        self.selected_index().map(|i| &self.ships[i])
    }

    pub fn add_gem(&mut self) {
        self.gems += 1;
    }

    /// Record a finished round; returns true on a new high score
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Fly an unlocked ship
    pub fn select_ship(&mut self, index: usize) -> Result<(), ShopError> {
        let ship = self
            .ships
            .get(index)
            .ok_or(ShopError::UnknownShip { index })?;
        if !ship.unlocked {
            return Err(ShopError::ShipLocked { index });
        }
        for (i, ship) in self.ships.iter_mut().enumerate() {
            ship.selected = i == index;
        }
        debug_assert!(self.validate().is_ok());
        Ok(())
    }

    /// Buy a locked ship and fly it
    pub fn purchase_ship(&mut self, index: usize) -> Result<(), ShopError> {
        let ship = self
            .ships
            .get(index)
            .ok_or(ShopError::UnknownShip { index })?;
        if ship.unlocked {
            return Err(ShopError::AlreadyUnlocked { index });
        }
        if ship.cost > self.gems {
            return Err(ShopError::InsufficientGems {
                cost: ship.cost,
                gems: self.gems,
            });
        }
        self.gems -= ship.cost;
        self.ships[index].unlocked = true;
        self.select_ship(index)
    }
}
