//! A completed five-dice roll.

use serde::{Deserialize, Serialize};

use super::{DICE_PER_ROLL, Die, DieId, FACES};
use crate::error::{CoreError, CoreResult};

/// Exactly five dice with distinct ids, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    dice: Vec<Die>,
}

impl Roll {
    /// Build a roll, checking the dice count, faces, and id uniqueness.
    pub fn new(dice: Vec<Die>) -> CoreResult<Self> {
        if dice.len() != DICE_PER_ROLL {
            return Err(CoreError::WrongDiceCount(dice.len()));
        }
        for (i, die) in dice.iter().enumerate() {
            if !(1..=FACES).contains(&die.value) {
                return Err(CoreError::InvalidFace(die.value));
            }
            if dice[..i].iter().any(|d| d.id == die.id) {
                return Err(CoreError::DuplicateDie(die.id));
            }
        }
        Ok(Self { dice })
    }

    /// Build a roll from bare face values, numbering ids from `first_id`.
    pub fn from_faces(first_id: u32, faces: &[u8]) -> CoreResult<Self> {
        let dice = faces
            .iter()
            .zip(first_id..)
            .map(|(&face, id)| Die::new(DieId(id), face))
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(dice)
    }

    /// The dice in display order.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Face values in display order.
    pub fn faces(&self) -> Vec<u8> {
        self.dice.iter().map(|d| d.value).collect()
    }

    /// Sum of all face values.
    pub fn total(&self) -> u32 {
        self.dice.iter().map(|d| d.value as u32).sum()
    }

    /// Consume the roll and return its dice.
    pub fn into_dice(self) -> Vec<Die> {
        self.dice
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.value.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}
