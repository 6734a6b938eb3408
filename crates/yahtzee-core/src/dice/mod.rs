//! Dice and rolls.
//!
//! A [`Die`] pairs a stable [`DieId`] with a face value. Ids survive a
//! partial reroll for every die that was not rerolled, so locked dice can be
//! matched by identity rather than by position.

pub mod roll;

pub use roll::Roll;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Number of dice in every roll.
pub const DICE_PER_ROLL: usize = 5;

/// Number of faces on each die.
pub const FACES: u8 = 6;

/// Opaque identity of a physical die, assigned by the dice renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DieId(pub u32);

impl std::fmt::Display for DieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single six-sided die with a known face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    /// Stable identity.
    pub id: DieId,
    /// Face value, 1 to 6.
    pub value: u8,
}

impl Die {
    /// Create a die, rejecting faces outside 1..=6.
    pub fn new(id: DieId, value: u8) -> CoreResult<Self> {
        if !(1..=FACES).contains(&value) {
            return Err(CoreError::InvalidFace(value));
        }
        Ok(Self { id, value })
    }
}

/// Count how many dice show each face.
///
/// Index 0 is unused so that `counts[face]` reads naturally. Faces outside
/// 1..=6 are skipped.
pub fn face_counts(faces: &[u8]) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &face in faces {
        if (1..=FACES).contains(&face) {
            counts[face as usize] += 1;
        }
    }
    counts
}
