//! Error types for the core game model.

use crate::dice::DieId;

/// Errors that can occur while building dice, rolls, or score sheets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A die face outside 1..=6.
    #[error("invalid face value: {0} (expected 1-6)")]
    InvalidFace(u8),

    /// A roll did not contain exactly five dice.
    #[error("a roll needs exactly 5 dice, got {0}")]
    WrongDiceCount(usize),

    /// Two dice in the same roll share an id.
    #[error("duplicate die id {0} in roll")]
    DuplicateDie(DieId),

    /// A category label that does not name any of the 13 categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A score sheet cell that already holds a score.
    #[error("{0} is already scored")]
    CellAlreadySet(String),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
