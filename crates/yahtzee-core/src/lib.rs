//! Core game model for two-player Yahtzee.
//!
//! Provides dice and rolls with stable die identities, the thirteen scoring
//! categories, a pure scoring engine, and write-once score sheets with the
//! upper-section bonus.

pub mod category;
pub mod dice;
pub mod error;
pub mod scoring;
pub mod sheet;

pub use category::{Category, Section};
pub use dice::{DICE_PER_ROLL, Die, DieId, Roll};
pub use error::{CoreError, CoreResult};
pub use scoring::{score, score_all, score_dice, score_label};
pub use sheet::{ScoreSheet, Totals, UPPER_BONUS, UPPER_BONUS_THRESHOLD};
