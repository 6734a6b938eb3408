//! Per-player score sheets and derived totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{Category, Section};
use crate::error::{CoreError, CoreResult};

/// Upper section total needed to earn the bonus.
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
/// Points awarded for reaching the upper bonus threshold.
pub const UPPER_BONUS: u32 = 35;

/// A player's score card. Cells are write-once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    cells: BTreeMap<Category, u32>,
}

impl ScoreSheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The score in a cell, if it has been filled.
    pub fn get(&self, category: Category) -> Option<u32> {
        self.cells.get(&category).copied()
    }

    /// Whether a cell has been filled.
    pub fn is_set(&self, category: Category) -> bool {
        self.cells.contains_key(&category)
    }

    /// Fill a cell. Fails if the cell already holds a score.
    pub fn record(&mut self, category: Category, points: u32) -> CoreResult<()> {
        if self.is_set(category) {
            return Err(CoreError::CellAlreadySet(category.to_string()));
        }
        self.cells.insert(category, points);
        Ok(())
    }

    /// Number of filled cells.
    pub fn filled(&self) -> usize {
        self.cells.len()
    }

    /// Whether all 13 cells are filled.
    pub fn is_complete(&self) -> bool {
        self.cells.len() == Category::ALL.len()
    }

    /// Categories that can still be scored, in card order.
    pub fn open_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !self.is_set(*c))
            .collect()
    }

    /// Compute totals from the current cells.
    pub fn totals(&self) -> Totals {
        let upper = self.section_sum(Section::Upper);
        let lower = self.section_sum(Section::Lower);
        let bonus = if upper >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        };
        Totals {
            upper,
            bonus,
            lower,
            grand: upper + bonus + lower,
        }
    }

    fn section_sum(&self, section: Section) -> u32 {
        self.cells
            .iter()
            .filter(|(c, _)| c.section() == section)
            .map(|(_, points)| *points)
            .sum()
    }
}

/// Subtotals and grand total for one sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of upper section cells.
    pub upper: u32,
    /// 35 when `upper` reaches 63, else 0.
    pub bonus: u32,
    /// Sum of lower section cells.
    pub lower: u32,
    /// `upper + bonus + lower`.
    pub grand: u32,
}

impl Totals {
    /// Upper section including the bonus, as printed on the card.
    pub fn upper_with_bonus(&self) -> u32 {
        self.upper + self.bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sheet_totals_zero() {
        let sheet = ScoreSheet::new();
        assert_eq!(sheet.totals(), Totals::default());
        assert_eq!(sheet.open_categories().len(), 13);
        assert!(!sheet.is_complete());
    }

    #[test]
    fn cells_are_write_once() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Yahtzee, 50).unwrap();
        let err = sheet.record(Category::Yahtzee, 0).unwrap_err();
        assert_eq!(err, CoreError::CellAlreadySet("Yahtzee".to_string()));
        assert_eq!(sheet.get(Category::Yahtzee), Some(50));
    }

    #[test]
    fn zero_is_a_filled_cell() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Chance, 0).unwrap();
        assert!(sheet.is_set(Category::Chance));
        assert_eq!(sheet.filled(), 1);
    }

    #[test]
    fn bonus_at_threshold() {
        let mut sheet = ScoreSheet::new();
        // 3 of each face: 3 + 6 + 9 + 12 + 15 + 18 = 63
        for (c, points) in Category::UPPER.into_iter().zip([3, 6, 9, 12, 15, 18]) {
            sheet.record(c, points).unwrap();
        }
        let t = sheet.totals();
        assert_eq!(t.upper, 63);
        assert_eq!(t.bonus, 35);
        assert_eq!(t.upper_with_bonus(), 98);
        assert_eq!(t.grand, 98);
    }

    #[test]
    fn no_bonus_below_threshold() {
        let mut sheet = ScoreSheet::new();
        for (c, points) in Category::UPPER.into_iter().zip([2, 6, 9, 12, 15, 18]) {
            sheet.record(c, points).unwrap();
        }
        assert_eq!(sheet.totals().upper, 62);
        assert_eq!(sheet.totals().bonus, 0);
    }

    #[test]
    fn lower_does_not_count_toward_bonus() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Yahtzee, 50).unwrap();
        sheet.record(Category::Chance, 30).unwrap();
        let t = sheet.totals();
        assert_eq!(t.upper, 0);
        assert_eq!(t.bonus, 0);
        assert_eq!(t.lower, 80);
        assert_eq!(t.grand, 80);
    }

    #[test]
    fn complete_sheet() {
        let mut sheet = ScoreSheet::new();
        for c in Category::ALL {
            sheet.record(c, 0).unwrap();
        }
        assert!(sheet.is_complete());
        assert!(sheet.open_categories().is_empty());
    }

    #[test]
    fn serde_round_trip() {
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::FullHouse, 25).unwrap();
        let json = serde_json::to_string(&sheet).unwrap();
        let back: ScoreSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sheet);
    }
}
