//! The thirteen scoring categories.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which half of the score card a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Aces through Sixes; counts toward the upper bonus.
    Upper,
    /// Combinations scored by pattern.
    Lower,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upper => write!(f, "Upper Section"),
            Self::Lower => write!(f, "Lower Section"),
        }
    }
}

/// A scoring category. Declaration order is score card order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Sum of ones.
    Aces,
    /// Sum of twos.
    Twos,
    /// Sum of threes.
    Threes,
    /// Sum of fours.
    Fours,
    /// Sum of fives.
    Fives,
    /// Sum of sixes.
    Sixes,
    /// Three dice alike, scores the dice total.
    ThreeOfAKind,
    /// Four dice alike, scores the dice total.
    FourOfAKind,
    /// A triple plus a distinct pair.
    FullHouse,
    /// Four in a row.
    SmallStraight,
    /// Five in a row.
    LargeStraight,
    /// All five dice alike.
    Yahtzee,
    /// Anything, scores the dice total.
    Chance,
}

impl Category {
    /// Every category in score card order.
    pub const ALL: [Category; 13] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// Upper section categories in order.
    pub const UPPER: [Category; 6] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// Lower section categories in order.
    pub const LOWER: [Category; 7] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// The section this category is printed in.
    pub fn section(self) -> Section {
        if self.face().is_some() {
            Section::Upper
        } else {
            Section::Lower
        }
    }

    /// The face an upper category counts, or `None` for lower categories.
    pub fn face(self) -> Option<u8> {
        match self {
            Self::Aces => Some(1),
            Self::Twos => Some(2),
            Self::Threes => Some(3),
            Self::Fours => Some(4),
            Self::Fives => Some(5),
            Self::Sixes => Some(6),
            _ => None,
        }
    }

    /// Score card label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Aces => "Aces",
            Self::Twos => "Twos",
            Self::Threes => "Threes",
            Self::Fours => "Fours",
            Self::Fives => "Fives",
            Self::Sixes => "Sixes",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::FourOfAKind => "Four of a Kind",
            Self::FullHouse => "Full House",
            Self::SmallStraight => "Small Straight",
            Self::LargeStraight => "Large Straight",
            Self::Yahtzee => "Yahtzee",
            Self::Chance => "Chance",
        }
    }

    /// The "how to score" column of the score card.
    pub fn description(self) -> &'static str {
        match self {
            Self::Aces => "Count and add only Aces",
            Self::Twos => "Count and add only Twos",
            Self::Threes => "Count and add only Threes",
            Self::Fours => "Count and add only Fours",
            Self::Fives => "Count and add only Fives",
            Self::Sixes => "Count and add only Sixes",
            Self::ThreeOfAKind | Self::FourOfAKind => "Add total of all dice",
            Self::FullHouse => "Score 25",
            Self::SmallStraight => "Sequence of 4 - Score 30",
            Self::LargeStraight => "Sequence of 5 - Score 40",
            Self::Yahtzee => "5 of a Kind - Score 50",
            Self::Chance => "Score total of all 5 dice",
        }
    }

    /// Resolve a label leniently.
    ///
    /// Matching ignores case, spaces, dashes, and underscores, and accepts
    /// the short card labels ("Sm Straight", "Lg Straight", "3 of a kind").
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        let category = match key.as_str() {
            "aces" | "ones" => Self::Aces,
            "twos" => Self::Twos,
            "threes" => Self::Threes,
            "fours" => Self::Fours,
            "fives" => Self::Fives,
            "sixes" => Self::Sixes,
            "threeofakind" | "3ofakind" | "3k" => Self::ThreeOfAKind,
            "fourofakind" | "4ofakind" | "4k" => Self::FourOfAKind,
            "fullhouse" => Self::FullHouse,
            "smallstraight" | "smstraight" => Self::SmallStraight,
            "largestraight" | "lgstraight" => Self::LargeStraight,
            "yahtzee" => Self::Yahtzee,
            "chance" => Self::Chance,
            _ => return None,
        };
        Some(category)
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| CoreError::UnknownCategory(s.trim().to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
