//! The scoring engine.
//!
//! Every function here is pure and total: any category and any slice of
//! faces produce a score. A hand with fewer than five dice (nothing rolled
//! yet) scores 0 everywhere.

use crate::category::Category;
use crate::dice::{DICE_PER_ROLL, Die, face_counts};

/// Fixed score for a full house.
pub const FULL_HOUSE_SCORE: u32 = 25;
/// Fixed score for a small straight.
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
/// Fixed score for a large straight.
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
/// Fixed score for a Yahtzee.
pub const YAHTZEE_SCORE: u32 = 50;

/// Score a hand of face values in a category.
pub fn score(category: Category, faces: &[u8]) -> u32 {
    if faces.len() != DICE_PER_ROLL {
        return 0;
    }

    let counts = face_counts(faces);
    let sum: u32 = faces.iter().map(|&f| f as u32).sum();

    match category {
        Category::Aces
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.face().unwrap_or(0);
            face as u32 * counts[face as usize] as u32
        }
        Category::ThreeOfAKind => {
            if max_count(&counts) >= 3 {
                sum
            } else {
                0
            }
        }
        Category::FourOfAKind => {
            if max_count(&counts) >= 4 {
                sum
            } else {
                0
            }
        }
        Category::FullHouse => {
            // Five of a kind has no distinct pair and does not qualify.
            let has_triple = counts.contains(&3);
            let has_pair = counts.contains(&2);
            if has_triple && has_pair {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if longest_run(&counts) >= 4 {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if longest_run(&counts) >= 5 {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if max_count(&counts) == 5 {
                YAHTZEE_SCORE
            } else {
                0
            }
        }
        Category::Chance => sum,
    }
}

/// Score a hand of dice in a category.
pub fn score_dice(category: Category, dice: &[Die]) -> u32 {
    let faces: Vec<u8> = dice.iter().map(|d| d.value).collect();
    score(category, &faces)
}

/// Score by category label. Unknown labels score 0.
pub fn score_label(label: &str, faces: &[u8]) -> u32 {
    Category::from_label(label)
        .map(|category| score(category, faces))
        .unwrap_or(0)
}

/// Score a hand in every category, in score card order.
pub fn score_all(faces: &[u8]) -> [(Category, u32); 13] {
    Category::ALL.map(|category| (category, score(category, faces)))
}

fn max_count(counts: &[u8; 7]) -> u8 {
    counts.iter().copied().max().unwrap_or(0)
}

/// Length of the longest run of consecutive faces present.
fn longest_run(counts: &[u8; 7]) -> u32 {
    let mut best = 0;
    let mut run = 0;
    for &count in &counts[1..] {
        if count > 0 {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}
