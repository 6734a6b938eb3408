//! Chronological game log and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use yahtzee_core::{Category, DieId};

use crate::player::Player;

/// A single event in the game log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogEntry {
    /// A roll landed and was applied.
    Rolled {
        /// Who rolled.
        player: Player,
        /// Faces after merging, in tray order.
        faces: Vec<u8>,
        /// Whether this was a partial reroll.
        reroll: bool,
        /// Rolls left after this one.
        rolls_remaining: u8,
        /// When applied.
        timestamp: DateTime<Utc>,
    },
    /// A die was locked or unlocked.
    LockToggled {
        /// Who toggled.
        player: Player,
        /// The die.
        die: DieId,
        /// Its face.
        value: u8,
        /// New lock state.
        locked: bool,
        /// When toggled.
        timestamp: DateTime<Utc>,
    },
    /// A category was committed.
    Scored {
        /// Whose sheet.
        player: Player,
        /// Which cell.
        category: Category,
        /// Points written.
        points: u32,
        /// The dice that were scored.
        faces: Vec<u8>,
        /// When committed.
        timestamp: DateTime<Utc>,
    },
    /// The turn passed to the other player.
    TurnPassed {
        /// New active player.
        to: Player,
        /// Rounds completed so far.
        rounds_completed: u32,
        /// When passed.
        timestamp: DateTime<Utc>,
    },
    /// The dice renderer reported a failure.
    RendererFault {
        /// The renderer's message.
        message: String,
        /// When reported.
        timestamp: DateTime<Utc>,
    },
    /// The game finished.
    GameOver {
        /// Final grand totals for player 1 and player 2.
        totals: [u32; 2],
        /// Winner, or `None` for a tie.
        winner: Option<Player>,
        /// When finished.
        timestamp: DateTime<Utc>,
    },
}

/// A chronological log of game events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// All entries in order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Export the log as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Yahtzee Game Log\n\n");
        for entry in &self.entries {
            match entry {
                LogEntry::Rolled {
                    player,
                    faces,
                    reroll,
                    rolls_remaining,
                    ..
                } => {
                    let verb = if *reroll { "rerolled" } else { "rolled" };
                    out.push_str(&format!(
                        "- {player} {verb} `{}` ({rolls_remaining} left)\n",
                        format_faces(faces)
                    ));
                }
                LogEntry::LockToggled {
                    player,
                    value,
                    locked,
                    ..
                } => {
                    let verb = if *locked { "locked" } else { "unlocked" };
                    out.push_str(&format!("- {player} {verb} a {value}\n"));
                }
                LogEntry::Scored {
                    player,
                    category,
                    points,
                    faces,
                    ..
                } => {
                    out.push_str(&format!(
                        "- **{player} scored {points} in {category}** with `{}`\n",
                        format_faces(faces)
                    ));
                }
                LogEntry::TurnPassed {
                    to,
                    rounds_completed,
                    ..
                } => {
                    out.push_str(&format!(
                        "\n## {to}'s turn (round {})\n\n",
                        rounds_completed + 1
                    ));
                }
                LogEntry::RendererFault { message, .. } => {
                    out.push_str(&format!("- *Dice error*: {message}\n"));
                }
                LogEntry::GameOver { totals, winner, .. } => {
                    out.push_str("\n## Game Over\n\n");
                    out.push_str(&format!(
                        "Player 1: {} | Player 2: {}\n\n",
                        totals[0], totals[1]
                    ));
                    match winner {
                        Some(p) => out.push_str(&format!("**{p} wins!**\n")),
                        None => out.push_str("**Tie game.**\n"),
                    }
                }
            }
        }
        out
    }

    /// Export the log as plain text with timestamps.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Yahtzee Game Log\n================\n\n");
        for entry in &self.entries {
            let (timestamp, line) = match entry {
                LogEntry::Rolled {
                    player,
                    faces,
                    reroll,
                    timestamp,
                    ..
                } => {
                    let verb = if *reroll { "rerolled" } else { "rolled" };
                    (timestamp, format!("{player} {verb} {}", format_faces(faces)))
                }
                LogEntry::LockToggled {
                    player,
                    die,
                    locked,
                    timestamp,
                    ..
                } => {
                    let verb = if *locked { "locked" } else { "unlocked" };
                    (timestamp, format!("{player} {verb} die {die}"))
                }
                LogEntry::Scored {
                    player,
                    category,
                    points,
                    timestamp,
                    ..
                } => (timestamp, format!("{player} scored {points} in {category}")),
                LogEntry::TurnPassed { to, timestamp, .. } => {
                    (timestamp, format!("Turn passes to {to}"))
                }
                LogEntry::RendererFault { message, timestamp } => {
                    (timestamp, format!("Dice error: {message}"))
                }
                LogEntry::GameOver {
                    totals,
                    winner,
                    timestamp,
                } => {
                    let result = match winner {
                        Some(p) => format!("{p} wins"),
                        None => "tie".to_string(),
                    };
                    (
                        timestamp,
                        format!("Game over: {} - {} ({result})", totals[0], totals[1]),
                    )
                }
            };
            out.push_str(&format!("[{}] {line}\n", timestamp.format("%H:%M:%S")));
        }
        out
    }
}

fn format_faces(faces: &[u8]) -> String {
    let values: Vec<String> = faces.iter().map(|f| f.to_string()).collect();
    format!("[{}]", values.join(", "))
}
