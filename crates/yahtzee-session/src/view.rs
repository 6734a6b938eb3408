//! Read-only snapshot of a session for display layers.

use serde::Serialize;

use yahtzee_core::{Category, DieId, Section, Totals};

use crate::player::Player;
use crate::renderer::RendererStatus;
use crate::session::{GameSession, Phase, Standing};

/// Everything a display layer needs to draw the table.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Current phase.
    pub phase: Phase,
    /// Whose turn it is.
    pub active_player: Player,
    /// Rolls left this turn.
    pub rolls_remaining: u8,
    /// Current round, 1-based, capped at `rounds`.
    pub round: u32,
    /// Round limit.
    pub rounds: u32,
    /// Whether the roll button should be enabled.
    pub can_roll: bool,
    /// Dice on the table in tray order.
    pub dice: Vec<DieView>,
    /// One row per category in card order.
    pub rows: Vec<RowView>,
    /// Totals for player 1 and player 2.
    pub totals: [Totals; 2],
    /// Who is ahead.
    pub leader: Standing,
    /// Final result once the game is over.
    pub winner: Option<Standing>,
    /// Renderer readiness.
    pub renderer: RendererStatus,
}

/// A die on the table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DieView {
    /// Die identity.
    pub id: DieId,
    /// Face value.
    pub value: u8,
    /// Whether it is held for the next reroll.
    pub locked: bool,
}

/// A score card row.
#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    /// The category.
    pub category: Category,
    /// Card label.
    pub label: &'static str,
    /// How to score it.
    pub description: &'static str,
    /// Upper or lower section.
    pub section: Section,
    /// Cells for player 1 and player 2.
    pub cells: [CellView; 2],
}

/// One player's cell in a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Committed score.
    pub score: Option<u32>,
    /// What picking this cell now would score (active player only).
    pub preview: Option<u32>,
}

impl SessionView {
    /// Rows in one section.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &RowView> {
        self.rows.iter().filter(move |r| r.section == section)
    }

    /// The renderer error to show, if any.
    pub fn error(&self) -> Option<&str> {
        self.renderer.error()
    }
}

impl GameSession {
    /// Take a display snapshot.
    pub fn view(&self) -> SessionView {
        let turn = self.turn();
        let active = turn.active_player();

        let dice = turn
            .dice()
            .iter()
            .map(|d| DieView {
                id: d.id,
                value: d.value,
                locked: turn.is_locked(d.id),
            })
            .collect();

        let rows = Category::ALL
            .into_iter()
            .map(|category| {
                let cells = Player::BOTH.map(|player| CellView {
                    score: self.sheet(player).get(category),
                    preview: if player == active {
                        self.preview(category)
                    } else {
                        None
                    },
                });
                RowView {
                    category,
                    label: category.label(),
                    description: category.description(),
                    section: category.section(),
                    cells,
                }
            })
            .collect();

        let rounds = self.config().rounds;
        SessionView {
            phase: self.phase(),
            active_player: active,
            rolls_remaining: turn.rolls_remaining(),
            round: (self.rounds_completed() + 1).min(rounds),
            rounds,
            can_roll: self.roll_blocker().is_none(),
            dice,
            rows,
            totals: Player::BOTH.map(|p| self.totals(p)),
            leader: self.leader(),
            winner: self.winner(),
            renderer: self.renderer_status().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::renderer::{RollOutcome, RendererEvent};
    use yahtzee_core::Die;

    fn session_with_roll(faces: &[u8]) -> GameSession {
        let mut s = GameSession::new(SessionConfig::default());
        s.apply(RendererEvent::Ready);
        s.request_roll();
        let request = s.turn().pending().map(|r| r.id).unwrap();
        let dice = faces
            .iter()
            .zip(1..)
            .map(|(&value, id)| Die { id: DieId(id), value })
            .collect();
        s.apply(RendererEvent::Rolled(RollOutcome { request, dice }));
        s
    }

    #[test]
    fn fresh_view() {
        let mut s = GameSession::new(SessionConfig::default());
        let v = s.view();
        assert_eq!(v.phase, Phase::AwaitingRoll);
        assert!(!v.can_roll);
        assert_eq!(v.round, 1);
        assert_eq!(v.rows.len(), 13);
        assert!(v.dice.is_empty());
        assert_eq!(v.leader, Standing::Tie);

        s.on_renderer_ready();
        assert!(s.view().can_roll);
    }

    #[test]
    fn previews_only_for_active_player() {
        let s = session_with_roll(&[3, 3, 3, 5, 5]);
        let v = s.view();
        let full_house = v.rows.iter().find(|r| r.category == Category::FullHouse).unwrap();
        assert_eq!(full_house.cells[0], CellView { score: None, preview: Some(25) });
        assert_eq!(full_house.cells[1], CellView::default());
    }

    #[test]
    fn dice_carry_lock_flags() {
        let mut s = session_with_roll(&[1, 2, 3, 4, 5]);
        s.toggle_lock(DieId(2));
        let v = s.view();
        let locked: Vec<bool> = v.dice.iter().map(|d| d.locked).collect();
        assert_eq!(locked, vec![false, true, false, false, false]);
    }

    #[test]
    fn section_filter() {
        let v = session_with_roll(&[1, 2, 3, 4, 5]).view();
        assert_eq!(v.section(Section::Upper).count(), 6);
        assert_eq!(v.section(Section::Lower).count(), 7);
    }

    #[test]
    fn serializes_to_json() {
        let v = session_with_roll(&[6, 6, 6, 6, 6]).view();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["phase"], "InProgress");
        assert_eq!(json["active_player"], "One");
        assert_eq!(json["dice"].as_array().unwrap().len(), 5);
    }
}
