//! The turn, roll, and score state machine.
//!
//! `GameSession` is the single owner of game state. Every mutation goes
//! through one of its operations; requests that are out of turn, stale, or
//! otherwise not allowed right now are ignored and reported as
//! [`Transition::Ignored`] rather than as errors.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use yahtzee_core::{Category, CoreError, CoreResult, Die, DieId, Roll, ScoreSheet, Totals};

use crate::config::{ROLLS_PER_TURN, SessionConfig};
use crate::log::{GameLog, LogEntry};
use crate::player::Player;
use crate::renderer::{RendererEvent, RendererStatus, RequestId, RollKind, RollOutcome, RollRequest};

/// Where the active turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Start of a turn; nothing rolled yet.
    AwaitingRoll,
    /// A roll request is outstanding.
    Rolling,
    /// Dice are on the table; lock, reroll, or score.
    InProgress,
    /// All rounds played; the session is read-only.
    GameOver,
}

/// Why an operation was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The game has ended.
    GameOver,
    /// The dice renderer is loading or has failed.
    RendererNotReady,
    /// All rolls for this turn are used.
    NoRollsLeft,
    /// A roll is still outstanding.
    RollPending,
    /// Every die is locked, so a reroll would change nothing.
    AllDiceLocked,
    /// Nothing has been rolled this turn.
    NoDice,
    /// No die with this id is on the table.
    UnknownDie(DieId),
    /// The player is not the active player.
    WrongPlayer(Player),
    /// The cell already holds a score.
    CellAlreadyScored(Category),
    /// A roll result that answers no outstanding request.
    StaleResult(RequestId),
    /// The renderer returned dice that do not form a valid roll.
    MalformedResult,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GameOver => write!(f, "The game is over."),
            Self::RendererNotReady => write!(f, "The dice are not ready."),
            Self::NoRollsLeft => write!(f, "No rolls left this turn; pick a category."),
            Self::RollPending => write!(f, "The dice are still rolling."),
            Self::AllDiceLocked => write!(f, "All dice are locked; unlock one to reroll."),
            Self::NoDice => write!(f, "Roll the dice first."),
            Self::UnknownDie(id) => write!(f, "No die {id} on the table."),
            Self::WrongPlayer(p) => write!(f, "It is not {p}'s turn."),
            Self::CellAlreadyScored(c) => write!(f, "{c} is already scored."),
            Self::StaleResult(id) => write!(f, "No roll request {} is outstanding.", id.0),
            Self::MalformedResult => write!(f, "The dice renderer returned an invalid roll."),
        }
    }
}

/// The result of a state machine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// State changed.
    Applied,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl Transition {
    /// Whether the operation changed state.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// The reason for ignoring, if ignored.
    pub fn reason(&self) -> Option<&IgnoreReason> {
        match self {
            Self::Applied => None,
            Self::Ignored(reason) => Some(reason),
        }
    }
}

/// Who is ahead, or who won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    /// This player has the strictly greater grand total.
    Leader(Player),
    /// Grand totals are equal.
    Tie,
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leader(p) => write!(f, "{p}"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// The active player's turn.
#[derive(Debug, Clone)]
pub struct Turn {
    active: Player,
    rolls_remaining: u8,
    dice: Vec<Die>,
    locked: BTreeSet<DieId>,
    pending: Option<RollRequest>,
}

impl Turn {
    fn new(active: Player) -> Self {
        Self {
            active,
            rolls_remaining: ROLLS_PER_TURN,
            dice: Vec::new(),
            locked: BTreeSet::new(),
            pending: None,
        }
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Rolls left this turn (0-3).
    pub fn rolls_remaining(&self) -> u8 {
        self.rolls_remaining
    }

    /// Dice on the table, empty before the first roll lands.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Face values on the table.
    pub fn faces(&self) -> Vec<u8> {
        self.dice.iter().map(|d| d.value).collect()
    }

    /// Ids of locked dice.
    pub fn locked(&self) -> &BTreeSet<DieId> {
        &self.locked
    }

    /// Whether a die is locked.
    pub fn is_locked(&self, id: DieId) -> bool {
        self.locked.contains(&id)
    }

    /// The outstanding roll request.
    pub fn pending(&self) -> Option<&RollRequest> {
        self.pending.as_ref()
    }

    /// Whether a roll has landed this turn.
    pub fn has_dice(&self) -> bool {
        !self.dice.is_empty()
    }
}

/// A two-player game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    sheets: [ScoreSheet; 2],
    turn: Turn,
    rounds_completed: u32,
    renderer: RendererStatus,
    next_request: u64,
    log: GameLog,
}

impl GameSession {
    /// Start a game: round 0, player 1 to roll, empty sheets.
    ///
    /// Rolls are refused until the renderer reports ready.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sheets: [ScoreSheet::new(), ScoreSheet::new()],
            turn: Turn::new(Player::One),
            rounds_completed: 0,
            renderer: RendererStatus::Initializing,
            next_request: 0,
            log: GameLog::new(),
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The current turn.
    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    /// A player's score sheet.
    pub fn sheet(&self, player: Player) -> &ScoreSheet {
        &self.sheets[player.index()]
    }

    /// Full rounds played.
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    /// Renderer readiness.
    pub fn renderer_status(&self) -> &RendererStatus {
        &self.renderer
    }

    /// The game log.
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// Whether the round limit has been reached.
    pub fn is_game_over(&self) -> bool {
        self.rounds_completed >= self.config.rounds
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if self.is_game_over() {
            Phase::GameOver
        } else if self.turn.pending.is_some() {
            Phase::Rolling
        } else if self.turn.has_dice() {
            Phase::InProgress
        } else {
            Phase::AwaitingRoll
        }
    }

    /// Why a roll request would be ignored right now, if it would.
    pub fn roll_blocker(&self) -> Option<IgnoreReason> {
        if self.is_game_over() {
            Some(IgnoreReason::GameOver)
        } else if !self.renderer.is_ready() {
            Some(IgnoreReason::RendererNotReady)
        } else if self.turn.pending.is_some() {
            Some(IgnoreReason::RollPending)
        } else if self.turn.rolls_remaining == 0 {
            Some(IgnoreReason::NoRollsLeft)
        } else if self.turn.has_dice() && self.turn.dice.iter().all(|d| self.turn.is_locked(d.id)) {
            Some(IgnoreReason::AllDiceLocked)
        } else {
            None
        }
    }

    /// Ask for a roll.
    ///
    /// The first roll of a turn is a fresh roll; later ones reroll every
    /// unlocked die. On success the request is available from
    /// [`Turn::pending`] for delivery to the renderer.
    pub fn request_roll(&mut self) -> Transition {
        if let Some(reason) = self.roll_blocker() {
            return ignore("request_roll", reason);
        }

        let kind = if self.turn.has_dice() {
            RollKind::Reroll {
                replace: self
                    .turn
                    .dice
                    .iter()
                    .filter(|d| !self.turn.is_locked(d.id))
                    .map(|d| d.id)
                    .collect(),
            }
        } else {
            RollKind::Fresh
        };

        self.next_request += 1;
        let request = RollRequest {
            id: RequestId(self.next_request),
            kind,
        };
        self.turn.rolls_remaining -= 1;
        debug!(
            player = %self.turn.active,
            request = request.id.0,
            rolls_remaining = self.turn.rolls_remaining,
            "roll requested"
        );
        self.turn.pending = Some(request);
        Transition::Applied
    }

    /// Apply a completed roll.
    ///
    /// Locked dice keep their values. A rerolled die returned under its old
    /// id goes back to its own slot; dice with new ids fill the remaining
    /// unlocked slots in tray order. An outcome that does not make a valid roll is
    /// treated as a renderer fault.
    pub fn on_roll_result(&mut self, outcome: RollOutcome) -> Transition {
        let request = match self.turn.pending.take() {
            Some(pending) if pending.id == outcome.request => pending,
            other => {
                self.turn.pending = other;
                return ignore("on_roll_result", IgnoreReason::StaleResult(outcome.request));
            }
        };

        let reroll = matches!(request.kind, RollKind::Reroll { .. });
        match self.merge(&request.kind, outcome.dice) {
            Ok(roll) => {
                self.turn.dice = roll.into_dice();
                debug!(
                    player = %self.turn.active,
                    faces = ?self.turn.faces(),
                    reroll,
                    "roll applied"
                );
                self.log.append(LogEntry::Rolled {
                    player: self.turn.active,
                    faces: self.turn.faces(),
                    reroll,
                    rolls_remaining: self.turn.rolls_remaining,
                    timestamp: Utc::now(),
                });
                Transition::Applied
            }
            Err(e) => {
                // The request is gone, so give the roll back.
                self.turn.rolls_remaining += 1;
                self.on_renderer_error(format!("invalid roll result: {e}"));
                Transition::Ignored(IgnoreReason::MalformedResult)
            }
        }
    }

    fn merge(&self, kind: &RollKind, rolled: Vec<Die>) -> CoreResult<Roll> {
        match kind {
            RollKind::Fresh => Roll::new(rolled),
            RollKind::Reroll { replace } => {
                let open = self
                    .turn
                    .dice
                    .iter()
                    .filter(|d| !self.turn.is_locked(d.id))
                    .count();
                if rolled.len() != open {
                    return Err(CoreError::WrongDiceCount(
                        self.turn.dice.len() - open + rolled.len(),
                    ));
                }
                // Returned ids that were asked for go back to their own slot;
                // fresh ids fill the remaining open slots in tray order.
                let (mut known, fresh): (Vec<Die>, Vec<Die>) =
                    rolled.into_iter().partition(|d| replace.contains(&d.id));
                let mut fresh = fresh.into_iter();
                let merged = self
                    .turn
                    .dice
                    .iter()
                    .filter_map(|die| {
                        if self.turn.is_locked(die.id) {
                            return Some(*die);
                        }
                        match known.iter().position(|d| d.id == die.id) {
                            Some(i) => Some(known.swap_remove(i)),
                            None => fresh.next().or_else(|| known.pop()),
                        }
                    })
                    .collect();
                Roll::new(merged)
            }
        }
    }

    /// Lock or unlock a die for the next reroll.
    pub fn toggle_lock(&mut self, id: DieId) -> Transition {
        if self.is_game_over() {
            return ignore("toggle_lock", IgnoreReason::GameOver);
        }
        if self.turn.pending.is_some() {
            return ignore("toggle_lock", IgnoreReason::RollPending);
        }
        if !self.turn.has_dice() {
            return ignore("toggle_lock", IgnoreReason::NoDice);
        }
        let Some(value) = self.turn.dice.iter().find(|d| d.id == id).map(|d| d.value) else {
            return ignore("toggle_lock", IgnoreReason::UnknownDie(id));
        };

        let locked = if self.turn.locked.remove(&id) {
            false
        } else {
            self.turn.locked.insert(id);
            true
        };
        self.log.append(LogEntry::LockToggled {
            player: self.turn.active,
            die: id,
            value,
            locked,
            timestamp: Utc::now(),
        });
        Transition::Applied
    }

    /// Score the dice on the table in `category` for `player` and end the
    /// turn.
    pub fn select_category(&mut self, category: Category, player: Player) -> Transition {
        if self.is_game_over() {
            return ignore("select_category", IgnoreReason::GameOver);
        }
        if player != self.turn.active {
            return ignore("select_category", IgnoreReason::WrongPlayer(player));
        }
        if self.turn.pending.is_some() {
            return ignore("select_category", IgnoreReason::RollPending);
        }
        if !self.turn.has_dice() {
            return ignore("select_category", IgnoreReason::NoDice);
        }

        let points = yahtzee_core::score_dice(category, &self.turn.dice);
        if self.sheets[player.index()].record(category, points).is_err() {
            return ignore("select_category", IgnoreReason::CellAlreadyScored(category));
        }

        debug!(player = %player, %category, points, "category scored");
        self.log.append(LogEntry::Scored {
            player,
            category,
            points,
            faces: self.turn.faces(),
            timestamp: Utc::now(),
        });
        self.end_turn();
        Transition::Applied
    }

    /// Hand the dice to the other player with a fresh turn.
    fn end_turn(&mut self) {
        let next = self.turn.active.other();
        if next == Player::One {
            self.rounds_completed += 1;
        }
        self.turn = Turn::new(next);

        if self.is_game_over() {
            let totals = [
                self.totals(Player::One).grand,
                self.totals(Player::Two).grand,
            ];
            let winner = match self.leader() {
                Standing::Leader(p) => Some(p),
                Standing::Tie => None,
            };
            info!(p1 = totals[0], p2 = totals[1], "game over");
            self.log.append(LogEntry::GameOver {
                totals,
                winner,
                timestamp: Utc::now(),
            });
        } else {
            self.log.append(LogEntry::TurnPassed {
                to: next,
                rounds_completed: self.rounds_completed,
                timestamp: Utc::now(),
            });
        }
    }

    /// The renderer finished loading or recovered. Ignored once the game
    /// is over.
    pub fn on_renderer_ready(&mut self) -> Transition {
        if self.is_game_over() {
            return ignore("renderer_ready", IgnoreReason::GameOver);
        }
        if !self.renderer.is_ready() {
            debug!("dice renderer ready");
        }
        self.renderer = RendererStatus::Ready;
        Transition::Applied
    }

    /// The renderer failed. An outstanding roll is dropped and refunded;
    /// rolls stay disabled until the renderer reports ready again. A
    /// finished game is left untouched.
    pub fn on_renderer_error(&mut self, message: impl Into<String>) -> Transition {
        if self.is_game_over() {
            return ignore("renderer_error", IgnoreReason::GameOver);
        }
        let message = message.into();
        warn!(%message, "dice renderer failed");
        if self.turn.pending.take().is_some() {
            self.turn.rolls_remaining += 1;
        }
        self.log.append(LogEntry::RendererFault {
            message: message.clone(),
            timestamp: Utc::now(),
        });
        self.renderer = RendererStatus::Failed(message);
        Transition::Applied
    }

    /// Route a renderer event to the matching operation.
    pub fn apply(&mut self, event: RendererEvent) -> Transition {
        match event {
            RendererEvent::Ready => self.on_renderer_ready(),
            RendererEvent::Failed(message) => self.on_renderer_error(message),
            RendererEvent::Rolled(outcome) => self.on_roll_result(outcome),
        }
    }

    /// Subtotals and grand total for a player, computed fresh.
    pub fn totals(&self, player: Player) -> Totals {
        self.sheets[player.index()].totals()
    }

    /// What `category` would score for the active player right now.
    ///
    /// `None` if the cell is filled, nothing is on the table, a roll is in
    /// flight, or the game is over.
    pub fn preview(&self, category: Category) -> Option<u32> {
        if self.is_game_over()
            || self.turn.pending.is_some()
            || !self.turn.has_dice()
            || self.sheet(self.turn.active).is_set(category)
        {
            return None;
        }
        Some(yahtzee_core::score_dice(category, &self.turn.dice))
    }

    /// Who is ahead on grand total.
    pub fn leader(&self) -> Standing {
        let one = self.totals(Player::One).grand;
        let two = self.totals(Player::Two).grand;
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Standing::Leader(Player::One),
            std::cmp::Ordering::Less => Standing::Leader(Player::Two),
            std::cmp::Ordering::Equal => Standing::Tie,
        }
    }

    /// The final result, once the game is over.
    pub fn winner(&self) -> Option<Standing> {
        self.is_game_over().then(|| self.leader())
    }
}

fn ignore(op: &'static str, reason: IgnoreReason) -> Transition {
    debug!(op, ?reason, "ignored");
    Transition::Ignored(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> GameSession {
        ready_with(SessionConfig::default())
    }

    fn ready_with(config: SessionConfig) -> GameSession {
        let mut s = GameSession::new(config);
        s.on_renderer_ready();
        s
    }

    /// Answer the pending request with `faces`, using ids unique per request.
    fn land(s: &mut GameSession, faces: &[u8]) -> Transition {
        let request = s.turn().pending().cloned().expect("a pending roll");
        let dice = faces
            .iter()
            .enumerate()
            .map(|(i, &value)| Die {
                id: DieId((request.id.0 * 10) as u32 + i as u32),
                value,
            })
            .collect();
        s.on_roll_result(RollOutcome {
            request: request.id,
            dice,
        })
    }

    fn roll(s: &mut GameSession, faces: &[u8]) {
        assert_eq!(s.request_roll(), Transition::Applied);
        assert_eq!(land(s, faces), Transition::Applied);
    }

    #[test]
    fn new_session_starts_at_round_zero() {
        let s = ready_session();
        assert_eq!(s.phase(), Phase::AwaitingRoll);
        assert_eq!(s.turn().active_player(), Player::One);
        assert_eq!(s.turn().rolls_remaining(), 3);
        assert_eq!(s.rounds_completed(), 0);
        assert_eq!(s.sheet(Player::One).filled(), 0);
        assert_eq!(s.sheet(Player::Two).filled(), 0);
        assert!(s.log().is_empty());
    }

    #[test]
    fn rolls_refused_until_renderer_ready() {
        let mut s = GameSession::new(SessionConfig::default());
        assert_eq!(
            s.request_roll(),
            Transition::Ignored(IgnoreReason::RendererNotReady)
        );
        assert_eq!(s.turn().rolls_remaining(), 3);
        s.on_renderer_ready();
        assert!(s.request_roll().is_applied());
    }

    #[test]
    fn first_roll_is_fresh() {
        let mut s = ready_session();
        s.request_roll();
        assert_eq!(s.phase(), Phase::Rolling);
        assert_eq!(s.turn().pending().map(|r| &r.kind), Some(&RollKind::Fresh));
        assert_eq!(s.turn().rolls_remaining(), 2);
    }

    #[test]
    fn second_request_while_pending_is_ignored() {
        let mut s = ready_session();
        s.request_roll();
        assert_eq!(s.request_roll(), Transition::Ignored(IgnoreReason::RollPending));
        assert_eq!(s.turn().rolls_remaining(), 2);
        assert_eq!(s.turn().pending().map(|r| r.id), Some(RequestId(1)));
    }

    #[test]
    fn roll_result_shows_dice() {
        let mut s = ready_session();
        roll(&mut s, &[3, 1, 4, 1, 5]);
        assert_eq!(s.phase(), Phase::InProgress);
        assert_eq!(s.turn().faces(), vec![3, 1, 4, 1, 5]);
        assert!(s.turn().pending().is_none());
        assert_eq!(s.log().len(), 1);
    }

    #[test]
    fn rolls_run_out_after_three() {
        let mut s = ready_session();
        roll(&mut s, &[1, 2, 3, 4, 5]);
        roll(&mut s, &[1, 2, 3, 4, 5]);
        roll(&mut s, &[1, 2, 3, 4, 5]);
        assert_eq!(s.turn().rolls_remaining(), 0);
        assert_eq!(s.request_roll(), Transition::Ignored(IgnoreReason::NoRollsLeft));
        assert_eq!(s.turn().rolls_remaining(), 0);
    }

    #[test]
    fn reroll_keeps_locked_dice_by_id() {
        let mut s = ready_session();
        roll(&mut s, &[6, 2, 6, 3, 4]);
        let first = s.turn().dice()[0];
        let third = s.turn().dice()[2];
        assert!(s.toggle_lock(first.id).is_applied());
        assert!(s.toggle_lock(third.id).is_applied());

        assert!(s.request_roll().is_applied());
        let RollKind::Reroll { replace } = &s.turn().pending().unwrap().kind else {
            panic!("expected a reroll");
        };
        assert_eq!(replace.len(), 3);
        assert!(!replace.contains(&first.id));

        assert!(land(&mut s, &[6, 6, 1]).is_applied());
        assert_eq!(s.turn().faces(), vec![6, 6, 6, 6, 1]);
        assert_eq!(s.turn().dice()[0], first);
        assert_eq!(s.turn().dice()[2], third);
        assert!(s.turn().is_locked(first.id));
        assert_eq!(s.turn().rolls_remaining(), 1);
    }

    #[test]
    fn reroll_returned_out_of_order_stays_in_place() {
        let mut s = ready_session();
        roll(&mut s, &[6, 2, 6, 3, 4]);
        let first = s.turn().dice()[0];
        s.toggle_lock(first.id);

        s.request_roll();
        let request = s.turn().pending().cloned().unwrap();
        let RollKind::Reroll { replace } = &request.kind else {
            panic!("expected a reroll");
        };
        // Same ids, reversed, each showing its old position as the face.
        let dice = replace
            .iter()
            .rev()
            .map(|&id| {
                let slot = s.turn().dice().iter().position(|d| d.id == id).unwrap();
                Die {
                    id,
                    value: slot as u8,
                }
            })
            .collect();
        let outcome = RollOutcome {
            request: request.id,
            dice,
        };
        assert!(s.on_roll_result(outcome).is_applied());

        assert_eq!(s.turn().faces(), vec![6, 1, 2, 3, 4]);
        assert_eq!(s.turn().dice()[0], first);
        for (slot, die) in s.turn().dice().iter().enumerate().skip(1) {
            assert_eq!(die.id, replace[slot - 1]);
        }
    }

    #[test]
    fn reroll_with_everything_locked_is_ignored() {
        let mut s = ready_session();
        roll(&mut s, &[5, 5, 5, 5, 5]);
        let ids: Vec<DieId> = s.turn().dice().iter().map(|d| d.id).collect();
        for id in ids {
            s.toggle_lock(id);
        }
        assert_eq!(s.request_roll(), Transition::Ignored(IgnoreReason::AllDiceLocked));
        assert_eq!(s.turn().rolls_remaining(), 2);
    }

    #[test]
    fn toggle_lock_guards() {
        let mut s = ready_session();
        assert_eq!(s.toggle_lock(DieId(1)), Transition::Ignored(IgnoreReason::NoDice));

        s.request_roll();
        assert_eq!(s.toggle_lock(DieId(10)), Transition::Ignored(IgnoreReason::RollPending));

        land(&mut s, &[1, 2, 3, 4, 5]);
        assert_eq!(
            s.toggle_lock(DieId(999)),
            Transition::Ignored(IgnoreReason::UnknownDie(DieId(999)))
        );
    }

    #[test]
    fn toggle_twice_unlocks() {
        let mut s = ready_session();
        roll(&mut s, &[1, 2, 3, 4, 5]);
        let id = s.turn().dice()[1].id;
        s.toggle_lock(id);
        assert!(s.turn().is_locked(id));
        s.toggle_lock(id);
        assert!(!s.turn().is_locked(id));
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut s = ready_session();
        s.request_roll();
        let outcome = RollOutcome {
            request: RequestId(77),
            dice: Vec::new(),
        };
        assert_eq!(
            s.on_roll_result(outcome),
            Transition::Ignored(IgnoreReason::StaleResult(RequestId(77)))
        );
        assert_eq!(s.phase(), Phase::Rolling);
    }

    #[test]
    fn malformed_result_faults_and_refunds() {
        let mut s = ready_session();
        s.request_roll();
        assert_eq!(land(&mut s, &[1, 2, 3, 4]), Transition::Ignored(IgnoreReason::MalformedResult));
        assert_eq!(s.turn().rolls_remaining(), 3);
        assert!(s.turn().pending().is_none());
        assert!(s.renderer_status().error().is_some());
        assert_eq!(s.request_roll(), Transition::Ignored(IgnoreReason::RendererNotReady));
    }

    #[test]
    fn renderer_error_refunds_pending_roll() {
        let mut s = ready_session();
        roll(&mut s, &[1, 2, 3, 4, 5]);
        s.request_roll();
        s.on_renderer_error("WebGL context lost");
        assert_eq!(s.turn().rolls_remaining(), 2);
        assert_eq!(s.phase(), Phase::InProgress);
        assert_eq!(s.renderer_status().error(), Some("WebGL context lost"));

        s.on_renderer_ready();
        assert!(s.request_roll().is_applied());
    }

    #[test]
    fn select_category_guards() {
        let mut s = ready_session();
        assert_eq!(
            s.select_category(Category::Chance, Player::One),
            Transition::Ignored(IgnoreReason::NoDice)
        );
        roll(&mut s, &[1, 2, 3, 4, 5]);
        assert_eq!(
            s.select_category(Category::Chance, Player::Two),
            Transition::Ignored(IgnoreReason::WrongPlayer(Player::Two))
        );
        s.request_roll();
        assert_eq!(
            s.select_category(Category::Chance, Player::One),
            Transition::Ignored(IgnoreReason::RollPending)
        );
        assert_eq!(s.sheet(Player::One).filled(), 0);
    }

    #[test]
    fn yahtzee_commit_passes_turn() {
        let mut s = ready_session();
        roll(&mut s, &[1, 1, 1, 1, 1]);
        let id = s.turn().dice()[0].id;
        s.toggle_lock(id);

        assert!(s.select_category(Category::Yahtzee, Player::One).is_applied());
        assert_eq!(s.sheet(Player::One).get(Category::Yahtzee), Some(50));
        assert_eq!(s.turn().active_player(), Player::Two);
        assert_eq!(s.turn().rolls_remaining(), 3);
        assert!(s.turn().dice().is_empty());
        assert!(s.turn().locked().is_empty());
        assert_eq!(s.phase(), Phase::AwaitingRoll);

        for c in Category::ALL.into_iter().filter(|c| *c != Category::Yahtzee) {
            assert_eq!(s.sheet(Player::One).get(c), None);
        }
        assert_eq!(s.totals(Player::One).grand, 50);
    }

    #[test]
    fn scored_cell_never_changes() {
        let mut s = ready_session();
        roll(&mut s, &[1, 1, 1, 1, 1]);
        s.select_category(Category::Yahtzee, Player::One);
        roll(&mut s, &[2, 3, 4, 5, 6]);
        s.select_category(Category::Chance, Player::Two);

        roll(&mut s, &[3, 3, 3, 3, 2]);
        assert_eq!(
            s.select_category(Category::Yahtzee, Player::One),
            Transition::Ignored(IgnoreReason::CellAlreadyScored(Category::Yahtzee))
        );
        assert_eq!(s.sheet(Player::One).get(Category::Yahtzee), Some(50));
        assert_eq!(s.turn().active_player(), Player::One);
    }

    #[test]
    fn round_advances_when_player_one_returns() {
        let mut s = ready_session();
        roll(&mut s, &[1, 2, 3, 4, 5]);
        s.select_category(Category::Chance, Player::One);
        assert_eq!(s.rounds_completed(), 0);
        roll(&mut s, &[1, 2, 3, 4, 5]);
        s.select_category(Category::Chance, Player::Two);
        assert_eq!(s.rounds_completed(), 1);
        assert_eq!(s.turn().active_player(), Player::One);
    }

    #[test]
    fn preview_only_for_open_cells_with_dice() {
        let mut s = ready_session();
        assert_eq!(s.preview(Category::Chance), None);
        roll(&mut s, &[3, 3, 3, 5, 5]);
        assert_eq!(s.preview(Category::FullHouse), Some(25));
        assert_eq!(s.preview(Category::Threes), Some(9));
        s.select_category(Category::FullHouse, Player::One);
        roll(&mut s, &[3, 3, 3, 5, 5]);
        s.select_category(Category::Chance, Player::Two);
        roll(&mut s, &[3, 3, 3, 5, 5]);
        assert_eq!(s.preview(Category::FullHouse), None);
        assert_eq!(s.preview(Category::Chance), Some(19));
    }

    #[test]
    fn game_ends_at_round_limit() {
        let mut s = ready_with(SessionConfig::default().with_rounds(1));
        roll(&mut s, &[6, 6, 6, 6, 6]);
        s.select_category(Category::Yahtzee, Player::One);
        assert_eq!(s.winner(), None);
        roll(&mut s, &[1, 2, 3, 4, 5]);
        s.select_category(Category::Chance, Player::Two);

        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.winner(), Some(Standing::Leader(Player::One)));
        assert_eq!(s.request_roll(), Transition::Ignored(IgnoreReason::GameOver));
        assert_eq!(
            s.select_category(Category::Aces, Player::One),
            Transition::Ignored(IgnoreReason::GameOver)
        );
        assert!(matches!(
            s.log().last(),
            Some(LogEntry::GameOver {
                winner: Some(Player::One),
                ..
            })
        ));
    }

    fn finished_game() -> GameSession {
        let mut s = ready_with(SessionConfig::default().with_rounds(1));
        roll(&mut s, &[2, 2, 3, 3, 3]);
        s.select_category(Category::FullHouse, Player::One);
        roll(&mut s, &[4, 4, 5, 5, 5]);
        s.select_category(Category::FullHouse, Player::Two);
        s
    }

    #[test]
    fn equal_scores_end_in_a_tie() {
        let s = finished_game();
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.winner(), Some(Standing::Tie));
        assert!(matches!(
            s.log().last(),
            Some(LogEntry::GameOver {
                winner: None,
                totals: [25, 25],
                ..
            })
        ));
    }

    #[test]
    fn renderer_events_after_game_over_are_ignored() {
        let mut s = finished_game();
        let entries = s.log().len();

        assert_eq!(
            s.apply(RendererEvent::Failed("context lost".into())),
            Transition::Ignored(IgnoreReason::GameOver)
        );
        assert_eq!(
            s.apply(RendererEvent::Ready),
            Transition::Ignored(IgnoreReason::GameOver)
        );
        assert_eq!(s.log().len(), entries);
        assert!(matches!(s.log().last(), Some(LogEntry::GameOver { .. })));
        assert!(s.renderer_status().is_ready());
    }

    #[test]
    fn leader_tracks_grand_total() {
        let mut s = ready_session();
        assert_eq!(s.leader(), Standing::Tie);
        roll(&mut s, &[1, 2, 3, 4, 5]);
        s.select_category(Category::Chance, Player::One);
        assert_eq!(s.leader(), Standing::Leader(Player::One));
        roll(&mut s, &[2, 2, 3, 4, 5]);
        s.select_category(Category::Chance, Player::Two);
        assert_eq!(s.leader(), Standing::Leader(Player::Two));
    }
}
