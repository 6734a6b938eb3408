//! A session wired to a dice renderer, plus a line-oriented command front end.
//!
//! `Table` is the thin controller between a display layer and the state
//! machine: it forwards roll requests to the renderer and feeds renderer
//! events back into the session.

use strsim::jaro_winkler;

use yahtzee_core::{Category, Section};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::renderer::{DiceRenderer, RendererStatus};
use crate::session::{GameSession, IgnoreReason, Standing, Transition};
use crate::view::SessionView;

/// Upper bound on renderer ticks spent waiting for a roll in `process`.
const SETTLE_TICKS: u32 = 10_000;

/// Minimum similarity for suggesting a category name.
const SUGGEST_THRESHOLD: f64 = 0.75;

/// A game session and the renderer that rolls for it.
#[derive(Debug)]
pub struct Table<R> {
    session: GameSession,
    renderer: R,
}

impl<R: DiceRenderer> Table<R> {
    /// Seat two players at a new game.
    pub fn new(config: SessionConfig, renderer: R) -> Self {
        Self {
            session: GameSession::new(config),
            renderer,
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Mutable access to the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Display snapshot.
    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    /// Request a roll and hand it to the renderer.
    pub fn roll(&mut self) -> Transition {
        let transition = self.session.request_roll();
        if let (Transition::Applied, Some(request)) =
            (&transition, self.session.turn().pending().cloned())
        {
            self.renderer.submit(request);
        }
        transition
    }

    /// Toggle the lock on the die at a 0-based tray position.
    pub fn toggle_lock_at(&mut self, position: usize) -> Transition {
        match self.session.turn().dice().get(position) {
            Some(die) => {
                let id = die.id;
                self.session.toggle_lock(id)
            }
            None => Transition::Ignored(IgnoreReason::NoDice),
        }
    }

    /// Score a category for the active player.
    pub fn score(&mut self, category: Category) -> Transition {
        let player = self.session.turn().active_player();
        self.session.select_category(category, player)
    }

    /// Deliver every renderer event that is due. Returns how many were
    /// applied or ignored.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.renderer.poll() {
            self.session.apply(event);
            delivered += 1;
        }
        delivered
    }

    /// Pump until no roll is outstanding and the renderer has started, or
    /// `max_ticks` pass. Returns whether the table settled.
    pub fn settle(&mut self, max_ticks: u32) -> bool {
        for _ in 0..max_ticks {
            self.pump();
            if self.is_settled() {
                return true;
            }
        }
        self.is_settled()
    }

    /// Whether no roll is in flight and the renderer has finished starting.
    pub fn is_settled(&self) -> bool {
        self.session.turn().pending().is_none()
            && *self.session.renderer_status() != RendererStatus::Initializing
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "roll" | "r" => self.do_roll(),
            "lock" | "l" => self.do_lock(rest),
            "score" | "s" => self.do_score(rest),
            "dice" => Ok(self.describe_dice()),
            "sheet" | "card" => Ok(self.render_card()),
            "status" => Ok(self.do_status()),
            "view" => Ok(serde_json::to_string_pretty(&self.view())?),
            "log" => self.do_log(rest),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(SessionError::UnknownCommand(cmd)),
        }
    }

    fn do_roll(&mut self) -> SessionResult<String> {
        self.settle(SETTLE_TICKS);
        if let Transition::Ignored(reason) = self.roll() {
            return match self.session.renderer_status() {
                RendererStatus::Failed(msg) => Err(SessionError::Renderer(msg.clone())),
                _ => Ok(reason.to_string()),
            };
        }
        self.settle(SETTLE_TICKS);
        if let Some(msg) = self.session.renderer_status().error() {
            return Err(SessionError::Renderer(msg.to_string()));
        }
        Ok(self.describe_dice())
    }

    fn do_lock(&mut self, rest: &str) -> SessionResult<String> {
        if rest.is_empty() {
            return Err(SessionError::InvalidArgument(
                "usage: lock <position> [position...]".to_string(),
            ));
        }
        let positions = rest
            .split_whitespace()
            .map(|p| match p.parse::<usize>() {
                Ok(n @ 1..=5) => Ok(n - 1),
                _ => Err(SessionError::InvalidArgument(format!(
                    "die position must be 1-5, got '{p}'"
                ))),
            })
            .collect::<SessionResult<Vec<_>>>()?;

        for position in positions {
            if let Transition::Ignored(reason) = self.toggle_lock_at(position) {
                return Ok(reason.to_string());
            }
        }
        Ok(self.describe_dice())
    }

    fn do_score(&mut self, rest: &str) -> SessionResult<String> {
        let category = Category::from_label(rest).ok_or_else(|| SessionError::UnknownCategory {
            input: rest.to_string(),
            suggestion: suggest_category(rest).map(|c| c.label().to_string()),
        })?;

        let player = self.session.turn().active_player();
        let points = yahtzee_core::score_dice(category, self.session.turn().dice());
        if let Transition::Ignored(reason) = self.score(category) {
            return Ok(reason.to_string());
        }

        let mut out = format!("{player} scored {points} in {category}.");
        match self.session.winner() {
            Some(Standing::Leader(p)) => out.push_str(&format!("\nGame over! {p} wins.")),
            Some(Standing::Tie) => out.push_str("\nGame over! It's a tie."),
            None => out.push_str(&format!(
                "\n{}'s turn.",
                self.session.turn().active_player()
            )),
        }
        Ok(out)
    }

    fn do_status(&self) -> String {
        let v = self.view();
        let mut out = if v.winner.is_some() {
            "Game over.\n".to_string()
        } else {
            format!(
                "Round {}/{} | {} to play | Rolls left: {}\n",
                v.round, v.rounds, v.active_player, v.rolls_remaining
            )
        };
        out.push_str(&format!(
            "Player 1: {} | Player 2: {}\n",
            v.totals[0].grand, v.totals[1].grand
        ));
        match v.leader {
            Standing::Leader(p) => out.push_str(&format!("Leader: {p}")),
            Standing::Tie => out.push_str("Leader: tied"),
        }
        if let Some(err) = v.error() {
            out.push_str(&format!("\nDice error: {err}"));
        }
        out
    }

    fn do_log(&self, format: &str) -> SessionResult<String> {
        match format.to_lowercase().as_str() {
            "" | "text" | "txt" => Ok(self.session.log().export_text()),
            "markdown" | "md" => Ok(self.session.log().export_markdown()),
            other => Err(SessionError::InvalidArgument(format!(
                "unknown log format '{other}' (use text or markdown)"
            ))),
        }
    }

    /// One line showing the tray, locked dice in brackets.
    pub fn describe_dice(&self) -> String {
        let turn = self.session.turn();
        if !turn.has_dice() {
            return format!("No dice rolled. Rolls left: {}", turn.rolls_remaining());
        }
        let dice: Vec<String> = turn
            .dice()
            .iter()
            .map(|d| {
                if turn.is_locked(d.id) {
                    format!("[{}]", d.value)
                } else {
                    format!(" {} ", d.value)
                }
            })
            .collect();
        format!(
            "Dice:{} | Rolls left: {}",
            dice.join(""),
            turn.rolls_remaining()
        )
    }

    /// Plain-text score card with previews in parentheses.
    pub fn render_card(&self) -> String {
        let v = self.view();
        let mut out = format!("{:<20}{:>10}{:>10}\n", "", "Player 1", "Player 2");

        let cell = |score: Option<u32>, preview: Option<u32>| match (score, preview) {
            (Some(s), _) => s.to_string(),
            (None, Some(p)) => format!("({p})"),
            (None, None) => "-".to_string(),
        };

        for section in [Section::Upper, Section::Lower] {
            for row in v.section(section) {
                out.push_str(&format!(
                    "{:<20}{:>10}{:>10}\n",
                    row.label,
                    cell(row.cells[0].score, row.cells[0].preview),
                    cell(row.cells[1].score, row.cells[1].preview),
                ));
            }
            let subtotals: Vec<(&str, [u32; 2])> = match section {
                Section::Upper => vec![
                    ("Upper Total", v.totals.map(|t| t.upper)),
                    ("Bonus (>=63)", v.totals.map(|t| t.bonus)),
                    ("Upper Section Total", v.totals.map(|t| t.upper_with_bonus())),
                ],
                Section::Lower => vec![
                    ("Lower Total", v.totals.map(|t| t.lower)),
                    ("GRAND TOTAL", v.totals.map(|t| t.grand)),
                ],
            };
            for (label, [one, two]) in subtotals {
                out.push_str(&format!("{label:<20}{one:>10}{two:>10}\n"));
            }
        }
        out.trim_end().to_string()
    }
}

/// The category label closest to `input`, if any is close enough.
pub fn suggest_category(input: &str) -> Option<Category> {
    let input = input.to_lowercase();
    Category::ALL
        .into_iter()
        .map(|c| (c, jaro_winkler(&input, &c.label().to_lowercase())))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c)
}

const HELP: &str = "\
Commands:
  roll                      Roll (first roll) or reroll unlocked dice
  lock <pos> [pos...]       Toggle lock on dice at positions 1-5
  score <category>          Score the dice in a category and end the turn
  dice                      Show the dice
  sheet                     Show the score card, previews in parentheses
  status                    Round, active player, totals, and leader
  view                      Dump the display view as JSON
  log [text|markdown]       Show the game log
  quit                      Leave the table

Categories: Aces, Twos, Threes, Fours, Fives, Sixes, Three of a Kind,
  Four of a Kind, Full House, Small Straight, Large Straight, Yahtzee, Chance";

impl Table<crate::renderer::RandomRenderer> {
    /// A table rolling fair dice seeded from the config.
    pub fn with_random_dice(config: SessionConfig) -> Self {
        let renderer = crate::renderer::RandomRenderer::new(config.seed);
        Self::new(config, renderer)
    }
}
