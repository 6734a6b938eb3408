//! Top-level application state: the table, cursors, and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use yahtzee_core::{Category, DICE_PER_ROLL};
use yahtzee_session::{RandomRenderer, SessionConfig, Table, Transition};

use crate::shared::StatusMessage;

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The score card.
    Card,
    /// The dice tray.
    Dice,
}

impl Focus {
    /// The other panel.
    pub fn toggle(self) -> Self {
        match self {
            Self::Card => Self::Dice,
            Self::Dice => Self::Card,
        }
    }
}

/// Main application state for the TUI.
pub struct TuiApp {
    /// The game and its dice renderer.
    pub table: Table<RandomRenderer>,
    /// Panel with keyboard focus.
    pub focus: Focus,
    /// Selected row on the score card, as an index into [`Category::ALL`].
    pub card_cursor: usize,
    /// Selected die in the tray.
    pub dice_cursor: usize,
    /// Message shown in the status bar.
    pub message: Option<StatusMessage>,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl TuiApp {
    /// Create a new app. The dice renderer takes `latency` ticks to start
    /// and to land each roll.
    pub fn new(config: SessionConfig, latency: u32) -> Self {
        let renderer = RandomRenderer::with_latency(config.seed, latency, latency);
        Self {
            table: Table::new(config, renderer),
            focus: Focus::Card,
            card_cursor: 0,
            dice_cursor: 0,
            message: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// The category under the card cursor.
    pub fn selected_category(&self) -> Category {
        Category::ALL[self.card_cursor.min(Category::ALL.len() - 1)]
    }

    /// Advance the dice renderer by one tick.
    pub fn tick(&mut self) {
        if self.table.pump() > 0
            && let Some(error) = self.table.session().renderer_status().error()
        {
            self.message = Some(StatusMessage::error(format!("Dice error: {error}")));
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.toggle(),
            KeyCode::Char('r') => self.roll(),
            KeyCode::Char(c @ '1'..='5') => {
                let position = c as usize - '1' as usize;
                self.toggle_lock(position);
            }
            _ => match self.focus {
                Focus::Card => self.handle_card_key(key.code),
                Focus::Dice => self.handle_dice_key(key.code),
            },
        }
    }

    fn handle_card_key(&mut self, code: KeyCode) {
        let last = Category::ALL.len() - 1;
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.card_cursor = (self.card_cursor + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.card_cursor = self.card_cursor.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.card_cursor = 0,
            KeyCode::Char('G') | KeyCode::End => self.card_cursor = last,
            KeyCode::Enter | KeyCode::Char('s') => self.score(),
            KeyCode::Char(' ') => self.roll(),
            _ => {}
        }
    }

    fn handle_dice_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('l') | KeyCode::Right => {
                self.dice_cursor = (self.dice_cursor + 1).min(DICE_PER_ROLL - 1);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.dice_cursor = self.dice_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_lock(self.dice_cursor),
            _ => {}
        }
    }

    fn roll(&mut self) {
        let transition = self.table.roll();
        self.report(transition, Some(StatusMessage::info("Rolling...")));
    }

    fn toggle_lock(&mut self, position: usize) {
        let transition = self.table.toggle_lock_at(position);
        self.report(transition, None);
    }

    fn score(&mut self) {
        let category = self.selected_category();
        let session = self.table.session();
        let player = session.turn().active_player();
        let points = session.preview(category).unwrap_or(0);
        let transition = self.table.score(category);
        self.report(
            transition,
            Some(StatusMessage::info(format!(
                "{player} scored {points} in {category}"
            ))),
        );
    }

    /// Show `applied` if the transition went through, or the reason it was
    /// ignored.
    fn report(&mut self, transition: Transition, applied: Option<StatusMessage>) {
        self.message = match transition {
            Transition::Applied => applied,
            Transition::Ignored(reason) => {
                debug!(%reason, "input ignored");
                Some(StatusMessage::warning(reason.to_string()))
            }
        };
    }
}
