//! Two-player Yahtzee session.
//!
//! [`GameSession`] owns turn order, the roll budget, die locks, the
//! outstanding roll request, and both score sheets. Dice come from a
//! [`DiceRenderer`] and results are matched to requests by id. [`Table`]
//! pairs a session with a renderer and adds a small text command language
//! used by the CLI.

pub mod config;
pub mod error;
pub mod log;
pub mod player;
pub mod renderer;
pub mod session;
pub mod table;
pub mod view;

pub use config::{FULL_GAME_ROUNDS, ROLLS_PER_TURN, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use log::{GameLog, LogEntry};
pub use player::Player;
pub use renderer::{
    DiceRenderer, RandomRenderer, RendererEvent, RendererStatus, RequestId, RollKind, RollOutcome,
    RollRequest, ScriptedRenderer,
};
pub use session::{GameSession, IgnoreReason, Phase, Standing, Transition, Turn};
pub use table::{Table, suggest_category};
pub use view::{CellView, DieView, RowView, SessionView};
