//! Terminal UI for a two-player Yahtzee game.
//!
//! Draws the shared score card next to the dice tray and drives a
//! [`Table`](yahtzee_session::Table) from keyboard input. The dice renderer
//! is pumped once per frame tick, so renderer latency shows up as dice that
//! are still rolling.

pub mod app;
pub mod panels;
pub mod shared;
pub mod terminal;
