//! Launch the terminal UI.

use yahtzee_tui::app::TuiApp;

/// Run a game in the terminal UI until the player quits.
pub fn run(seed: u64, rounds: u32, latency: u32) -> Result<(), String> {
    let config = super::session_config(seed, rounds)?;
    yahtzee_tui::terminal::run(TuiApp::new(config, latency))
}
