pub mod play;
pub mod score;
pub mod tui;

use yahtzee_session::{FULL_GAME_ROUNDS, SessionConfig};

/// Build a session config, rejecting round counts outside a full game.
fn session_config(seed: u64, rounds: u32) -> Result<SessionConfig, String> {
    if !(1..=FULL_GAME_ROUNDS).contains(&rounds) {
        return Err(format!(
            "rounds must be between 1 and {FULL_GAME_ROUNDS}, got {rounds}"
        ));
    }
    Ok(SessionConfig::default()
        .with_seed(seed)
        .with_rounds(rounds))
}
