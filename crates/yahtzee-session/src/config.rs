//! Configuration for a game session.

/// Rolls each player gets per turn.
pub const ROLLS_PER_TURN: u8 = 3;

/// Rounds in a full game: one per category.
pub const FULL_GAME_ROUNDS: u32 = 13;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for the built-in dice renderer.
    pub seed: u64,
    /// Rounds to play before the game ends (1-13).
    pub rounds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rounds: FULL_GAME_ROUNDS,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the round limit (clamped to 1-13).
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds.clamp(1, FULL_GAME_ROUNDS);
        self
    }
}
