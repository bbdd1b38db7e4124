use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::AgentError;
use crate::game::{Board, GameResult, Side};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal cells.
pub struct RandomAgent {
    side: Side,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            side: Side::Cross,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            side: Side::Cross,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn new_game(&mut self, side: Side) {
        self.side = side;
    }

    fn make_move(&mut self, board: &mut Board) -> Result<(GameResult, bool), AgentError> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(AgentError::NoLegalMove);
        }
        let cell = legal[self.rng.random_range(0..legal.len())];
        let (_, result, finished) = board.apply_move(cell, self.side)?;
        Ok((result, finished))
    }
}
