use crate::error::AgentError;
use crate::game::{Board, GameResult, Side};

use super::agent::Agent;

/// Score of a win reached immediately; each extra ply costs one point so the
/// search prefers quick wins and slow losses.
const WIN_SCORE: i32 = 10;

/// Deterministic full-depth negamax agent with alpha-beta pruning.
///
/// Among equally scored moves the lowest cell index is played.
pub struct MinMaxAgent {
    side: Side,
}

impl MinMaxAgent {
    pub fn new() -> Self {
        MinMaxAgent { side: Side::Cross }
    }

    /// Best cell for `side` on `board`, if any cell is playable.
    pub fn best_move(board: &Board, side: Side) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        let mut alpha = -WIN_SCORE - 1;
        let beta = WIN_SCORE + 1;

        for cell in board.legal_moves() {
            let mut child = *board;
            if child.apply_move(cell, side).is_err() {
                continue;
            }
            let score = -Self::negamax(&child, side.other(), 1, -beta, -alpha);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => {
                    best = Some((cell, score));
                    alpha = alpha.max(score);
                }
            }
        }

        best.map(|(cell, _)| cell)
    }

    fn negamax(board: &Board, to_move: Side, depth: i32, mut alpha: i32, beta: i32) -> i32 {
        match board.result() {
            // The side that just moved won, which is a loss for `to_move`.
            GameResult::CrossWin | GameResult::NaughtWin => return -(WIN_SCORE - depth),
            GameResult::Draw => return 0,
            GameResult::NotFinished => {}
        }

        let mut best = -WIN_SCORE - 1;
        for cell in board.legal_moves() {
            let mut child = *board;
            if child.apply_move(cell, to_move).is_err() {
                continue;
            }
            let score = -Self::negamax(&child, to_move.other(), depth + 1, -beta, -alpha);
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        best
    }
}

impl Default for MinMaxAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for MinMaxAgent {
    fn name(&self) -> &str {
        "MinMax"
    }

    fn new_game(&mut self, side: Side) {
        self.side = side;
    }

    fn make_move(&mut self, board: &mut Board) -> Result<(GameResult, bool), AgentError> {
        let cell = Self::best_move(board, self.side).ok_or(AgentError::NoLegalMove)?;
        let (_, result, finished) = board.apply_move(cell, self.side)?;
        Ok((result, finished))
    }
}
