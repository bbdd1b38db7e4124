use crate::error::AgentError;
use crate::game::{Board, GameResult, Side};

/// Universal interface for everything that can sit at the board.
///
/// A driver calls `new_game` once per game, `make_move` on each of the
/// agent's turns, and `final_result` once the game has ended.
pub trait Agent {
    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Start a new game playing as `side`.
    fn new_game(&mut self, side: Side);

    /// Place one piece on `board`. Returns the result after the move and
    /// whether the game is finished.
    fn make_move(&mut self, board: &mut Board) -> Result<(GameResult, bool), AgentError>;

    /// Receive the final result of the game.
    fn final_result(&mut self, _result: GameResult) -> Result<(), AgentError> {
        Ok(())
    }
}
