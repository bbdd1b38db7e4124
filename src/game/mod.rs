//! Tic-tac-toe game logic: board representation, sides, and game results.

mod board;
mod result;
mod side;

pub use board::{Board, BoardState, Cell, MoveError, BOARD_DIM, BOARD_SIZE};
pub use result::GameResult;
pub use side::Side;
