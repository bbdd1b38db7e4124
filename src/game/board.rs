use super::{GameResult, Side};

pub const BOARD_DIM: usize = 3;
pub const BOARD_SIZE: usize = BOARD_DIM * BOARD_DIM;

/// Every row, column and diagonal that wins the game.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Cross,
    Naught,
}

/// Snapshot of all cells, row-major.
pub type BoardState = [Cell; BOARD_SIZE];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is outside the board")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    Occupied(usize),

    #[error("game is already over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: BoardState,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Create a board from an explicit position
    pub fn from_cells(cells: BoardState) -> Self {
        Board { cells }
    }

    /// Copy of the current cells
    pub fn state(&self) -> BoardState {
        self.cells
    }

    /// Get the cell at an index (row * 3 + col)
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// A cell is playable if it is on the board, empty, and the game is still running
    pub fn is_legal(&self, index: usize) -> bool {
        index < BOARD_SIZE
            && self.cells[index] == Cell::Empty
            && self.result() == GameResult::NotFinished
    }

    /// All playable cells in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..BOARD_SIZE).filter(|&i| self.is_legal(i)).collect()
    }

    /// Count of empty cells
    pub fn num_empty(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    pub fn other_side(side: Side) -> Side {
        side.other()
    }

    /// Place a piece for `side`. Returns the new state, the game result after
    /// the move, and whether the game is finished.
    pub fn apply_move(
        &mut self,
        index: usize,
        side: Side,
    ) -> Result<(BoardState, GameResult, bool), MoveError> {
        if index >= BOARD_SIZE {
            return Err(MoveError::OutOfRange(index));
        }
        if self.result().is_finished() {
            return Err(MoveError::GameOver);
        }
        if self.cells[index] != Cell::Empty {
            return Err(MoveError::Occupied(index));
        }

        self.cells[index] = side.to_cell();
        let result = self.result();
        Ok((self.cells, result, result.is_finished()))
    }

    /// Result of the current position
    pub fn result(&self) -> GameResult {
        for line in WIN_LINES.iter() {
            let first = self.cells[line[0]];
            if first != Cell::Empty && line.iter().all(|&i| self.cells[i] == first) {
                return match first {
                    Cell::Cross => GameResult::CrossWin,
                    Cell::Naught => GameResult::NaughtWin,
                    Cell::Empty => unreachable!("empty lines are skipped"),
                };
            }
        }

        if self.num_empty() == 0 {
            GameResult::Draw
        } else {
            GameResult::NotFinished
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_DIM {
            for col in 0..BOARD_DIM {
                let symbol = match self.cells[row * BOARD_DIM + col] {
                    Cell::Empty => '.',
                    Cell::Cross => 'x',
                    Cell::Naught => 'o',
                };
                write!(f, "{symbol}")?;
            }
            if row + 1 < BOARD_DIM {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
