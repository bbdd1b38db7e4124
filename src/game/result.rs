use super::Side;

/// Outcome signal delivered to players when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    NotFinished,
    CrossWin,
    NaughtWin,
    Draw,
}

impl GameResult {
    /// Result for a win by `side`
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::Cross => GameResult::CrossWin,
            Side::Naught => GameResult::NaughtWin,
        }
    }

    /// Winning side, if any
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::CrossWin => Some(Side::Cross),
            GameResult::NaughtWin => Some(Side::Naught),
            GameResult::NotFinished | GameResult::Draw => None,
        }
    }

    pub fn is_finished(self) -> bool {
        self != GameResult::NotFinished
    }
}
