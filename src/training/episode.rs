use crate::ai::Agent;
use crate::error::AgentError;
use crate::game::{Board, GameResult, Side};

/// What happened in one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub result: GameResult,
    pub game_length: usize,
}

/// Play one game on a fresh board. Cross moves first; both agents are told
/// their side up front and receive the final result at the end.
pub fn play_game(cross: &mut dyn Agent, naught: &mut dyn Agent) -> Result<GameRecord, AgentError> {
    let mut board = Board::new();
    cross.new_game(Side::Cross);
    naught.new_game(Side::Naught);

    let mut turn = Side::Cross;
    let mut game_length = 0;
    let result = loop {
        let mover: &mut dyn Agent = match turn {
            Side::Cross => &mut *cross,
            Side::Naught => &mut *naught,
        };
        let (result, finished) = mover.make_move(&mut board)?;
        game_length += 1;
        if finished {
            break result;
        }
        turn = Board::other_side(turn);
    };

    tracing::trace!(?result, game_length, "game finished\n{}", board);

    cross.final_result(result)?;
    naught.final_result(result)?;

    Ok(GameRecord { result, game_length })
}

/// Play one game with `agent` on `side` against `opponent`.
pub fn play_as(
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    side: Side,
) -> Result<GameRecord, AgentError> {
    match side {
        Side::Cross => play_game(agent, opponent),
        Side::Naught => play_game(opponent, agent),
    }
}
