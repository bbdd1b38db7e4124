use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::ai::agent::Agent;
use crate::ai::state_encoding::encode_board;
use crate::ai::value_function::ActionValueFunction;
use crate::error::AgentError;
use crate::game::{Board, BoardState, GameResult, Side, BOARD_SIZE};

/// Per-cell vector over the fixed board.
pub type CellValues = [f32; BOARD_SIZE];

/// Neural Q-learning hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NnqConfig {
    pub reward_discount: f32,
    pub random_move_prob: f32,
    pub random_move_decay: f32,
    pub win_value: f32,
    pub draw_value: f32,
    pub loss_value: f32,
    pub training: bool,
    pub seed: Option<u64>,
}

impl Default for NnqConfig {
    fn default() -> Self {
        NnqConfig {
            reward_discount: 0.8,
            random_move_prob: 0.1,
            random_move_decay: 0.95,
            win_value: 1.0,
            draw_value: 0.6,
            loss_value: 0.0,
            training: true,
            seed: None,
        }
    }
}

/// Everything the agent observed during one game, one entry per own move.
///
/// `next_max_log[i]` holds the bootstrap value for step `i`: the best masked
/// value seen at step `i + 1`, or the final reward for the last step. It trails
/// the other logs by one entry until the game ends.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    board_log: Vec<BoardState>,
    action_log: Vec<usize>,
    next_max_log: Vec<f32>,
    values_log: Vec<CellValues>,
}

impl Trajectory {
    pub fn board_log(&self) -> &[BoardState] {
        &self.board_log
    }

    pub fn action_log(&self) -> &[usize] {
        &self.action_log
    }

    pub fn next_max_log(&self) -> &[f32] {
        &self.next_max_log
    }

    pub fn values_log(&self) -> &[CellValues] {
        &self.values_log
    }

    /// Number of moves recorded.
    pub fn len(&self) -> usize {
        self.action_log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.action_log.is_empty()
    }

    fn clear(&mut self) {
        self.board_log.clear();
        self.action_log.clear();
        self.next_max_log.clear();
        self.values_log.clear();
    }

    /// Training targets in chronological order. Each target is the observed
    /// value vector with the taken action replaced by the discounted bootstrap.
    pub fn calculate_targets(&self, reward_discount: f32) -> Vec<CellValues> {
        let game_length = self.action_log.len();
        let mut targets = Vec::with_capacity(game_length);

        for i in (0..game_length).rev() {
            let mut target = self.values_log[i];
            target[self.action_log[i]] = reward_discount * self.next_max_log[i];
            targets.push(target);
        }

        targets.reverse();
        targets
    }
}

/// Zero the probability and value of every cell that is not playable.
pub fn mask_illegal(board: &Board, probs: &mut CellValues, values: &mut CellValues) {
    for index in 0..BOARD_SIZE {
        if !board.is_legal(index) {
            probs[index] = 0.0;
            values[index] = 0.0;
        }
    }
}

/// Rescale probabilities to sum to one over legal cells. Falls back to a
/// uniform distribution when no probability mass is left on legal cells.
pub fn renormalize(board: &Board, probs: &mut CellValues) {
    let total: f32 = probs.iter().sum();
    if total > 0.0 {
        for p in probs.iter_mut() {
            *p /= total;
        }
        return;
    }

    let legal = board.legal_moves();
    for (index, p) in probs.iter_mut().enumerate() {
        *p = if legal.contains(&index) {
            1.0 / legal.len() as f32
        } else {
            0.0
        };
    }
}

/// Legal cell with the highest value; ties go to the lowest index.
pub fn greedy_cell(board: &Board, values: &CellValues) -> Option<usize> {
    let mut best: Option<usize> = None;
    for index in 0..BOARD_SIZE {
        if !board.is_legal(index) {
            continue;
        }
        match best {
            Some(b) if values[index] <= values[b] => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Sample a cell from a categorical distribution defined by probs.
fn sample_categorical(probs: &CellValues, rng: &mut StdRng) -> Option<usize> {
    let r: f32 = rng.random_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        cumulative += p;
        if p > 0.0 && r < cumulative {
            return Some(i);
        }
    }
    // rounding left r above the total, use the last cell with mass
    probs.iter().rposition(|&p| p > 0.0)
}

fn to_cell_values(values: &[f32]) -> Result<CellValues, AgentError> {
    values.try_into().map_err(|_| AgentError::BoardSizeMismatch {
        expected: BOARD_SIZE,
        actual: values.len(),
    })
}

/// Tic-tac-toe agent that learns action values by temporal-difference updates
/// on a neural approximator, one batched update per finished game.
pub struct NnQAgent<V> {
    name: String,
    value_function: V,
    config: NnqConfig,
    side: Option<Side>,
    trajectory: Trajectory,
    random_move_prob: f32,
    games_completed: usize,
    last_loss: Option<f32>,
    rng: StdRng,
}

impl<V: ActionValueFunction> NnQAgent<V> {
    pub fn new(name: impl Into<String>, value_function: V, config: NnqConfig) -> Result<Self, AgentError> {
        if value_function.board_size() != BOARD_SIZE {
            return Err(AgentError::BoardSizeMismatch {
                expected: BOARD_SIZE,
                actual: value_function.board_size(),
            });
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(NnQAgent {
            name: name.into(),
            value_function,
            random_move_prob: config.random_move_prob,
            config,
            side: None,
            trajectory: Trajectory::default(),
            games_completed: 0,
            last_loss: None,
            rng,
        })
    }

    pub fn random_move_prob(&self) -> f32 {
        self.random_move_prob
    }

    /// Set the exploration rate directly (e.g. 0.0 for pure greedy play).
    pub fn set_random_move_prob(&mut self, prob: f32) {
        self.random_move_prob = prob;
    }

    pub fn is_training(&self) -> bool {
        self.config.training
    }

    pub fn set_training(&mut self, training: bool) {
        self.config.training = training;
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn games_completed(&self) -> usize {
        self.games_completed
    }

    /// Loss reported by the most recent update, if any.
    pub fn last_loss(&self) -> Option<f32> {
        self.last_loss
    }

    /// Trajectory of the current game, or of the last finished one until the
    /// next `new_game`.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn value_function(&self) -> &V {
        &self.value_function
    }

    pub fn config(&self) -> &NnqConfig {
        &self.config
    }

    /// Reward for `result` from `side`'s point of view.
    fn reward(&self, result: GameResult, side: Side) -> Result<f32, AgentError> {
        match (result, result.winner()) {
            (GameResult::Draw, _) => Ok(self.config.draw_value),
            (_, Some(winner)) if winner == side => Ok(self.config.win_value),
            (_, Some(_)) => Ok(self.config.loss_value),
            (other, None) => Err(AgentError::UnexpectedResult(other)),
        }
    }

    /// Encode, evaluate and mask one position. Returns (probs, values).
    fn masked_evaluation(&self, board: &Board, side: Side) -> Result<(CellValues, CellValues), AgentError> {
        let input = encode_board(&board.state(), side);
        let evaluation = self.value_function.evaluate(&input)?;
        let mut probs = to_cell_values(&evaluation.probabilities)?;
        let mut values = to_cell_values(&evaluation.action_values)?;
        mask_illegal(board, &mut probs, &mut values);
        Ok((probs, values))
    }

    fn select_cell(&mut self, board: &Board, probs: &CellValues, values: &CellValues) -> Option<usize> {
        if self.config.training && self.rng.random_range(0.0..1.0) < self.random_move_prob {
            sample_categorical(probs, &mut self.rng)
        } else {
            greedy_cell(board, values)
        }
    }

    fn train_on_trajectory(&mut self, side: Side) -> Result<(), AgentError> {
        let targets: Vec<Vec<f32>> = self
            .trajectory
            .calculate_targets(self.config.reward_discount)
            .iter()
            .map(|t| t.to_vec())
            .collect();
        let inputs: Vec<Vec<f32>> = self
            .trajectory
            .board_log
            .iter()
            .map(|state| encode_board(state, side).to_vec())
            .collect();

        let loss = self.value_function.update(&inputs, &targets)?;
        tracing::debug!(agent = %self.name, loss, steps = inputs.len(), "value function updated");
        self.last_loss = Some(loss);
        Ok(())
    }
}

impl<V: ActionValueFunction> Agent for NnQAgent<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self, side: Side) {
        self.side = Some(side);
        self.trajectory.clear();
    }

    fn make_move(&mut self, board: &mut Board) -> Result<(GameResult, bool), AgentError> {
        let side = self.side.ok_or(AgentError::NoActiveGame)?;
        if board.legal_moves().is_empty() {
            return Err(AgentError::NoLegalMove);
        }

        let state = board.state();
        let (mut probs, values) = self.masked_evaluation(board, side)?;

        renormalize(board, &mut probs);
        let cell = self
            .select_cell(board, &probs, &values)
            .ok_or(AgentError::NoLegalMove)?;
        let (_, result, finished) = board.apply_move(cell, side)?;

        // Commit the step only once the move is on the board.
        // The best value here is the bootstrap for the previous decision.
        if !self.trajectory.action_log.is_empty() {
            let next_max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            self.trajectory.next_max_log.push(next_max);
        }
        self.trajectory.board_log.push(state);
        self.trajectory.values_log.push(values);
        self.trajectory.action_log.push(cell);

        Ok((result, finished))
    }

    /// Ends the game even when the update fails: the reward is logged, the
    /// exploration rate decays and the agent goes back to idle before the
    /// update error is returned.
    fn final_result(&mut self, result: GameResult) -> Result<(), AgentError> {
        let side = self.side.ok_or(AgentError::NoActiveGame)?;
        let reward = self.reward(result, side)?;

        self.trajectory.next_max_log.push(reward);
        self.random_move_prob *= self.config.random_move_decay;
        self.games_completed += 1;
        self.side = None;

        if self.config.training && !self.trajectory.is_empty() {
            self.train_on_trajectory(side)?;
        }
        Ok(())
    }
}
