use crate::ai::algorithms::NnQAgent;
use crate::ai::value_function::ActionValueFunction;
use crate::ai::Agent;
use crate::error::AgentError;
use crate::game::Side;
use crate::training::episode::play_as;
use crate::training::metrics::{EpisodeResult, Outcome, TrainingMetrics};

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_games: usize,
    pub log_interval: usize,
    pub eval_games: usize,
    /// Switch the learner between Cross and Naught every game.
    pub alternate_sides: bool,
    pub metrics_window: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_games: 10_000,
            log_interval: 500,
            eval_games: 100,
            alternate_sides: true,
            metrics_window: 500,
        }
    }
}

/// Win/draw/loss counts from an evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalSummary {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl EvalSummary {
    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> f32 {
        if self.games() == 0 {
            return 0.0;
        }
        self.wins as f32 / self.games() as f32
    }

    pub fn loss_rate(&self) -> f32 {
        if self.games() == 0 {
            return 0.0;
        }
        self.losses as f32 / self.games() as f32
    }
}

/// Runs many games of a learning agent against an opponent.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn learner_side(&self, game_idx: usize) -> Side {
        if self.config.alternate_sides && game_idx % 2 == 1 {
            Side::Naught
        } else {
            Side::Cross
        }
    }

    /// Run the full training loop.
    pub fn train<V: ActionValueFunction>(
        &self,
        agent: &mut NnQAgent<V>,
        opponent: &mut dyn Agent,
    ) -> Result<TrainingMetrics, AgentError> {
        let mut metrics = TrainingMetrics::with_capacity(self.config.metrics_window);
        let window = self.config.metrics_window;

        tracing::info!(
            games = self.config.num_games,
            learner = agent.name(),
            opponent = opponent.name(),
            "starting training"
        );

        for game_idx in 0..self.config.num_games {
            let side = self.learner_side(game_idx);
            let record = play_as(&mut *agent, &mut *opponent, side)?;

            if let Some(loss) = agent.last_loss() {
                metrics.record_update(loss);
            }
            if let Some(result) = EpisodeResult::from_record(&record, side) {
                metrics.record_episode(result);
            }

            let episode = game_idx + 1;
            if self.config.log_interval > 0 && episode % self.config.log_interval == 0 {
                tracing::info!(
                    episode,
                    total = self.config.num_games,
                    random_move_prob = agent.random_move_prob(),
                    loss = metrics.average_loss(window),
                    win_rate = metrics.win_rate(window),
                    draw_rate = metrics.draw_rate(window),
                    loss_rate = metrics.loss_rate(window),
                    avg_len = metrics.average_game_length(window),
                    "training progress"
                );
            }
        }

        let (wins, draws, losses) = metrics.totals();
        tracing::info!(
            episodes = metrics.total_episodes(),
            wins,
            draws,
            losses,
            "training complete"
        );

        Ok(metrics)
    }

    /// Play `games` greedy games without learning. Exploration rate and
    /// training mode are restored afterwards.
    pub fn evaluate<V: ActionValueFunction>(
        &self,
        agent: &mut NnQAgent<V>,
        opponent: &mut dyn Agent,
        games: usize,
    ) -> Result<EvalSummary, AgentError> {
        let saved_prob = agent.random_move_prob();
        let saved_training = agent.is_training();
        agent.set_training(false);

        let mut summary = EvalSummary::default();
        let mut outcome: Result<(), AgentError> = Ok(());
        for game_idx in 0..games {
            let side = self.learner_side(game_idx);
            match play_as(&mut *agent, &mut *opponent, side) {
                Ok(record) => match EpisodeResult::from_record(&record, side).map(|r| r.outcome) {
                    Some(Outcome::Win) => summary.wins += 1,
                    Some(Outcome::Draw) => summary.draws += 1,
                    Some(Outcome::Loss) => summary.losses += 1,
                    None => {}
                },
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }

        agent.set_training(saved_training);
        agent.set_random_move_prob(saved_prob);
        outcome?;

        tracing::info!(
            opponent = opponent.name(),
            wins = summary.wins,
            draws = summary.draws,
            losses = summary.losses,
            "evaluation finished"
        );
        Ok(summary)
    }
}
