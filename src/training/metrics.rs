use std::collections::VecDeque;

use crate::game::{GameResult, Side};
use crate::training::episode::GameRecord;

/// How a finished game went for the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Outcome of `result` for `side`. `None` for an unfinished game.
    pub fn for_side(result: GameResult, side: Side) -> Option<Outcome> {
        match (result, result.winner()) {
            (GameResult::Draw, _) => Some(Outcome::Draw),
            (_, Some(winner)) if winner == side => Some(Outcome::Win),
            (_, Some(_)) => Some(Outcome::Loss),
            (_, None) => None,
        }
    }
}

/// Result of a single episode from the learner's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeResult {
    pub outcome: Outcome,
    pub learner_side: Side,
    pub game_length: usize,
}

impl EpisodeResult {
    pub fn from_record(record: &GameRecord, learner_side: Side) -> Option<Self> {
        Outcome::for_side(record.result, learner_side).map(|outcome| EpisodeResult {
            outcome,
            learner_side,
            game_length: record.game_length,
        })
    }
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    update_losses: VecDeque<f32>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
    total_wins: usize,
    total_draws: usize,
    total_losses: usize,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            update_losses: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
            total_wins: 0,
            total_draws: 0,
            total_losses: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        match result.outcome {
            Outcome::Win => self.total_wins += 1,
            Outcome::Draw => self.total_draws += 1,
            Outcome::Loss => self.total_losses += 1,
        }
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    pub fn record_update(&mut self, loss: f32) {
        self.update_losses.push_back(loss);
        if self.update_losses.len() > self.capacity {
            self.update_losses.pop_front();
        }
    }

    fn rate(&self, last_n: usize, outcome: Outcome) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let count = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| r.outcome == outcome)
            .count();
        count as f32 / n as f32
    }

    /// Learner win rate in the last N episodes.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, Outcome::Win)
    }

    /// Draw rate in the last N episodes.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, Outcome::Draw)
    }

    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, Outcome::Loss)
    }

    /// Average loss over the last N updates.
    pub fn average_loss(&self, last_n: usize) -> f32 {
        let n = self.update_losses.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self.update_losses.iter().rev().take(n).sum();
        sum / n as f32
    }

    /// Average game length over the last N episodes.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.game_length)
            .sum();
        total as f32 / n as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Lifetime (wins, draws, losses).
    pub fn totals(&self) -> (usize, usize, usize) {
        (self.total_wins, self.total_draws, self.total_losses)
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(outcome: Outcome, game_length: usize) -> EpisodeResult {
        EpisodeResult {
            outcome,
            learner_side: Side::Cross,
            game_length,
        }
    }

    #[test]
    fn test_outcome_for_side() {
        assert_eq!(Outcome::for_side(GameResult::CrossWin, Side::Cross), Some(Outcome::Win));
        assert_eq!(Outcome::for_side(GameResult::CrossWin, Side::Naught), Some(Outcome::Loss));
        assert_eq!(Outcome::for_side(GameResult::Draw, Side::Naught), Some(Outcome::Draw));
        assert_eq!(Outcome::for_side(GameResult::NotFinished, Side::Cross), None);
    }

    #[test]
    fn test_from_record() {
        let record = GameRecord {
            result: GameResult::NaughtWin,
            game_length: 6,
        };
        let result = EpisodeResult::from_record(&record, Side::Naught).unwrap();
        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.game_length, 6);
    }

    #[test]
    fn test_rates() {
        let mut metrics = TrainingMetrics::new();
        metrics.record_episode(episode(Outcome::Win, 5));
        metrics.record_episode(episode(Outcome::Draw, 9));
        metrics.record_episode(episode(Outcome::Loss, 6));
        metrics.record_episode(episode(Outcome::Win, 7));

        assert!((metrics.win_rate(4) - 0.5).abs() < 1e-6);
        assert!((metrics.draw_rate(4) - 0.25).abs() < 1e-6);
        assert!((metrics.loss_rate(4) - 0.25).abs() < 1e-6);
        assert!((metrics.win_rate(2) - 0.5).abs() < 1e-6);
        assert!((metrics.average_game_length(2) - 6.5).abs() < 1e-6);
        assert_eq!(metrics.totals(), (2, 1, 1));
    }

    #[test]
    fn test_window_capped_but_totals_kept() {
        let mut metrics = TrainingMetrics::with_capacity(3);
        for _ in 0..5 {
            metrics.record_episode(episode(Outcome::Loss, 5));
        }
        metrics.record_episode(episode(Outcome::Win, 5));
        assert_eq!(metrics.total_episodes(), 6);
        assert!((metrics.win_rate(100) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(metrics.totals(), (1, 0, 5));
    }

    #[test]
    fn test_average_loss() {
        let mut metrics = TrainingMetrics::new();
        assert_eq!(metrics.average_loss(10), 0.0);
        metrics.record_update(0.2);
        metrics.record_update(0.4);
        assert!((metrics.average_loss(10) - 0.3).abs() < 1e-6);
        assert!((metrics.average_loss(1) - 0.4).abs() < 1e-6);
    }
}
