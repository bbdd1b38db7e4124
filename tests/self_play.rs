use ml_tic_tac_toe::ai::{
    sgd_q_function, ActionValueFunction, Agent, MinMaxAgent, NnQAgent, NnqConfig, QNetworkConfig,
    RandomAgent,
};
use ml_tic_tac_toe::game::{Cell, Side, BOARD_SIZE};
use ml_tic_tac_toe::training::episode::{play_as, play_game};

fn learner(seed: u64, random_move_prob: f32) -> NnQAgent<impl ActionValueFunction> {
    let q = sgd_q_function("q", QNetworkConfig::new(BOARD_SIZE).with_hidden_multiplier(4)).unwrap();
    NnQAgent::new(
        format!("learner-{seed}"),
        q,
        NnqConfig {
            random_move_prob,
            seed: Some(seed),
            ..Default::default()
        },
    )
    .unwrap()
}

/// Every logged decision was a legal cell and the logs line up after the game.
fn check_trajectory<V: ActionValueFunction>(agent: &NnQAgent<V>) {
    let t = agent.trajectory();
    assert!(!t.is_empty());
    assert_eq!(t.board_log().len(), t.action_log().len());
    assert_eq!(t.values_log().len(), t.action_log().len());
    assert_eq!(t.next_max_log().len(), t.action_log().len());

    for (state, &cell) in t.board_log().iter().zip(t.action_log()) {
        assert!(cell < BOARD_SIZE);
        assert_eq!(state[cell], Cell::Empty, "chose occupied cell {cell}");
    }
    for (state, values) in t.board_log().iter().zip(t.values_log()) {
        for (i, v) in values.iter().enumerate() {
            if state[i] != Cell::Empty {
                assert_eq!(*v, 0.0, "illegal cell {i} not masked");
            }
        }
    }
}

#[test]
fn learner_vs_random_games_finish_with_consistent_trajectories() {
    let mut agent = learner(11, 0.5);
    let mut opponent = RandomAgent::with_seed(12);

    for game in 0..10 {
        let side = if game % 2 == 0 { Side::Cross } else { Side::Naught };
        let record = play_as(&mut agent, &mut opponent, side).unwrap();
        assert!(record.result.is_finished());
        check_trajectory(&agent);
        assert!(agent.last_loss().is_some());
    }
    assert_eq!(agent.games_completed(), 10);
    assert!((agent.random_move_prob() - 0.5 * 0.95f32.powi(10)).abs() < 1e-6);
}

#[test]
fn learner_never_beats_minmax() {
    let mut agent = learner(21, 1.0);
    let mut opponent = MinMaxAgent::new();

    for game in 0..4 {
        let side = if game % 2 == 0 { Side::Cross } else { Side::Naught };
        let record = play_as(&mut agent, &mut opponent, side).unwrap();
        assert_ne!(record.result.winner(), Some(side));
        check_trajectory(&agent);
    }
}

#[test]
fn two_learners_play_each_other() {
    let mut cross = learner(31, 0.3);
    let mut naught = learner(32, 0.3);

    for _ in 0..5 {
        let record = play_game(&mut cross, &mut naught).unwrap();
        assert!((5..=9).contains(&record.game_length));
        check_trajectory(&cross);
        check_trajectory(&naught);
        assert_eq!(
            cross.trajectory().len() + naught.trajectory().len(),
            record.game_length
        );
    }
}

#[test]
fn evaluation_mode_plays_without_learning() {
    let mut agent = learner(41, 1.0);
    agent.set_training(false);
    let mut opponent = RandomAgent::with_seed(42);

    for _ in 0..3 {
        play_game(&mut agent, &mut opponent).unwrap();
        check_trajectory(&agent);
    }
    assert_eq!(agent.games_completed(), 3);
    assert!(agent.last_loss().is_none());
    assert_eq!(agent.name(), "learner-41");
}
