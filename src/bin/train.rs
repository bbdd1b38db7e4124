use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use ml_tic_tac_toe::ai::value_function::sgd_q_function;
use ml_tic_tac_toe::ai::{Agent, MinMaxAgent, NnQAgent, RandomAgent};
use ml_tic_tac_toe::config::AppConfig;
use ml_tic_tac_toe::training::trainer::Trainer;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    Random,
    Minmax,
}

/// Train a tic-tac-toe Q-learning agent.
#[derive(Parser)]
#[command(name = "train", about = "Train a tic-tac-toe Q-learning agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of training games
    #[arg(long)]
    games: Option<usize>,

    /// Opponent to train against
    #[arg(long, value_enum, default_value = "random")]
    opponent: Opponent,

    /// Override number of evaluation games per opponent
    #[arg(long)]
    eval_games: Option<usize>,

    /// Seed for the learner and the random opponent
    #[arg(long)]
    seed: Option<u64>,
}

fn make_opponent(kind: Opponent, seed: Option<u64>) -> Box<dyn Agent> {
    match kind {
        Opponent::Random => match seed {
            Some(seed) => Box::new(RandomAgent::with_seed(seed.wrapping_add(1))),
            None => Box::new(RandomAgent::new()),
        },
        Opponent::Minmax => Box::new(MinMaxAgent::new()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(games) = cli.games {
        app_config.training.num_games = games;
    }
    if let Some(eval_games) = cli.eval_games {
        app_config.training.eval_games = eval_games;
    }
    if cli.seed.is_some() {
        app_config.agent.seed = cli.seed;
    }
    app_config.validate().context("invalid configuration")?;

    let q = sgd_q_function("tic-tac-toe-q", app_config.network.to_q_network_config())
        .context("building action-value network")?;
    let mut agent = NnQAgent::new("NnQ", q, app_config.agent.clone())
        .context("building learning agent")?;

    let trainer = Trainer::new(app_config.training.clone());
    let mut opponent = make_opponent(cli.opponent, cli.seed);
    let metrics = trainer
        .train(&mut agent, opponent.as_mut())
        .context("training failed")?;

    let (wins, draws, losses) = metrics.totals();
    tracing::info!(wins, draws, losses, "training totals");

    let eval_games = app_config.training.eval_games;
    if eval_games > 0 {
        for kind in [Opponent::Random, Opponent::Minmax] {
            let mut opponent = make_opponent(kind, cli.seed);
            let summary = trainer
                .evaluate(&mut agent, opponent.as_mut(), eval_games)
                .with_context(|| format!("evaluating against {:?}", kind))?;
            println!(
                "vs {:<8} wins {:>4}  draws {:>4}  losses {:>4}  (win rate {:.1}%)",
                opponent.name(),
                summary.wins,
                summary.draws,
                summary.losses,
                summary.win_rate() * 100.0
            );
        }
    }

    Ok(())
}
