//! # ML Tic-Tac-Toe
//!
//! A tic-tac-toe agent that learns by temporal-difference updates to a small
//! neural action-value network, built on the Burn ML framework.
//!
//! ## Modules
//!
//! - [`game`]: board, sides, game results
//! - [`ai`]: agent trait, Q-learning agent, baseline opponents, networks, state encoding
//! - [`training`]: single-game runner, trainer, metrics collection
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
