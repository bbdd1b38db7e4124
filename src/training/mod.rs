//! Training infrastructure: single-game runner, multi-game trainer and
//! metrics collection.

pub mod episode;
pub mod metrics;
pub mod trainer;
