mod nn_q;

pub use nn_q::{greedy_cell, mask_illegal, renormalize, CellValues, NnQAgent, NnqConfig, Trajectory};
