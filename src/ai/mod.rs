mod agent;
pub mod algorithms;
mod min_max;
pub mod networks;
mod random;
pub mod state_encoding;
pub mod value_function;

pub use agent::Agent;
pub use algorithms::{NnQAgent, NnqConfig, Trajectory};
pub use min_max::MinMaxAgent;
pub use networks::{QNetwork, QNetworkConfig};
pub use random::RandomAgent;
pub use value_function::{sgd_q_function, ActionValueFunction, Evaluation, NeuralQFunction};
