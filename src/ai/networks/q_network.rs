use burn::module::Param;
use burn::nn::{Initializer, Linear, LinearConfig, Relu};
use burn::prelude::*;

/// Fully connected Q-value network for an N-cell board.
///
/// ```text
/// Input:  [batch, 3N]   (own / opponent / empty planes)
/// FC1:    3N -> 3N * hidden_multiplier, ReLU
/// FC2:    3N * hidden_multiplier -> N  (action values, one per cell)
/// ```
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    relu: Relu,
}

#[derive(Config, Debug)]
pub struct QNetworkConfig {
    /// Number of board cells (N).
    pub board_size: usize,
    #[config(default = 128)]
    pub hidden_multiplier: usize,
    #[config(default = 0.01)]
    pub learning_rate: f64,
}

impl QNetworkConfig {
    pub fn input_size(&self) -> usize {
        3 * self.board_size
    }

    pub fn hidden_size(&self) -> usize {
        self.input_size() * self.hidden_multiplier
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> QNetwork<B> {
        QNetwork {
            fc1: scaled_linear(self.input_size(), self.hidden_size(), device),
            fc2: scaled_linear(self.hidden_size(), self.board_size, device),
            relu: Relu::new(),
        }
    }
}

/// Linear layer with normal weights of std `0.1 / sqrt(fan_in * fan_out)` and zero bias.
fn scaled_linear<B: Backend>(fan_in: usize, fan_out: usize, device: &B::Device) -> Linear<B> {
    let std = 0.1 / ((fan_in * fan_out) as f64).sqrt();
    let mut layer = LinearConfig::new(fan_in, fan_out)
        .with_initializer(Initializer::Normal { mean: 0.0, std })
        .init(device);
    layer.bias = Some(Param::from_tensor(Tensor::zeros([fan_out], device)));
    layer
}

impl<B: Backend> QNetwork<B> {
    /// Forward pass: input [batch, 3N] -> output [batch, N] action values.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.fc1.forward(input));
        self.fc2.forward(x)
    }
}
