use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::optim::{GradientsParams, Optimizer, SgdConfig};
use burn::prelude::*;

use crate::ai::networks::{QNetwork, QNetworkConfig};
use crate::ai::state_encoding::rows_to_tensor;
use crate::error::ModelError;

pub type InferBackend = NdArray<f32>;
pub type TrainBackend = Autodiff<InferBackend>;

/// Output of one forward pass over a single encoded board.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Softmax over the action values.
    pub probabilities: Vec<f32>,
    /// Raw linear outputs, one per cell.
    pub action_values: Vec<f32>,
}

/// Trainable mapping from an encoded board to per-cell action values.
pub trait ActionValueFunction {
    fn name(&self) -> &str;

    /// Number of board cells covered by the output.
    fn board_size(&self) -> usize;

    /// Forward pass for one encoded board of length `3 * board_size`.
    fn evaluate(&self, input: &[f32]) -> Result<Evaluation, ModelError>;

    /// One gradient step on the mean squared error between predictions for
    /// `inputs` and `targets`. Returns the loss measured before the step.
    fn update(&mut self, inputs: &[Vec<f32>], targets: &[Vec<f32>]) -> Result<f32, ModelError>;
}

/// [`QNetwork`] trained by gradient descent.
pub struct NeuralQFunction<O> {
    name: String,
    network: QNetwork<TrainBackend>,
    optimizer: O,
    config: QNetworkConfig,
    device: <TrainBackend as Backend>::Device,
}

/// Build a [`NeuralQFunction`] with plain SGD at `config.learning_rate`.
pub fn sgd_q_function(
    name: impl Into<String>,
    config: QNetworkConfig,
) -> Result<NeuralQFunction<impl Optimizer<QNetwork<TrainBackend>, TrainBackend>>, ModelError> {
    let optimizer = SgdConfig::new().init::<TrainBackend, QNetwork<TrainBackend>>();
    NeuralQFunction::with_optimizer(name, config, optimizer)
}

impl<O> NeuralQFunction<O>
where
    O: Optimizer<QNetwork<TrainBackend>, TrainBackend>,
{
    pub fn with_optimizer(
        name: impl Into<String>,
        config: QNetworkConfig,
        optimizer: O,
    ) -> Result<Self, ModelError> {
        if config.board_size == 0 {
            return Err(ModelError::InvalidBoardSize(config.board_size));
        }
        let device = Default::default();
        let network = config.init(&device);

        Ok(NeuralQFunction {
            name: name.into(),
            network,
            optimizer,
            config,
            device,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    fn check_input(&self, input: &[f32]) -> Result<(), ModelError> {
        let expected = self.config.input_size();
        if input.len() != expected {
            return Err(ModelError::InputShape {
                expected,
                actual: input.len(),
            });
        }
        Ok(())
    }
}

impl<O> ActionValueFunction for NeuralQFunction<O>
where
    O: Optimizer<QNetwork<TrainBackend>, TrainBackend>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn board_size(&self) -> usize {
        self.config.board_size
    }

    fn evaluate(&self, input: &[f32]) -> Result<Evaluation, ModelError> {
        self.check_input(input)?;

        let input_tensor = rows_to_tensor::<InferBackend>(
            &[input.to_vec()],
            self.config.input_size(),
            &self.device,
        );
        let logits = self.network.valid().forward(input_tensor);
        let probs = burn::tensor::activation::softmax(logits.clone(), 1);

        let action_values: Vec<f32> = logits
            .into_data()
            .to_vec()
            .map_err(|e| ModelError::TensorData(format!("{e:?}")))?;
        let probabilities: Vec<f32> = probs
            .into_data()
            .to_vec()
            .map_err(|e| ModelError::TensorData(format!("{e:?}")))?;

        Ok(Evaluation {
            probabilities,
            action_values,
        })
    }

    fn update(&mut self, inputs: &[Vec<f32>], targets: &[Vec<f32>]) -> Result<f32, ModelError> {
        if inputs.len() != targets.len() {
            return Err(ModelError::BatchMismatch {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        if inputs.is_empty() {
            return Err(ModelError::EmptyBatch);
        }
        for input in inputs {
            self.check_input(input)?;
        }
        let board_size = self.config.board_size;
        if let Some(bad) = targets.iter().find(|t| t.len() != board_size) {
            return Err(ModelError::TargetShape {
                expected: board_size,
                actual: bad.len(),
            });
        }

        let input_tensor =
            rows_to_tensor::<TrainBackend>(inputs, self.config.input_size(), &self.device);
        let target_tensor = rows_to_tensor::<TrainBackend>(targets, board_size, &self.device);

        let predictions = self.network.forward(input_tensor);
        let diff = predictions - target_tensor;
        let loss = (diff.clone() * diff).mean();

        let loss_val: f32 = loss
            .clone()
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| ModelError::TensorData(format!("{e:?}")))?[0];

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.network);
        self.network = self
            .optimizer
            .step(self.config.learning_rate, self.network.clone(), grads);

        Ok(loss_val)
    }
}
