use burn::prelude::*;
use burn::tensor::TensorData;

use crate::game::{BoardState, Cell, Side, BOARD_SIZE};

/// Length of the flattened network input.
pub const INPUT_SIZE: usize = 3 * BOARD_SIZE;

/// Encode a board snapshot as three side-relative one-hot planes.
///
/// Plane 0: this side's pieces
/// Plane 1: opponent's pieces
/// Plane 2: empty cells
pub fn encode_board(state: &BoardState, side: Side) -> [f32; INPUT_SIZE] {
    let mut data = [0.0f32; INPUT_SIZE];
    let own = side.to_cell();
    let opponent = side.other().to_cell();

    for (idx, &cell) in state.iter().enumerate() {
        let plane = if cell == own {
            0
        } else if cell == opponent {
            1
        } else {
            debug_assert_eq!(cell, Cell::Empty);
            2
        };
        data[plane * BOARD_SIZE + idx] = 1.0;
    }

    data
}

/// Stack flat rows of equal width into a [batch, width] tensor.
pub fn rows_to_tensor<B: Backend>(rows: &[Vec<f32>], width: usize, device: &B::Device) -> Tensor<B, 2> {
    let batch_size = rows.len();
    let mut flat = Vec::with_capacity(batch_size * width);
    for row in rows {
        flat.extend_from_slice(row);
    }
    Tensor::<B, 1>::from_data(TensorData::from(flat.as_slice()), device)
        .reshape([batch_size as i32, width as i32])
}
