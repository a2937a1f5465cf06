//! Elman step function
//!
//! Computes one layer's new hidden state for one timestep:
//!
//! ```text
//! h' = act(h · W_hh^T + b_hh + x · W_ih^T + b_ih)
//! ```
//!
//! Bias vectors broadcast across the batch dimension. An absent bias is the
//! additive identity.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::activation::Nonlinearity;
use crate::error::{ensure_shape, Result};

/// Optional bias term of one affine map.
#[derive(Debug, Clone)]
pub enum Bias<B: Backend> {
    Present(Tensor<B, 1>),
    Absent,
}

impl<B: Backend> Bias<B> {
    pub fn is_present(&self) -> bool {
        matches!(self, Bias::Present(_))
    }

    /// Materialises the bias, substituting zeros of length `size` when absent.
    pub fn resolve(self, size: usize, device: &B::Device) -> Tensor<B, 1> {
        match self {
            Bias::Present(bias) => bias,
            Bias::Absent => Tensor::zeros([size], device),
        }
    }

    /// Adds the bias to every row of `x`.
    pub fn add_to(self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        match self {
            Bias::Present(bias) => x + bias.unsqueeze_dim::<2>(0),
            Bias::Absent => x,
        }
    }

    fn dims(&self) -> Option<[usize; 1]> {
        match self {
            Bias::Present(bias) => Some(bias.dims()),
            Bias::Absent => None,
        }
    }
}

impl<B: Backend> From<Option<Tensor<B, 1>>> for Bias<B> {
    fn from(bias: Option<Tensor<B, 1>>) -> Self {
        bias.map_or(Bias::Absent, Bias::Present)
    }
}

/// Computes the new hidden state `[batch, hidden]` of one layer.
///
/// # Arguments
/// * `prev_hidden` - Previous hidden state of this layer, `[batch, hidden]`
/// * `inputs` - Layer input, `[batch, input]`
/// * `weight_hh` - Hidden-to-hidden weights, `[hidden, hidden]`
/// * `bias_hh` - Hidden-to-hidden bias, `[hidden]` or absent
/// * `weight_ih` - Input-to-hidden weights, `[hidden, input]`
/// * `bias_ih` - Input-to-hidden bias, `[hidden]` or absent
/// * `activation` - Elementwise nonlinearity
///
/// # Errors
/// [`RnnError::ShapeMismatch`](crate::RnnError::ShapeMismatch) if any
/// operand disagrees with the shapes above. No broadcasting happens beyond
/// the bias over the batch.
pub fn compute_new_hidden_state<B: Backend>(
    prev_hidden: Tensor<B, 2>,
    inputs: Tensor<B, 2>,
    weight_hh: Tensor<B, 2>,
    bias_hh: Bias<B>,
    weight_ih: Tensor<B, 2>,
    bias_ih: Bias<B>,
    activation: Nonlinearity,
) -> Result<Tensor<B, 2>> {
    let [batch_size, hidden_size] = prev_hidden.dims();
    let [_, input_size] = inputs.dims();

    ensure_shape("inputs", &[batch_size, input_size], &inputs.dims())?;
    ensure_shape("weight_hh", &[hidden_size, hidden_size], &weight_hh.dims())?;
    ensure_shape("weight_ih", &[hidden_size, input_size], &weight_ih.dims())?;
    if let Some(dims) = bias_hh.dims() {
        ensure_shape("bias_hh", &[hidden_size], &dims)?;
    }
    if let Some(dims) = bias_ih.dims() {
        ensure_shape("bias_ih", &[hidden_size], &dims)?;
    }

    let recurrent = bias_hh.add_to(prev_hidden.matmul(weight_hh.transpose()));
    let feedforward = bias_ih.add_to(inputs.matmul(weight_ih.transpose()));

    Ok(activation.forward(recurrent + feedforward))
}
