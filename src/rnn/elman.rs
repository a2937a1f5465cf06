//! Multilayer Elman RNN layer
//!
//! Runs the step function over a whole sequence, one timestep at a time and,
//! within a timestep, one layer at a time.

use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use tracing::{debug, trace};

use super::grid::HiddenStateGrid;
use crate::activation::Nonlinearity;
use crate::error::{ensure_shape, Result, RnnError};
use crate::params::ParameterStore;

/// Multilayer Elman RNN
///
/// Layer `l` at timestep `t` reads layer `l - 1` at the same timestep and
/// its own state at timestep `t - 1`, so the loop order is fixed:
/// time-major outside, layer-major inside.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct ElmanRnn<B: Backend> {
    params: ParameterStore<B>,
    /// Whether input and sequence output are `[batch, seq, features]`
    #[module(skip)]
    batch_first: bool,
}

impl<B: Backend> ElmanRnn<B> {
    pub fn new(params: ParameterStore<B>) -> Self {
        Self {
            params,
            batch_first: false,
        }
    }

    /// Set whether input is batch-first (default: false)
    pub fn with_batch_first(mut self, batch_first: bool) -> Self {
        self.batch_first = batch_first;
        self
    }

    pub fn params(&self) -> &ParameterStore<B> {
        &self.params
    }

    pub fn batch_first(&self) -> bool {
        self.batch_first
    }

    pub fn input_size(&self) -> usize {
        self.params.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.params.hidden_size()
    }

    pub fn num_layers(&self) -> usize {
        self.params.num_layers()
    }

    pub fn activation(&self) -> Nonlinearity {
        self.params.activation()
    }

    /// Forward pass over a batch of sequences
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape:
    ///   - `[seq, batch, input_size]` if `batch_first = false`
    ///   - `[batch, seq, input_size]` if `batch_first = true`
    /// * `hidden_0` - Optional initial hidden state `[num_layers, batch, hidden_size]`,
    ///   zeros when `None`
    ///
    /// # Returns
    /// Tuple of `(output, final_hidden)` where:
    /// - `output`: top layer's hidden state at every timestep,
    ///   `[seq, batch, hidden_size]` (or `[batch, seq, hidden_size]` if batch-first)
    /// - `final_hidden`: every layer's hidden state at the last timestep,
    ///   `[num_layers, batch, hidden_size]`
    ///
    /// # Errors
    /// Shape disagreements, empty sequences and empty batches are rejected
    /// before any step runs.
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        hidden_0: Option<Tensor<B, 3>>,
    ) -> Result<(Tensor<B, 3>, Tensor<B, 3>)> {
        if self.batch_first {
            let (output, final_hidden) = self.forward_seq_first(input.swap_dims(0, 1), hidden_0)?;
            Ok((output.swap_dims(0, 1), final_hidden))
        } else {
            self.forward_seq_first(input, hidden_0)
        }
    }

    /// Forward pass over a single sequence without a batch dimension
    ///
    /// `input` is `[seq, input_size]` and `hidden_0` is `[num_layers, hidden_size]`,
    /// whatever `batch_first` says. Returns `([seq, hidden_size], [num_layers, hidden_size])`.
    pub fn forward_unbatched(
        &self,
        input: Tensor<B, 2>,
        hidden_0: Option<Tensor<B, 2>>,
    ) -> Result<(Tensor<B, 2>, Tensor<B, 2>)> {
        let input = input.unsqueeze_dim::<3>(1);
        let hidden_0 = hidden_0.map(|h| h.unsqueeze_dim::<3>(1));

        let (output, final_hidden) = self.forward_seq_first(input, hidden_0)?;
        Ok((output.squeeze_dim::<2>(1), final_hidden.squeeze_dim::<2>(1)))
    }

    fn forward_seq_first(
        &self,
        input: Tensor<B, 3>,
        hidden_0: Option<Tensor<B, 3>>,
    ) -> Result<(Tensor<B, 3>, Tensor<B, 3>)> {
        let device = input.device();
        let [seq_len, batch_size, _] = input.dims();
        let num_layers = self.params.num_layers();
        let hidden_size = self.params.hidden_size();

        if seq_len == 0 {
            return Err(RnnError::EmptySequence);
        }
        if batch_size == 0 {
            return Err(RnnError::EmptyBatch);
        }
        ensure_shape(
            "input",
            &[seq_len, batch_size, self.params.input_size()],
            &input.dims(),
        )?;

        let hidden_0 = match hidden_0 {
            Some(hidden) => {
                ensure_shape("hidden_0", &[num_layers, batch_size, hidden_size], &hidden.dims())?;
                hidden
            }
            None => Tensor::zeros([num_layers, batch_size, hidden_size], &device),
        };

        debug!(seq_len, batch_size, num_layers, hidden_size, "elman forward");

        let activation = self.params.activation();
        let mut grid = HiddenStateGrid::new(seq_len, num_layers);

        for t in 0..seq_len {
            // input[t, batch, features] -> [batch, features]
            let step_input = input.clone().narrow(0, t, 1).squeeze_dim::<2>(0);

            for l in 0..num_layers {
                let previous_hidden = if t == 0 {
                    hidden_0.clone().narrow(0, l, 1).squeeze_dim::<2>(0)
                } else {
                    grid.read(t - 1, l)?
                };
                let layer_input = if l == 0 {
                    step_input.clone()
                } else {
                    grid.read(t, l - 1)?
                };

                let hidden = self
                    .params
                    .layer(l)?
                    .step(previous_hidden, layer_input, activation)?;
                trace!(timestep = t, layer = l, "hidden state computed");
                grid.write(t, l, hidden)?;
            }
        }

        grid.into_outputs()
    }
}
