//! Network configuration.

use burn::config::Config;
use burn::tensor::backend::Backend;

use crate::activation::Nonlinearity;
use crate::error::RnnError;
use crate::params::{NamedParameters, ParameterStore};
use crate::rnn::ElmanRnn;

/// Configuration of a multilayer Elman network.
///
/// Mirrors the constructor arguments of the reference recurrent network:
/// sizes, depth, nonlinearity and whether the affine maps carry biases.
#[derive(Config, Debug)]
pub struct ElmanConfig {
    /// Feature dimension of the input sequence.
    pub input_size: usize,
    /// Hidden state dimension of every layer.
    pub hidden_size: usize,
    /// Number of stacked layers.
    #[config(default = 1)]
    pub num_layers: usize,
    #[config(default = "Nonlinearity::Tanh")]
    pub nonlinearity: Nonlinearity,
    /// Whether `bias_hh_l{i}` and `bias_ih_l{i}` exist.
    #[config(default = true)]
    pub bias: bool,
    /// Input and output are `[batch, seq, features]` instead of `[seq, batch, features]`.
    #[config(default = false)]
    pub batch_first: bool,
}

impl ElmanConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.input_size == 0 {
            return Err(RnnError::InvalidConfig("input_size must be positive".into()));
        }
        if self.hidden_size == 0 {
            return Err(RnnError::InvalidConfig("hidden_size must be positive".into()));
        }
        if self.num_layers == 0 {
            return Err(RnnError::InvalidConfig("num_layers must be positive".into()));
        }
        Ok(())
    }

    /// Input dimension of `layer`: `input_size` for the first layer, `hidden_size` above it.
    pub fn layer_input_size(&self, layer: usize) -> usize {
        if layer == 0 {
            self.input_size
        } else {
            self.hidden_size
        }
    }

    /// Builds a network whose parameters are resolved from `source`.
    pub fn init<B: Backend>(
        &self,
        source: &impl NamedParameters,
        device: &B::Device,
    ) -> crate::Result<ElmanRnn<B>> {
        let params = ParameterStore::from_named(self, source, device)?;
        Ok(ElmanRnn::new(params).with_batch_first(self.batch_first))
    }
}
