//! Error types for the Elman forward pass.

use thiserror::Error;

/// Errors raised while building or running an Elman network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RnnError {
    /// An operand's dimensions disagree with the expected contract.
    #[error("shape mismatch for {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// The hidden state grid was not written exactly once per cell.
    ///
    /// This is never the caller's fault: it means the recurrence loop itself
    /// is broken.
    #[error("internal consistency violated at timestep {timestep}, layer {layer}: {reason}")]
    InternalConsistency {
        timestep: usize,
        layer: usize,
        reason: &'static str,
    },

    #[error("unknown nonlinearity `{0}`, expected `tanh` or `relu`")]
    UnknownNonlinearity(String),

    #[error("missing parameter `{0}`")]
    MissingParameter(String),

    #[error("layer {layer} out of range for a network with {num_layers} layers")]
    LayerOutOfRange { layer: usize, num_layers: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("input sequence is empty")]
    EmptySequence,

    #[error("input batch is empty")]
    EmptyBatch,

    #[error("tensor data error: {0}")]
    TensorData(String),
}

pub type Result<T> = std::result::Result<T, RnnError>;

impl RnnError {
    pub(crate) fn shape(what: impl Into<String>, expected: &[usize], actual: &[usize]) -> Self {
        RnnError::ShapeMismatch {
            what: what.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

/// Fails with [`RnnError::ShapeMismatch`] unless `actual == expected`.
pub(crate) fn ensure_shape(
    what: impl Into<String>,
    expected: &[usize],
    actual: &[usize],
) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        let err = RnnError::shape(what, expected, actual);
        tracing::warn!(%err, "rejected operand");
        Err(err)
    }
}
