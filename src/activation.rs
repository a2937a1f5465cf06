//! Elementwise nonlinearities applied after the affine recurrence step.

use std::fmt;
use std::str::FromStr;

use burn::tensor::{activation, backend::Backend, Tensor};
use serde::{Deserialize, Serialize};

use crate::error::RnnError;

/// Activation applied to the pre-activation of every Elman step.
///
/// Only the two names below are accepted. Parsing is strict, so a misspelled
/// name such as `"rlu"` is an error rather than a silent fallback to tanh.
///
/// # Example
///
/// ```rust
/// use burn::backend::NdArray;
/// use burn::tensor::{Tensor, TensorData};
/// use elman::activation::Nonlinearity;
///
/// type Backend = NdArray<f64>;
/// let device = Default::default();
///
/// let relu: Nonlinearity = "relu".parse().unwrap();
/// let x = Tensor::<Backend, 1>::from_data(TensorData::new(vec![-1.0, 0.5], [2]), &device);
/// let y = relu.forward(x);
/// assert_eq!(y.into_data().to_vec::<f64>().unwrap(), vec![0.0, 0.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nonlinearity {
    /// Hyperbolic tangent
    #[default]
    Tanh,
    /// Rectified linear unit
    Relu,
}

impl Nonlinearity {
    /// Applies the activation elementwise.
    pub fn forward<B: Backend, const D: usize>(self, x: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Nonlinearity::Tanh => x.tanh(),
            Nonlinearity::Relu => activation::relu(x),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Nonlinearity::Tanh => "tanh",
            Nonlinearity::Relu => "relu",
        }
    }
}

impl FromStr for Nonlinearity {
    type Err = RnnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tanh" => Ok(Nonlinearity::Tanh),
            "relu" => Ok(Nonlinearity::Relu),
            other => Err(RnnError::UnknownNonlinearity(other.to_string())),
        }
    }
}

impl fmt::Display for Nonlinearity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
