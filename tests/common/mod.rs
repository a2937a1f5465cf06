//! Shared test harness: a reference Elman network over plain `ndarray`
//! arrays and a tolerance-based comparison against it.

#![allow(dead_code)]

use std::collections::HashMap;

use burn::backend::NdArray;
use burn::tensor::{Tensor, TensorData};
use elman::activation::Nonlinearity;
use elman::config::ElmanConfig;
use elman::params::{Connection, NamedParameters, ParamData, ParamKind};
use ndarray::{Array1, Array2, Array3, ArrayD, Axis, Ix1, Ix2, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub type Backend = NdArray<f64>;

pub const RTOL: f64 = 1e-5;
pub const ATOL: f64 = 1e-8;

/// Reference multilayer Elman network used as the numerical oracle.
///
/// Parameters are drawn uniformly from `[-1/sqrt(H), 1/sqrt(H)]` and exposed
/// under the conventional `weight_hh_l{i}` style names.
pub struct ReferenceRnn {
    pub config: ElmanConfig,
    params: HashMap<String, ArrayD<f64>>,
}

impl ReferenceRnn {
    pub fn random(config: ElmanConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let k = 1.0 / (config.hidden_size as f64).sqrt();

        let mut params = HashMap::new();
        for layer in 0..config.num_layers {
            for kind in ParamKind::ALL {
                if kind.is_bias() && !config.bias {
                    continue;
                }
                let shape = expected_shape(&config, kind, layer);
                let len: usize = shape.iter().product();
                let values = (0..len).map(|_| rng.random_range(-k..k)).collect();
                let array = ArrayD::from_shape_vec(IxDyn(&shape), values).unwrap();
                params.insert(kind.name(layer), array);
            }
        }

        Self { config, params }
    }

    /// Overwrites one named tensor with `value` everywhere.
    pub fn fill(&mut self, name: &str, value: f64) {
        self.params
            .get_mut(name)
            .unwrap_or_else(|| panic!("no parameter {name}"))
            .fill(value);
    }

    /// Same weights, with bias enabled and every bias set to zero.
    pub fn with_zero_bias(&self) -> Self {
        let config = self.config.clone().with_bias(true);
        let mut params = self.params.clone();
        for layer in 0..config.num_layers {
            for connection in [Connection::Hidden, Connection::Input] {
                let kind = ParamKind::Bias(connection);
                params.insert(kind.name(layer), ArrayD::zeros(IxDyn(&[config.hidden_size])));
            }
        }
        Self { config, params }
    }

    fn matrix(&self, kind: ParamKind, layer: usize) -> Array2<f64> {
        self.params[&kind.name(layer)]
            .clone()
            .into_dimensionality::<Ix2>()
            .unwrap()
    }

    fn vector(&self, kind: ParamKind, layer: usize) -> Option<Array1<f64>> {
        self.params
            .get(&kind.name(layer))
            .map(|a| a.clone().into_dimensionality::<Ix1>().unwrap())
    }

    /// `(sequence_output [T, B, H], final_hidden [L, B, H])`
    pub fn forward(
        &self,
        x: &Array3<f64>,
        hidden_0: Option<&Array3<f64>>,
    ) -> (Array3<f64>, Array3<f64>) {
        let (seq_len, batch_size, _) = x.dim();
        let h = self.config.hidden_size;
        let num_layers = self.config.num_layers;

        let mut state: Vec<Array2<f64>> = (0..num_layers)
            .map(|l| match hidden_0 {
                Some(h0) => h0.index_axis(Axis(0), l).to_owned(),
                None => Array2::zeros((batch_size, h)),
            })
            .collect();
        let mut output = Array3::zeros((seq_len, batch_size, h));

        for t in 0..seq_len {
            let mut layer_input = x.index_axis(Axis(0), t).to_owned();
            for (l, hidden) in state.iter_mut().enumerate() {
                let w_ih = self.matrix(ParamKind::Weight(Connection::Input), l);
                let w_hh = self.matrix(ParamKind::Weight(Connection::Hidden), l);

                let mut pre = layer_input.dot(&w_ih.t()) + hidden.dot(&w_hh.t());
                if let Some(b_ih) = self.vector(ParamKind::Bias(Connection::Input), l) {
                    pre += &b_ih;
                }
                if let Some(b_hh) = self.vector(ParamKind::Bias(Connection::Hidden), l) {
                    pre += &b_hh;
                }

                let activated = match self.config.nonlinearity {
                    Nonlinearity::Tanh => pre.mapv(f64::tanh),
                    Nonlinearity::Relu => pre.mapv(|v| v.max(0.0)),
                };
                *hidden = activated.clone();
                layer_input = activated;
            }
            output.index_axis_mut(Axis(0), t).assign(&layer_input);
        }

        let views: Vec<_> = state.iter().map(|a| a.view()).collect();
        let final_hidden = ndarray::stack(Axis(0), &views).unwrap();
        (output, final_hidden)
    }
}

impl NamedParameters for ReferenceRnn {
    fn parameter(&self, name: &str) -> Option<ParamData> {
        self.params.get(name).map(|a| ParamData {
            shape: a.shape().to_vec(),
            values: a.iter().copied().collect(),
        })
    }
}

pub fn expected_shape(config: &ElmanConfig, kind: ParamKind, layer: usize) -> Vec<usize> {
    let h = config.hidden_size;
    match kind {
        ParamKind::Weight(Connection::Hidden) => vec![h, h],
        ParamKind::Weight(Connection::Input) => vec![h, config.layer_input_size(layer)],
        ParamKind::Bias(_) => vec![h],
    }
}

pub fn random_array3(shape: (usize, usize, usize), seed: u64) -> Array3<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array3::from_shape_simple_fn(shape, || rng.random_range(-1.0..1.0))
}

pub fn to_tensor(array: &Array3<f64>) -> Tensor<Backend, 3> {
    let (a, b, c) = array.dim();
    let data = TensorData::new(array.iter().copied().collect::<Vec<f64>>(), [a, b, c]);
    Tensor::from_data(data, &Default::default())
}

pub fn to_array(tensor: Tensor<Backend, 3>) -> Array3<f64> {
    let [a, b, c] = tensor.dims();
    let values = tensor.into_data().to_vec::<f64>().unwrap();
    Array3::from_shape_vec((a, b, c), values).unwrap()
}

/// Oracle and engine outputs disagree.
#[derive(Error, Debug)]
pub enum ConformanceMismatch {
    #[error("{tensor}: shape {actual:?} differs from reference shape {expected:?}")]
    Shape {
        tensor: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error(
        "{tensor}{index:?}: got {actual}, reference {expected}, \
         deviation {deviation:e} exceeds {allowed:e}"
    )]
    Value {
        tensor: String,
        index: Vec<usize>,
        expected: f64,
        actual: f64,
        deviation: f64,
        allowed: f64,
    },
}

/// Elementwise `|actual - expected| <= ATOL + RTOL * |expected|`; reports the first offender.
pub fn assert_allclose(
    tensor: &str,
    actual: &Array3<f64>,
    expected: &Array3<f64>,
) -> Result<(), ConformanceMismatch> {
    if actual.shape() != expected.shape() {
        return Err(ConformanceMismatch::Shape {
            tensor: tensor.to_string(),
            expected: expected.shape().to_vec(),
            actual: actual.shape().to_vec(),
        });
    }

    for ((index, &want), &got) in expected.indexed_iter().zip(actual.iter()) {
        let deviation = (got - want).abs();
        let allowed = ATOL + RTOL * want.abs();
        // NaN never satisfies the bound
        if !(deviation <= allowed) {
            return Err(ConformanceMismatch::Value {
                tensor: tensor.to_string(),
                index: vec![index.0, index.1, index.2],
                expected: want,
                actual: got,
                deviation,
                allowed,
            });
        }
    }
    Ok(())
}
