//! # Parameter Store
//!
//! Per-layer weights and biases of a trained Elman network, resolved once
//! into an integer-indexed array so the forward pass never looks anything
//! up by name.
//!
//! ## Parameter Names
//!
//! Trained models conventionally expose their tensors under names built
//! from the kind and the layer index:
//!
//! | Name | Shape | Description |
//! |------|-------|-------------|
//! | `weight_hh_l{i}` | `[hidden, hidden]` | Hidden-to-hidden weights |
//! | `bias_hh_l{i}` | `[hidden]` | Hidden-to-hidden bias |
//! | `weight_ih_l{i}` | `[hidden, input_i]` | Input-to-hidden weights |
//! | `bias_ih_l{i}` | `[hidden]` | Input-to-hidden bias |
//!
//! where `input_0 = input_size` and `input_i = hidden_size` for `i > 0`.
//!
//! Any type implementing [`NamedParameters`] can feed
//! [`ParameterStore::from_named`]. Name resolution and shape validation both
//! happen there, once.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use burn::backend::NdArray;
//! use elman::config::ElmanConfig;
//! use elman::params::{ParamData, ParameterStore};
//!
//! type Backend = NdArray<f64>;
//! let device = Default::default();
//!
//! let config = ElmanConfig::new(3, 2).with_bias(false);
//! let mut named = HashMap::new();
//! named.insert("weight_hh_l0".to_string(), ParamData::new(vec![2, 2], vec![0.1; 4]).unwrap());
//! named.insert("weight_ih_l0".to_string(), ParamData::new(vec![2, 3], vec![0.2; 6]).unwrap());
//!
//! let store = ParameterStore::<Backend>::from_named(&config, &named, &device).unwrap();
//! assert_eq!(store.num_layers(), 1);
//! assert_eq!(store.hidden_size(), 2);
//! ```

mod store;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RnnError};

pub use store::{LayerParameters, ParameterStore};

/// Which affine map of a layer a tensor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connection {
    /// Previous hidden state to new hidden state (`hh`)
    Hidden,
    /// Layer input to new hidden state (`ih`)
    Input,
}

impl Connection {
    fn suffix(self) -> &'static str {
        match self {
            Connection::Hidden => "hh",
            Connection::Input => "ih",
        }
    }
}

/// One of the four tensors every layer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Weight(Connection),
    Bias(Connection),
}

impl ParamKind {
    pub const ALL: [ParamKind; 4] = [
        ParamKind::Weight(Connection::Hidden),
        ParamKind::Bias(Connection::Hidden),
        ParamKind::Weight(Connection::Input),
        ParamKind::Bias(Connection::Input),
    ];

    /// Conventional name of this tensor for `layer`, e.g. `weight_hh_l0`.
    pub fn name(self, layer: usize) -> String {
        format!("{self}_l{layer}")
    }

    pub fn is_bias(self) -> bool {
        matches!(self, ParamKind::Bias(_))
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Weight(c) => write!(f, "weight_{}", c.suffix()),
            ParamKind::Bias(c) => write!(f, "bias_{}", c.suffix()),
        }
    }
}

/// Row-major `f64` buffer with its shape, as handed over by a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamData {
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
}

impl ParamData {
    /// Fails if `values` does not hold exactly `shape.iter().product()` elements.
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(RnnError::shape(
                "parameter buffer length",
                &[expected],
                &[values.len()],
            ));
        }
        Ok(Self { shape, values })
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let len: usize = shape.iter().product();
        Self {
            shape,
            values: vec![0.0; len],
        }
    }
}

/// Source of trained parameters addressed by conventional name.
pub trait NamedParameters {
    fn parameter(&self, name: &str) -> Option<ParamData>;
}

impl NamedParameters for HashMap<String, ParamData> {
    fn parameter(&self, name: &str) -> Option<ParamData> {
        self.get(name).cloned()
    }
}

impl NamedParameters for BTreeMap<String, ParamData> {
    fn parameter(&self, name: &str) -> Option<ParamData> {
        self.get(name).cloned()
    }
}
