//! # Elman - Multilayer Elman RNN forward pass (Rust)
//!
//! Forward pass of a stacked Elman recurrent network on the Burn framework.
//!
//! ## Features
//!
//! - **Step function**: `act(h · W_hh^T + b_hh + x · W_ih^T + b_ih)` with tanh or ReLU
//! - **Parameter store**: per-layer tensors resolved once from conventional names
//!   (`weight_hh_l0`, `bias_ih_l1`, ...)
//! - **Sequence driver**: time-major, layer-major recurrence returning the top
//!   layer's outputs and every layer's final hidden state
//! - **Optional bias and initial state**: absent values act as zeros
//! - **Layouts**: sequence-first, batch-first, or a single unbatched sequence
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use elman::prelude::*;
//!
//! type Backend = NdArray<f64>;
//! let device = Default::default();
//!
//! let config = ElmanConfig::new(3, 2).with_nonlinearity(Nonlinearity::Relu);
//! let mut named = HashMap::new();
//! for kind in ParamKind::ALL {
//!     let shape = match kind {
//!         ParamKind::Weight(Connection::Hidden) => vec![2, 2],
//!         ParamKind::Weight(Connection::Input) => vec![2, 3],
//!         ParamKind::Bias(_) => vec![2],
//!     };
//!     named.insert(kind.name(0), ParamData::zeros(shape));
//! }
//!
//! let rnn = config.init::<Backend>(&named, &device).unwrap();
//! let input = Tensor::<Backend, 3>::ones([5, 4, 3], &device);
//! let (output, final_hidden) = rnn.forward(input, None).unwrap();
//!
//! assert_eq!(output.dims(), [5, 4, 2]);
//! assert_eq!(final_hidden.dims(), [1, 4, 2]);
//! ```

pub mod activation;
pub mod cells;
pub mod config;
pub mod error;
pub mod params;
pub mod rnn;

pub use error::{Result, RnnError};

pub mod prelude {
    pub use crate::activation::Nonlinearity;
    pub use crate::cells::{compute_new_hidden_state, Bias};
    pub use crate::config::ElmanConfig;
    pub use crate::error::RnnError;
    pub use crate::params::{
        Connection, LayerParameters, NamedParameters, ParamData, ParamKind, ParameterStore,
    };
    pub use crate::rnn::ElmanRnn;
}
