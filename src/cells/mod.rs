//! # RNN Cell Implementations
//!
//! Single-timestep math for one layer. The sequence-level driver in
//! [`crate::rnn`] calls it once per `(timestep, layer)` cell.
//!
//! ## Elman Step
//!
//! ```text
//! h' = act(h · W_hh^T + b_hh + x · W_ih^T + b_ih)
//! ```
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `prev_hidden` | `[batch, hidden_size]` | Previous hidden state |
//! | `inputs` | `[batch, input_size]` | Layer input |
//! | `weight_hh` | `[hidden_size, hidden_size]` | Recurrent weights |
//! | `weight_ih` | `[hidden_size, input_size]` | Input weights |
//! | `bias_hh`, `bias_ih` | `[hidden_size]` or absent | Broadcast over batch |
//! | `new_hidden` | `[batch, hidden_size]` | Updated hidden state |

pub mod elman_cell;

pub use elman_cell::{compute_new_hidden_state, Bias};
