//! # RNN Layers for Sequence Processing
//!
//! [`ElmanRnn`] drives the step function over a whole input sequence and all
//! stacked layers, threading hidden states between steps.
//!
//! ## Tensor Shapes
//!
//! ### Input Tensor (3D)
//!
//! | Format | Shape | Default |
//! |--------|-------|---------|
//! | Sequence-first | `[seq_len, batch, input_size]` | ✓ Yes |
//! | Batch-first | `[batch, seq_len, input_size]` | No |
//!
//! Use `.with_batch_first(true)` (or `ElmanConfig::with_batch_first`) to
//! switch to batch-first format.
//!
//! ### Outputs
//!
//! | Output | Shape | Description |
//! |--------|-------|-------------|
//! | `output` | `[seq_len, batch, hidden_size]` | Top layer at every timestep |
//! | `final_hidden` | `[num_layers, batch, hidden_size]` | Every layer at the last timestep |
//!
//! `output` follows the input layout; `final_hidden` is always layer-first.
//!
//! ## Common Patterns
//!
//! ### Stateful Processing (preserve hidden state)
//!
//! ```ignore
//! let (output1, state) = rnn.forward(chunk1, None)?;
//! let (output2, state) = rnn.forward(chunk2, Some(state))?;
//! // Same result as one call over chunk1 followed by chunk2
//! ```
//!
//! ### Single Sequence
//!
//! ```ignore
//! // input: [seq_len, input_size], hidden: [num_layers, hidden_size]
//! let (output, final_hidden) = rnn.forward_unbatched(input, None)?;
//! ```

pub mod elman;
mod grid;

pub use elman::ElmanRnn;
