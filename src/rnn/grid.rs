//! Write-once storage for every `(timestep, layer)` hidden state of one forward pass.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::error::{Result, RnnError};

/// `[seq_len, num_layers]` grid of `[batch, hidden]` hidden states.
///
/// Each slot starts empty and may be written exactly once. Coverage is
/// tracked by the slot itself, so an unfilled cell can never be mistaken for
/// a computed value.
#[derive(Debug)]
pub(crate) struct HiddenStateGrid<B: Backend> {
    seq_len: usize,
    num_layers: usize,
    cells: Vec<Option<Tensor<B, 2>>>,
}

impl<B: Backend> HiddenStateGrid<B> {
    pub(crate) fn new(seq_len: usize, num_layers: usize) -> Self {
        Self {
            seq_len,
            num_layers,
            cells: vec![None; seq_len * num_layers],
        }
    }

    fn slot(&self, timestep: usize, layer: usize) -> Result<usize> {
        if timestep < self.seq_len && layer < self.num_layers {
            Ok(timestep * self.num_layers + layer)
        } else {
            Err(RnnError::InternalConsistency {
                timestep,
                layer,
                reason: "cell outside the grid",
            })
        }
    }

    pub(crate) fn write(
        &mut self,
        timestep: usize,
        layer: usize,
        hidden: Tensor<B, 2>,
    ) -> Result<()> {
        let slot = self.slot(timestep, layer)?;
        let cell = &mut self.cells[slot];
        if cell.is_some() {
            return Err(RnnError::InternalConsistency {
                timestep,
                layer,
                reason: "cell written twice",
            });
        }
        *cell = Some(hidden);
        Ok(())
    }

    pub(crate) fn read(&self, timestep: usize, layer: usize) -> Result<Tensor<B, 2>> {
        let slot = self.slot(timestep, layer)?;
        self.cells[slot]
            .clone()
            .ok_or(RnnError::InternalConsistency {
                timestep,
                layer,
                reason: "cell read before it was written",
            })
    }

    #[cfg(test)]
    pub(crate) fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Checks full coverage, then extracts
    /// `(top layer over all timesteps [T, B, H], every layer at the last timestep [L, B, H])`.
    pub(crate) fn into_outputs(self) -> Result<(Tensor<B, 3>, Tensor<B, 3>)> {
        if let Some(slot) = self.cells.iter().position(Option::is_none) {
            return Err(RnnError::InternalConsistency {
                timestep: slot / self.num_layers,
                layer: slot % self.num_layers,
                reason: "cell never written",
            });
        }

        let top = self.num_layers - 1;
        let last = self.seq_len - 1;
        let outputs = (0..self.seq_len)
            .map(|t| self.read(t, top))
            .collect::<Result<Vec<_>>>()?;
        let final_hidden = (0..self.num_layers)
            .map(|l| self.read(last, l))
            .collect::<Result<Vec<_>>>()?;

        Ok((Tensor::stack(outputs, 0), Tensor::stack(final_hidden, 0)))
    }
}
