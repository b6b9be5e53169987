use super::Layer;
use crate::{NetErr, Result};

/// A horizontal concatenation of descriptors inside one layer.
///
/// The parts keep their own behavior; the composite only routes each one to
/// its sub-slice of the layer's regions, computing the same running offsets
/// the top-level layout resolver computes across layers.
#[derive(Clone, Debug)]
pub struct Composite {
    parts: Vec<Layer>,
}

impl Composite {
    /// Returns a new `Composite`.
    ///
    /// # Errors
    /// Returns `NetErr::EmptyComposite` when no parts are given.
    pub fn new<I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Layer>,
    {
        let parts: Vec<Layer> = parts.into_iter().collect();
        if parts.is_empty() {
            return Err(NetErr::EmptyComposite);
        }
        Ok(Self { parts })
    }

    pub fn size(&self) -> usize {
        self.parts.iter().map(Layer::size).sum()
    }

    pub fn bias(&self) -> bool {
        self.parts.iter().any(Layer::bias)
    }

    pub fn weights_size(&self) -> usize {
        self.parts.iter().map(Layer::weights_size).sum()
    }

    pub fn errors_size(&self) -> usize {
        self.parts.iter().map(Layer::errors_size).sum()
    }

    pub fn activate(&self, acc: &mut [f32], states: &mut [f32], weights: &[f32]) {
        let mut so = 0;
        let mut wo = 0;
        for part in &self.parts {
            let sz = part.size();
            let ws = part.weights_size();
            part.activate(
                &mut acc[so..so + sz],
                &mut states[so..so + sz],
                &weights[wo..wo + ws],
            );
            so += sz;
            wo += ws;
        }
    }

    pub fn check(&self, states: &[f32], errors: &mut [f32]) {
        let mut so = 0;
        let mut eo = 0;
        for part in &self.parts {
            let sz = part.size();
            let es = part.errors_size();
            part.check(&states[so..so + sz], &mut errors[eo..eo + es]);
            so += sz;
            eo += es;
        }
    }
}
