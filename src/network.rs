use ndarray::{linalg::general_mat_vec_mul, ArrayView1, ArrayView2, ArrayViewMut1};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error_model::ErrorAggregation,
    layers::Layer,
    layout::Layout,
    training::{LearningRule, TrainContext},
    NetErr, Result,
};

const COUNTER_BYTES: usize = std::mem::size_of::<u64>();

/// The single mutable runtime object of a fixed topology.
///
/// Owns the four flat arrays the layout resolver sized, the scalar
/// aggregated error and the step counters. All arrays keep their length for
/// the network's whole lifetime; no allocation happens after construction.
///
/// A `Network` is not safe for concurrent mutation; callers wanting
/// parallel evaluation run independent instances.
pub struct Network {
    layers: Vec<Layer>,
    layout: Layout,
    aggregation: ErrorAggregation,

    accumulators: Vec<f32>,
    states: Vec<f32>,
    weights: Vec<f32>,
    errors: Vec<f32>,

    error: f32,
    step: u64,
    last_checked: u64,
    last_learned: u64,
}

impl Network {
    /// Builds a network from an ordered topology, resolves its layout and
    /// initializes the weights with the deterministic ramp.
    ///
    /// # Errors
    /// Returns `NetErr::EmptyTopology` for a zero-length topology. Layer
    /// misconfigurations (steer size mismatches, empty composites) are
    /// caught earlier, when the layers themselves are built.
    pub fn new(aggregation: ErrorAggregation, layers: Vec<Layer>) -> Result<Self> {
        let layout = Layout::resolve(&layers)?;
        log::info!(
            "resolved topology: {} layer(s), {} elements, {} weights, {} error slots",
            layers.len(),
            layout.states_size(),
            layout.weights_size(),
            layout.errors_size()
        );

        let mut net = Self {
            accumulators: vec![0.0; layout.states_size()],
            states: vec![0.0; layout.states_size()],
            weights: vec![0.0; layout.weights_size()],
            errors: vec![0.0; layout.errors_size()],
            layers,
            layout,
            aggregation,
            error: 0.0,
            step: 0,
            last_checked: 0,
            last_learned: 0,
        };
        net.set_weights();
        Ok(net)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn inputs_size(&self) -> usize {
        self.layout.inputs_size()
    }

    pub fn outputs_size(&self) -> usize {
        self.layout.outputs_size()
    }

    /// The input boundary: the first layer's slice of the live accumulator
    /// array. Write raw input values here before `activate`.
    pub fn inputs(&mut self) -> &mut [f32] {
        &mut self.accumulators[..self.layout.inputs_size()]
    }

    /// The output boundary: the last layer's slice of the live state array.
    /// Read results here after `activate`.
    pub fn outputs(&self) -> &[f32] {
        &self.states[self.layout.states_size() - self.layout.outputs_size()..]
    }

    pub fn states(&self) -> &[f32] {
        &self.states
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn errors(&self) -> &[f32] {
        &self.errors
    }

    /// The aggregated scalar error as of the last `check`.
    pub fn error(&self) -> f32 {
        self.error
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn last_checked(&self) -> u64 {
        self.last_checked
    }

    pub fn last_learned(&self) -> u64 {
        self.last_learned
    }

    /// Runs one full forward pass and advances the step counter.
    ///
    /// Layers run in topological order: each applies its own activation to
    /// its accumulator/state slices, then contributes densely into the next
    /// layer's accumulators through its external weight block. The last
    /// layer has no outgoing block.
    pub fn activate(&mut self) {
        for i in 0..self.layers.len() {
            let layer = &self.layers[i];
            let so = self.layout.size_offset(i);
            let sz = layer.size();
            let iwo = self.layout.internal_weight_offset(i);
            let ws = layer.weights_size();

            layer.activate(
                &mut self.accumulators[so..so + sz],
                &mut self.states[so..so + sz],
                &self.weights[iwo..iwo + ws],
            );

            if i + 1 < self.layers.len() {
                self.contribute(i);
            }
        }

        self.step += 1;
        log::trace!("activated step {}", self.step);
    }

    /// Dense (optionally biased) contribution from layer `i`'s states into
    /// layer `i + 1`'s accumulators.
    fn contribute(&mut self, i: usize) {
        let layer = &self.layers[i];
        let so = self.layout.size_offset(i);
        let sz = layer.size();
        let nso = self.layout.size_offset(i + 1);
        let nsz = self.layers[i + 1].size();
        let ewo = self.layout.external_weight_offset(i);

        let block = &self.weights[ewo..ewo + (sz + layer.bias() as usize) * nsz];
        let (main, bias) = block.split_at(sz * nsz);

        // The block is row-major source x destination, the same view trick
        // the dense layer kernels use over a flat parameter slice.
        let w = ArrayView2::from_shape((sz, nsz), main).unwrap();
        let s = ArrayView1::from(&self.states[so..so + sz]);
        let mut a = ArrayViewMut1::from(&mut self.accumulators[nso..nso + nsz]);
        general_mat_vec_mul(1.0, &w.t(), &s, 1.0, &mut a);

        if layer.bias() {
            a += &ArrayView1::from(bias);
        }
    }

    /// Determines per-layer errors and the aggregated error from the
    /// current state. Safe to repeat within a step.
    pub fn check(&mut self) {
        for i in 0..self.layers.len() {
            let layer = &self.layers[i];
            let so = self.layout.size_offset(i);
            let eo = self.layout.error_offset(i);
            layer.check(
                &self.states[so..so + layer.size()],
                &mut self.errors[eo..eo + layer.errors_size()],
            );
        }

        self.error = self.aggregation.run(&self.errors);
        self.last_checked = self.step;
        log::trace!("checked step {}: error {}", self.step, self.error);
    }

    /// Hands the current arrays to a learning rule, refreshing the error
    /// data first if it is stale. A step that was already learned is a
    /// no-op, so calling this repeatedly per step is harmless.
    pub fn train<R: LearningRule>(&mut self, rule: &mut R) {
        if self.step <= self.last_learned {
            return;
        }
        if self.last_checked < self.step {
            self.check();
        }

        rule.update(TrainContext {
            layout: &self.layout,
            accumulators: &self.accumulators,
            states: &self.states,
            errors: &self.errors,
            error: self.error,
            weights: &mut self.weights,
        });

        self.last_learned = self.step;
        log::debug!("learned step {}", self.step);
    }

    /// Resets the weights to the deterministic ramp from -1 to +1 across
    /// the whole weight array.
    pub fn set_weights(&mut self) {
        let n = self.weights.len();
        for (i, w) in self.weights.iter_mut().enumerate() {
            *w = -1.0 + i as f32 * (2.0 / n as f32);
        }
    }

    /// Replaces the weight array wholesale.
    ///
    /// # Errors
    /// Returns `NetErr::WeightLenMismatch` when the replacement has the
    /// wrong length.
    pub fn set_weights_from(&mut self, weights: &[f32]) -> Result<()> {
        if weights.len() != self.weights.len() {
            return Err(NetErr::WeightLenMismatch {
                got: weights.len(),
                expected: self.weights.len(),
            });
        }
        self.weights.copy_from_slice(weights);
        Ok(())
    }

    /// Fills the weights uniformly from (-1, 1) with a seeded generator, so
    /// a given seed reproduces the same network.
    pub fn set_weights_random(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for w in self.weights.iter_mut() {
            *w = rng.random_range(-1.0..1.0);
        }
    }

    /// Bytes needed for a full `save` dump: states, weights and the three
    /// step counters. Accumulators, error slots and the scalar error are
    /// transient and stay out of the dump.
    pub fn save_bytes(&self) -> usize {
        (self.states.len() + self.weights.len()) * std::mem::size_of::<f32>()
            + 3 * COUNTER_BYTES
    }

    /// Dumps the persistent state into `dst` and returns the bytes written.
    ///
    /// # Errors
    /// Returns `NetErr::SaveBufferTooSmall` when `dst` cannot hold a full
    /// dump; nothing is written in that case.
    pub fn save(&self, dst: &mut [u8]) -> Result<usize> {
        let need = self.save_bytes();
        if dst.len() < need {
            return Err(NetErr::SaveBufferTooSmall {
                got: dst.len(),
                expected: need,
            });
        }

        let mut at = 0;
        for arr in [self.states.as_slice(), self.weights.as_slice()] {
            let bytes: &[u8] = bytemuck::cast_slice(arr);
            dst[at..at + bytes.len()].copy_from_slice(bytes);
            at += bytes.len();
        }
        for counter in [self.step, self.last_checked, self.last_learned] {
            dst[at..at + COUNTER_BYTES].copy_from_slice(&counter.to_ne_bytes());
            at += COUNTER_BYTES;
        }
        Ok(at)
    }

    /// Restores the persistent state from a buffer produced by `save` on a
    /// network with the same topology. A buffer from a different topology
    /// restores garbage; provenance is the caller's responsibility.
    ///
    /// # Errors
    /// Returns `NetErr::RestoreBufferTooSmall` when `src` is shorter than a
    /// full dump.
    pub fn restore(&mut self, src: &[u8]) -> Result<()> {
        let need = self.save_bytes();
        if src.len() < need {
            return Err(NetErr::RestoreBufferTooSmall {
                got: src.len(),
                expected: need,
            });
        }

        let mut at = 0;
        for arr in [self.states.as_mut_slice(), self.weights.as_mut_slice()] {
            let bytes: &mut [u8] = bytemuck::cast_slice_mut(arr);
            let len = bytes.len();
            bytes.copy_from_slice(&src[at..at + len]);
            at += len;
        }
        for counter in [
            &mut self.step,
            &mut self.last_checked,
            &mut self.last_learned,
        ] {
            let mut raw = [0u8; COUNTER_BYTES];
            raw.copy_from_slice(&src[at..at + COUNTER_BYTES]);
            *counter = u64::from_ne_bytes(raw);
            at += COUNTER_BYTES;
        }
        Ok(())
    }
}

/// Rule-of-thumb hidden layer size for a dataset of `samples` observations;
/// `alpha` is usually between 2 and 8.
pub fn hidden_layer_size(inputs: usize, outputs: usize, samples: usize, alpha: usize) -> usize {
    samples / (alpha * (inputs + outputs))
}

/// A stock input -> GRU -> output network with a rule-of-thumb hidden size
/// and sum-of-squares error aggregation.
pub fn simple_gru(inputs: usize, outputs: usize) -> Result<Network> {
    let hidden = hidden_layer_size(inputs, outputs, 1024, 2);
    Network::new(
        ErrorAggregation::SumOfSquare,
        vec![
            Layer::input(inputs),
            Layer::gru(hidden),
            Layer::output(outputs),
        ],
    )
}
