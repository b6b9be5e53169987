use crate::activation::Activation;

/// A recurrent neuron cluster based on the GRU cell.
///
/// The gates of all elements live in one contiguous private weight slice in
/// structure-of-arrays order, 6 weights per element, or 9 when each gate
/// carries its own bias. The state array doubles as the recurrent memory:
/// the previous step's state feeds the gates of the next one.
#[derive(Clone, Debug)]
pub struct Gru {
    size: usize,
    act: Activation,
    reset_act: Activation,
    update_act: Activation,
    gate_bias: bool,
    bias: bool,
    clear: bool,
}

impl Gru {
    /// Returns a new `Gru` with the stock gate setup: `tanh` candidate,
    /// fast-sigmoid gates, no per-gate bias, one layer bias unit, cleared
    /// accumulators.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            act: Activation::Tanh,
            reset_act: Activation::FastSigmoid,
            update_act: Activation::FastSigmoid,
            gate_bias: false,
            bias: true,
            clear: true,
        }
    }

    /// Returns a new `Gru` with an explicit candidate activation and gate
    /// bias choice.
    pub fn with_gates(size: usize, act: Activation, gate_bias: bool) -> Self {
        Self {
            size,
            act,
            gate_bias,
            ..Self::new(size)
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bias(&self) -> bool {
        self.bias
    }

    /// Private weights per element: 3 gates of 2 weights each, plus one bias
    /// weight per gate when enabled.
    pub fn weights_size(&self) -> usize {
        (if self.gate_bias { 9 } else { 6 }) * self.size
    }

    pub fn activate(&self, acc: &mut [f32], states: &mut [f32], weights: &[f32]) {
        let stride = if self.gate_bias { 9 } else { 6 };

        for (i, w) in weights.chunks_exact(stride).enumerate() {
            let a = acc[i];
            let s = states[i];

            let (update, candidate) = if self.gate_bias {
                let reset = self.reset_act.f(w[0] * a + w[1] * s + w[2]);
                let update = self.update_act.f(w[3] * a + w[4] * s + w[5]);
                let candidate = self.act.f(w[6] * a + w[7] * (reset * s) + w[8]);
                (update, candidate)
            } else {
                let reset = self.reset_act.f(w[0] * a + w[1] * s);
                let update = self.update_act.f(w[2] * a + w[3] * s);
                let candidate = self.act.f(w[4] * a + w[5] * (reset * s));
                (update, candidate)
            };

            states[i] = (1.0 - update) * s + update * candidate;
        }

        if self.clear {
            for a in acc.iter_mut() {
                *a = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn zero_weights_keep_state_at_zero() {
        // With all gates at 0 the update gate saturates to 1 and the
        // candidate is tanh(0) = 0, so the state collapses to 0.
        let g = Gru::new(4);
        let mut acc = [5.0, -3.0, 0.1, 100.0];
        let mut states = [0.2, 0.4, 0.6, 0.8];
        let weights = vec![0.0; g.weights_size()];
        g.activate(&mut acc, &mut states, &weights);
        assert_eq!(states, [0.0; 4]);
        assert_eq!(acc, [0.0; 4]);
    }

    #[test]
    fn single_element_cell_matches_hand_computation() {
        let g = Gru::new(1);
        let w = [0.5, -0.25, 0.75, 0.1, -0.3, 0.2];
        let mut acc = [2.0];
        let mut states = [1.0];
        g.activate(&mut acc, &mut states, &w);

        let a = 2.0f32;
        let s = 1.0f32;
        let reset = 1.0 / (1.0 + (w[0] * a + w[1] * s).abs());
        let update = 1.0 / (1.0 + (w[2] * a + w[3] * s).abs());
        let candidate = (w[4] * a + w[5] * (reset * s)).tanh();
        let expected = (1.0 - update) * s + update * candidate;

        assert!(approx_eq(states[0], expected));
    }

    #[test]
    fn gate_bias_adds_three_weights_per_element() {
        assert_eq!(Gru::new(5).weights_size(), 30);
        assert_eq!(
            Gru::with_gates(5, Activation::Tanh, true).weights_size(),
            45
        );
    }
}
