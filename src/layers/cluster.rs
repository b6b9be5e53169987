use crate::activation::Activation;

/// A plain elementwise neuron cluster.
///
/// Multiple heterogeneous clusters can share one layer through a
/// [`Composite`](super::Composite); a cluster never spans layers.
#[derive(Clone, Debug)]
pub struct Cluster {
    size: usize,
    act: Activation,
    bias: bool,
    clear: bool,
}

impl Cluster {
    /// Returns a new `Cluster`.
    ///
    /// # Arguments
    /// * `size` - The element count.
    /// * `act` - The activation applied to every element.
    /// * `bias` - Whether the cluster emits one bias unit into the next layer.
    /// * `clear` - Whether the accumulator slice is zeroed after activation.
    pub fn new(size: usize, act: Activation, bias: bool, clear: bool) -> Self {
        Self {
            size,
            act,
            bias,
            clear,
        }
    }

    /// A cluster with input defaults: bias on, accumulators kept across steps
    /// so callers can overwrite them in place.
    pub fn input(size: usize) -> Self {
        Self::new(size, Activation::Passthrough, true, false)
    }

    /// A cluster with output defaults: no bias (nothing consumes it), cleared
    /// accumulators.
    pub fn output(size: usize) -> Self {
        Self::new(size, Activation::Passthrough, false, true)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bias(&self) -> bool {
        self.bias
    }

    pub fn activate(&self, acc: &mut [f32], states: &mut [f32]) {
        for i in 0..self.size {
            states[i] = self.act.f(acc[i]);
        }
        if self.clear {
            // Separate wipe pass; an elementwise store, not a byte wipe, so
            // element types carrying status bits stay valid.
            for a in acc.iter_mut() {
                *a = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_copies_and_keeps_accumulators() {
        let c = Cluster::input(3);
        let mut acc = [1.0, -2.0, 0.5];
        let mut states = [0.0; 3];
        c.activate(&mut acc, &mut states);
        assert_eq!(states, [1.0, -2.0, 0.5]);
        assert_eq!(acc, [1.0, -2.0, 0.5]);
    }

    #[test]
    fn clearing_cluster_wipes_consumed_input() {
        let c = Cluster::output(2);
        let mut acc = [3.0, 4.0];
        let mut states = [0.0; 2];
        c.activate(&mut acc, &mut states);
        assert_eq!(states, [3.0, 4.0]);
        assert_eq!(acc, [0.0, 0.0]);
    }

    #[test]
    fn activation_is_applied_elementwise() {
        let c = Cluster::new(2, Activation::Relu, false, true);
        let mut acc = [-1.5, 2.5];
        let mut states = [0.0; 2];
        c.activate(&mut acc, &mut states);
        assert_eq!(states, [0.0, 2.5]);
    }
}
