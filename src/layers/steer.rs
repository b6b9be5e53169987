use super::Layer;
use crate::{error_model::ErrorScaling, NetErr, Result};

/// Steers realised values toward target values.
///
/// The layer concatenates a target descriptor and a realised descriptor; on
/// `check` it scales each realised element's deviation from its paired
/// target and writes it to the error slice. A single-element target is
/// broadcast as the reference for every realised element; otherwise the two
/// sides pair index for index and must have equal sizes.
#[derive(Clone, Debug)]
pub struct Steer {
    target: Box<Layer>,
    realized: Box<Layer>,
    scaling: ErrorScaling,
}

impl Steer {
    /// Returns a new `Steer`.
    ///
    /// # Errors
    /// Returns `NetErr::SteerSizeMismatch` when the target has more than one
    /// element and its size differs from the realised side's.
    pub fn new(target: Layer, realized: Layer, scaling: ErrorScaling) -> Result<Self> {
        if target.size() != 1 && target.size() != realized.size() {
            return Err(NetErr::SteerSizeMismatch {
                target: target.size(),
                realized: realized.size(),
            });
        }
        Ok(Self {
            target: Box::new(target),
            realized: Box::new(realized),
            scaling,
        })
    }

    pub fn size(&self) -> usize {
        self.target.size() + self.realized.size()
    }

    pub fn bias(&self) -> bool {
        self.target.bias() || self.realized.bias()
    }

    pub fn weights_size(&self) -> usize {
        self.target.weights_size() + self.realized.weights_size()
    }

    /// One error slot per realised element, plus whatever the two sides
    /// produce on their own.
    pub fn errors_size(&self) -> usize {
        self.realized.size() + self.target.errors_size() + self.realized.errors_size()
    }

    pub fn activate(&self, acc: &mut [f32], states: &mut [f32], weights: &[f32]) {
        let t = self.target.size();
        let tw = self.target.weights_size();
        let (t_acc, r_acc) = acc.split_at_mut(t);
        let (t_states, r_states) = states.split_at_mut(t);
        let (t_weights, r_weights) = weights.split_at(tw);
        self.target.activate(t_acc, t_states, t_weights);
        self.realized.activate(r_acc, r_states, r_weights);
    }

    pub fn check(&self, states: &[f32], errors: &mut [f32]) {
        let t = self.target.size();
        let u = self.realized.size();

        if t == 1 {
            for i in 0..u {
                errors[i] = self.scaling.scale(states[1 + i], states[0]);
            }
        } else {
            for i in 0..t {
                errors[i] = self.scaling.scale(states[t + i], states[i]);
            }
        }
    }
}
