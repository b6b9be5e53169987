use super::{Cluster, Composite, Filter, FilterKind, Gru, Steer};
use crate::{activation::Activation, error_model::ErrorScaling, Result};

/// The unit of topology.
///
/// A layer declares its static facts (`size`, `bias`, `weights_size`,
/// `errors_size`) and carries its own `activate`/`check` behavior; it never
/// owns runtime data. The layout resolver turns a sequence of these facts
/// into offsets, and the network walks them in order.
#[derive(Clone, Debug)]
pub enum Layer {
    Cluster(Cluster),
    Gru(Gru),
    Composite(Composite),
    Filter(Filter),
    Steer(Steer),
}
use Layer::*;

impl Layer {
    /// A passthrough cluster with input defaults (bias, kept accumulators).
    pub fn input(size: usize) -> Self {
        Cluster(super::Cluster::input(size))
    }

    /// A passthrough cluster with output defaults (no bias, cleared
    /// accumulators).
    pub fn output(size: usize) -> Self {
        Cluster(super::Cluster::output(size))
    }

    pub fn cluster(size: usize, act: Activation, bias: bool, clear: bool) -> Self {
        Cluster(super::Cluster::new(size, act, bias, clear))
    }

    /// A GRU cluster with the stock gate setup.
    pub fn gru(size: usize) -> Self {
        Gru(super::Gru::new(size))
    }

    pub fn gru_with(size: usize, act: Activation, gate_bias: bool) -> Self {
        Gru(super::Gru::with_gates(size, act, gate_bias))
    }

    pub fn composite<I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Layer>,
    {
        Ok(Composite(super::Composite::new(parts)?))
    }

    pub fn shift_normalize(inner: Layer) -> Self {
        Filter(super::Filter::new(FilterKind::ShiftNormalize, inner))
    }

    pub fn ratio(inner: Layer) -> Self {
        Filter(super::Filter::new(FilterKind::Ratio, inner))
    }

    pub fn softmax(inner: Layer) -> Self {
        Filter(super::Filter::new(FilterKind::Softmax, inner))
    }

    pub fn steer(target: Layer, realized: Layer, scaling: ErrorScaling) -> Result<Self> {
        Ok(Steer(super::Steer::new(target, realized, scaling)?))
    }

    /// The element count of this layer.
    pub fn size(&self) -> usize {
        match self {
            Cluster(l) => l.size(),
            Gru(l) => l.size(),
            Composite(l) => l.size(),
            Filter(l) => l.size(),
            Steer(l) => l.size(),
        }
    }

    /// Whether this layer emits one bias unit into the next layer's
    /// accumulators.
    pub fn bias(&self) -> bool {
        match self {
            Cluster(l) => l.bias(),
            Gru(l) => l.bias(),
            Composite(l) => l.bias(),
            Filter(l) => l.bias(),
            Steer(l) => l.bias(),
        }
    }

    /// The number of private (intra-layer) weights this layer owns.
    pub fn weights_size(&self) -> usize {
        match self {
            Cluster(_) => 0,
            Gru(l) => l.weights_size(),
            Composite(l) => l.weights_size(),
            Filter(l) => l.weights_size(),
            Steer(l) => l.weights_size(),
        }
    }

    /// The number of error slots this layer fills on `check`.
    pub fn errors_size(&self) -> usize {
        match self {
            Cluster(_) | Gru(_) => 0,
            Composite(l) => l.errors_size(),
            Filter(l) => l.errors_size(),
            Steer(l) => l.errors_size(),
        }
    }

    /// Applies the layer's activation rule to its slice of the accumulator
    /// and state arrays. `weights` is the layer's private weight slice,
    /// exactly `weights_size` long.
    pub fn activate(&self, acc: &mut [f32], states: &mut [f32], weights: &[f32]) {
        match self {
            Cluster(l) => l.activate(acc, states),
            Gru(l) => l.activate(acc, states, weights),
            Composite(l) => l.activate(acc, states, weights),
            Filter(l) => l.activate(acc, states, weights),
            Steer(l) => l.activate(acc, states, weights),
        }
    }

    /// Fills the layer's error slice from the current state slice. Layers
    /// without error slots do nothing.
    pub fn check(&self, states: &[f32], errors: &mut [f32]) {
        match self {
            Cluster(_) | Gru(_) => {}
            Composite(l) => l.check(states, errors),
            Filter(l) => l.check(states, errors),
            Steer(l) => l.check(states, errors),
        }
    }
}
