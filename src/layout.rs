use crate::{layers::Layer, NetErr, Result};

/// The resolved flat memory layout of a topology.
///
/// Four offset tables, one entry per layer, locate every layer's region in
/// the accumulator/state array, the weight array and the error array. All
/// of it is a pure function of the layers' static facts, resolved once at
/// network construction and constant afterwards.
///
/// The weight array interleaves regions layer by layer: layer 0's private
/// weights, the external block feeding layer 1, layer 1's private weights,
/// the block feeding layer 2, and so on. The last layer has no outgoing
/// external block.
#[derive(Clone, Debug)]
pub struct Layout {
    size_offsets: Vec<usize>,
    internal_weight_offsets: Vec<usize>,
    external_weight_offsets: Vec<usize>,
    error_offsets: Vec<usize>,

    states_size: usize,
    internal_weights_size: usize,
    external_weights_size: usize,
    errors_size: usize,
    inputs_size: usize,
    outputs_size: usize,
}

impl Layout {
    /// Resolves the offset tables for an ordered list of layers.
    ///
    /// # Errors
    /// Returns `NetErr::EmptyTopology` for a zero-length topology.
    pub fn resolve(layers: &[Layer]) -> Result<Self> {
        if layers.is_empty() {
            return Err(NetErr::EmptyTopology);
        }

        let n = layers.len();
        let mut size_offsets = Vec::with_capacity(n);
        let mut internal_weight_offsets = Vec::with_capacity(n);
        let mut external_weight_offsets = Vec::with_capacity(n);
        let mut error_offsets = Vec::with_capacity(n);

        let mut so = 0;
        let mut iwo = 0;
        let mut eo = 0;
        for (i, layer) in layers.iter().enumerate() {
            if i > 0 {
                let prev = &layers[i - 1];
                iwo += (prev.size() + prev.bias() as usize) * layer.size() + prev.weights_size();
            }
            size_offsets.push(so);
            internal_weight_offsets.push(iwo);
            // The external block feeding the next layer sits right after
            // this layer's private weights.
            external_weight_offsets.push(iwo + layer.weights_size());
            error_offsets.push(eo);

            so += layer.size();
            eo += layer.errors_size();
        }

        let internal_weights_size = layers.iter().map(Layer::weights_size).sum();
        let external_weights_size = layers
            .windows(2)
            .map(|pair| (pair[0].size() + pair[0].bias() as usize) * pair[1].size())
            .sum();

        Ok(Self {
            size_offsets,
            internal_weight_offsets,
            external_weight_offsets,
            error_offsets,
            states_size: so,
            internal_weights_size,
            external_weights_size,
            errors_size: eo,
            inputs_size: layers[0].size(),
            outputs_size: layers[n - 1].size(),
        })
    }

    pub fn len(&self) -> usize {
        self.size_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size_offsets.is_empty()
    }

    /// Offset of layer `i` into the accumulator and state arrays.
    pub fn size_offset(&self, i: usize) -> usize {
        self.size_offsets[i]
    }

    /// Offset of layer `i`'s private weight region.
    pub fn internal_weight_offset(&self, i: usize) -> usize {
        self.internal_weight_offsets[i]
    }

    /// Offset of the external weight block connecting layer `i` to layer
    /// `i + 1`. Meaningless for the last layer, whose block is empty.
    pub fn external_weight_offset(&self, i: usize) -> usize {
        self.external_weight_offsets[i]
    }

    /// Offset of layer `i`'s error slots.
    pub fn error_offset(&self, i: usize) -> usize {
        self.error_offsets[i]
    }

    /// Total element count, sizing both the accumulator and state arrays.
    pub fn states_size(&self) -> usize {
        self.states_size
    }

    pub fn internal_weights_size(&self) -> usize {
        self.internal_weights_size
    }

    pub fn external_weights_size(&self) -> usize {
        self.external_weights_size
    }

    /// Total weight count, external plus internal.
    pub fn weights_size(&self) -> usize {
        self.internal_weights_size + self.external_weights_size
    }

    pub fn errors_size(&self) -> usize {
        self.errors_size
    }

    pub fn inputs_size(&self) -> usize {
        self.inputs_size
    }

    pub fn outputs_size(&self) -> usize {
        self.outputs_size
    }
}
