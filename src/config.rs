//! Declarative topology descriptions.
//!
//! A [`NetworkConfig`] is a plain data mirror of a topology, suitable for
//! serialization; the adapter turns it into the runtime [`Layer`] tree and
//! a built [`Network`]. Misconfigurations surface when adapting, before any
//! runtime array exists.

use serde::{Deserialize, Serialize};

use crate::{
    activation::Activation,
    error_model::{ErrorAggregation, ErrorScaling},
    layers::Layer,
    network::Network,
    Result,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LayerConfig {
    Input {
        size: usize,
    },
    Output {
        size: usize,
    },
    Cluster {
        size: usize,
        act: Activation,
        bias: bool,
        clear: bool,
    },
    Gru {
        size: usize,
        act: Activation,
        gate_bias: bool,
    },
    Composite {
        parts: Vec<LayerConfig>,
    },
    ShiftNormalize {
        inner: Box<LayerConfig>,
    },
    Ratio {
        inner: Box<LayerConfig>,
    },
    Softmax {
        inner: Box<LayerConfig>,
    },
    Steer {
        target: Box<LayerConfig>,
        realized: Box<LayerConfig>,
        scaling: ErrorScaling,
    },
}

impl LayerConfig {
    /// Adapts the description into a runtime layer.
    ///
    /// # Errors
    /// Surfaces the same construction errors as building the layer by hand
    /// (steer size mismatch, empty composite).
    pub fn adapt(self) -> Result<Layer> {
        Ok(match self {
            LayerConfig::Input { size } => Layer::input(size),
            LayerConfig::Output { size } => Layer::output(size),
            LayerConfig::Cluster {
                size,
                act,
                bias,
                clear,
            } => Layer::cluster(size, act, bias, clear),
            LayerConfig::Gru {
                size,
                act,
                gate_bias,
            } => Layer::gru_with(size, act, gate_bias),
            LayerConfig::Composite { parts } => {
                let parts: Result<Vec<Layer>> =
                    parts.into_iter().map(LayerConfig::adapt).collect();
                Layer::composite(parts?)?
            }
            LayerConfig::ShiftNormalize { inner } => Layer::shift_normalize(inner.adapt()?),
            LayerConfig::Ratio { inner } => Layer::ratio(inner.adapt()?),
            LayerConfig::Softmax { inner } => Layer::softmax(inner.adapt()?),
            LayerConfig::Steer {
                target,
                realized,
                scaling,
            } => Layer::steer(target.adapt()?, realized.adapt()?, scaling)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub aggregation: ErrorAggregation,
    pub layers: Vec<LayerConfig>,
}

impl NetworkConfig {
    /// Adapts every layer description and builds the network.
    pub fn build(self) -> Result<Network> {
        let layers: Result<Vec<Layer>> =
            self.layers.into_iter().map(LayerConfig::adapt).collect();
        Network::new(self.aggregation, layers?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetErr;

    #[test]
    fn json_config_builds_a_network() {
        let json = r#"{
            "aggregation": "SumOfSquare",
            "layers": [
                { "Input": { "size": 3 } },
                { "Gru": { "size": 5, "act": "Tanh", "gate_bias": false } },
                { "Output": { "size": 2 } }
            ]
        }"#;

        let config: NetworkConfig = serde_json::from_str(json).unwrap();
        let net = config.build().unwrap();
        assert_eq!(net.inputs_size(), 3);
        assert_eq!(net.outputs_size(), 2);
        assert_eq!(net.layout().weights_size(), 62);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = NetworkConfig {
            aggregation: ErrorAggregation::PseudoHuber { slope: 0.5 },
            layers: vec![
                LayerConfig::Input { size: 2 },
                LayerConfig::Softmax {
                    inner: Box::new(LayerConfig::Output { size: 2 }),
                },
            ],
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: NetworkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.aggregation, config.aggregation);
        assert_eq!(back.layers.len(), 2);
    }

    #[test]
    fn bad_steer_config_fails_when_adapting() {
        let config = LayerConfig::Steer {
            target: Box::new(LayerConfig::Input { size: 4 }),
            realized: Box::new(LayerConfig::Input { size: 2 }),
            scaling: ErrorScaling::Pct100,
        };
        assert_eq!(
            config.adapt().unwrap_err(),
            NetErr::SteerSizeMismatch {
                target: 4,
                realized: 2
            }
        );
    }
}
