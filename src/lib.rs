pub mod activation;
pub mod config;
pub mod error;
pub mod error_model;
pub mod layers;
pub mod layout;
pub mod math;
pub mod network;
pub mod training;

pub use activation::Activation;
pub use error::{NetErr, Result};
pub use error_model::{ErrorAggregation, ErrorScaling};
pub use layers::Layer;
pub use layout::Layout;
pub use network::Network;
pub use training::LearningRule;

/// The element type shared by accumulators, states, weights and errors.
pub type Elem = f32;
