mod cluster;
mod composite;
mod filter;
mod gru;
mod layer;
mod steer;

pub use cluster::Cluster;
pub use composite::Composite;
pub use filter::{Filter, FilterKind};
pub use gru::Gru;
pub use layer::Layer;
pub use steer::Steer;
