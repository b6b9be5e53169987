use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, NetErr>;

/// All errors that can occur when building or operating a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetErr {
    /// The topology has no layers at all.
    EmptyTopology,
    /// A comparison layer pairs a target and a realisation of incompatible sizes.
    SteerSizeMismatch { target: usize, realized: usize },
    /// A composite was declared without any parts.
    EmptyComposite,
    /// The destination buffer cannot hold a full state dump.
    SaveBufferTooSmall { got: usize, expected: usize },
    /// The source buffer is shorter than a full state dump.
    RestoreBufferTooSmall { got: usize, expected: usize },
    /// A replacement weight array has the wrong length.
    WeightLenMismatch { got: usize, expected: usize },
}

impl Display for NetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetErr::EmptyTopology => {
                write!(f, "a network needs at least one layer")
            }
            NetErr::SteerSizeMismatch { target, realized } => write!(
                f,
                "steer layer pairs a target of size {target} with a realisation of size {realized}, \
                 they must match or the target must be a single element"
            ),
            NetErr::EmptyComposite => {
                write!(f, "a composite layer needs at least one part")
            }
            NetErr::SaveBufferTooSmall { got, expected } => write!(
                f,
                "save buffer holds {got} bytes but a full dump needs {expected}"
            ),
            NetErr::RestoreBufferTooSmall { got, expected } => write!(
                f,
                "restore buffer holds {got} bytes but a full dump needs {expected}"
            ),
            NetErr::WeightLenMismatch { got, expected } => write!(
                f,
                "replacement weights have length {got}, the layout needs {expected}"
            ),
        }
    }
}

impl Error for NetErr {}
