//! Error types and result alias for the crate.
//!
//! The kernel itself never fails: degenerate inputs turn into NaN/Inf. These
//! variants are raised by the checked entry point and the deformer, which
//! validate inputs before the kernel runs.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("{set} point set is empty")]
    EmptyInput { set: &'static str },

    #[error("polarity weight {index} is degenerate ({value})")]
    DegeneratePolarity { index: usize, value: f64 },

    #[error("closest magnet point {magnet} and object point {object} coincide")]
    DegenerateGeometry { magnet: usize, object: usize },

    #[error("expected {expected} polarity weights, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{set} point {index} has a non-finite coordinate")]
    NonFinite { set: &'static str, index: usize },

    #[error("invalid field strength {0}")]
    InvalidStrength(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build offload thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
