//! Error type shared by all cube and cube list operations

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

use crate::cube::Shape;

/// Errors returned by cube, cube list and minimization operations
///
/// Illegal cubes are not errors: they are valid values that list-level
/// operations filter out.
#[derive(Error, Debug)]
pub enum Error {
    /// Growing a cube list or a label table failed
    #[error("allocation failure")]
    Allocation,

    /// A cube or a cube list built for one problem shape was used with another
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Shape of the problem the operation runs on
        expected: Shape,
        /// Shape of the offending cube or list
        found: Shape,
    },

    /// An input, output or cube index is out of range
    #[error("{what} index {index} out of range (count is {count})")]
    IndexError {
        /// Kind of index
        what: &'static str,
        /// Requested index
        index: usize,
        /// Number of valid indices
        count: usize,
    },

    /// A cube string or a cube listing could not be parsed
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number, starting at 1; 0 for a single cube string
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// The exact minimizer exceeded one of its configured bounds
    #[error("{what} limit of {limit} exceeded")]
    LimitExceeded {
        /// Bounded quantity
        what: &'static str,
        /// Configured bound
        limit: usize,
    },

    /// The SAT back-end reported a failure
    #[error("SAT solver failure: {0}")]
    Solver(String),

    /// Reading or writing a cube listing failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::Allocation
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
