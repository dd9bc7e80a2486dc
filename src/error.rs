use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpiralError {
    #[error("memory allocation refused")]
    Memory,

    #[error("input needs {0} segments, more than a figure can hold")]
    CapacityExceeded(usize),

    #[error("serialised data is shorter than the file header")]
    BadHeaderSize,

    #[error("serialised data has a bad magic number")]
    BadMagic,

    #[error("serialised data version is not supported")]
    BadVersion,

    #[error("serialised data size does not match its segment count")]
    BadDataSize,

    #[error("refinement method not implemented: {0}")]
    Unimplemented(&'static str),

    #[error("refinement cancelled by progress callback")]
    Cancelled,

    #[error("precondition failed: {0}")]
    PreconditionFailed(&'static str),
}

impl From<TryReserveError> for SpiralError {
    fn from(_: TryReserveError) -> Self {
        SpiralError::Memory
    }
}
