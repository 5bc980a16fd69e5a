//! Error types for the kernel engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Linear expansion not built: call build_linear_expansion first")]
    ExpansionNotReady,

    #[error("Kernel does not provide a linear expansion")]
    ExpansionUnsupported,

    #[error("Sequence index out of range: {index} (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Sequence store is empty")]
    EmptyStore,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, KernelError>;
