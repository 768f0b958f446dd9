//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("truncated input")]
    TruncatedInput,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("invalid compact")]
    InvalidCompact,
    #[error("invalid bool")]
    InvalidBool,
    #[error("invalid enum tag: {0}")]
    InvalidEnum(u8),
    #[error("invalid data in {0}: {1}")]
    Invalid(&'static str, &'static str), // context, message
}
