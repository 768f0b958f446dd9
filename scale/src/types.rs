//! Codec implementations for common types

pub mod dictionary;
pub mod primitives;
pub mod sequence;
pub mod tuple;
