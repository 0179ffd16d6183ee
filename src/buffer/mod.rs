// src/buffer/mod.rs
//! Growable contiguous buffer with strong failure guarantees

pub(crate) mod capacity;
pub mod core;
pub mod iter;
pub(crate) mod ops;
pub(crate) mod unsafe_ops;

pub use self::core::Buffer;
pub use iter::IntoIter;
