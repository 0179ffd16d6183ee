// src/lib.rs
//! # Sequence Container Library
//!
//! Generic sequence containers with explicit storage management and strong
//! failure guarantees.
//!
//! Features:
//! - [`Buffer`]: growable contiguous array with amortized doubling growth,
//!   policy-driven shrinking, and all-or-nothing reallocation
//! - Panic-safe construction: a panicking `Clone`, `Default` or closure never
//!   leaves a half-built buffer or leaks a value
//! - Fallible allocation surfaced as [`ContainerError`] instead of aborting
//! - [`Stack`]: last-in-first-out adapter over [`Buffer`]
//! - [`SinglyLinkedList`] and [`DoublyLinkedList`] over a generational node
//!   slab, with stable [`NodeId`] handles for O(1) removal
//! - Secure wiping of element memory through the `zeroize` crate
//!
//! ```
//! use seqbuf::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut buf = Buffer::new();
//! for i in 0..1000 {
//!     buf.push_back(i)?;
//! }
//! assert_eq!(buf.len(), 1000);
//! assert_eq!(*buf.at(500), 500);
//!
//! buf.resize(200)?;
//! assert_eq!(buf.len(), 200);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::missing_safety_doc)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod list;
pub(crate) mod raw;
pub mod stack;

// Re-export main types
pub use buffer::Buffer;
pub use config::CapacityPolicy;
pub use error::{ContainerError, Result, ResultExt};
pub use list::{DoublyLinkedList, NodeId, SinglyLinkedList};
pub use stack::Stack;

/// Commonly used imports.
pub mod prelude {
    pub use crate::buffer::Buffer;
    pub use crate::config::CapacityPolicy;
    pub use crate::error::{ContainerError, Result, ResultExt};
    pub use crate::list::{DoublyLinkedList, NodeId, SinglyLinkedList};
    pub use crate::stack::Stack;
}
