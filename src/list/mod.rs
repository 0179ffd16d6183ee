// src/list/mod.rs
//! Linked lists over a generational node slab

pub mod doubly;
pub(crate) mod slab;
pub mod singly;

pub use doubly::DoublyLinkedList;
pub use singly::SinglyLinkedList;
pub use slab::NodeId;
