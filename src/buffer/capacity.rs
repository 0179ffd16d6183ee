// src/buffer/capacity.rs
//! Capacity management: explicit reservation and the grow/shrink policy
//!
//! Every reallocation goes through `relocate`, which builds the new block
//! completely before the old one is released. Moving a value in Rust is a
//! bitwise copy that cannot fail, so allocating the new block is the only
//! step that can go wrong, and it happens before anything is touched.

use super::core::Buffer;
use crate::error::{ContainerError, Result};
use crate::raw::RawBlock;
use log::{debug, trace, warn};

impl<T> Buffer<T> {
    /// Grows the storage to exactly `new_capacity` slots.
    ///
    /// Unlike [`Vec::reserve`], the argument is the total capacity wanted,
    /// not the additional room. Requests at or below the current capacity
    /// are no-ops; this never shrinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be allocated, in which case
    /// the buffer is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let mut buf: Buffer<u32> = Buffer::new();
    /// buf.reserve(100)?;
    /// assert_eq!(buf.capacity(), 100);
    ///
    /// buf.reserve(10)?;
    /// assert_eq!(buf.capacity(), 100);
    /// # Ok::<(), ContainerError>(())
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.relocate(new_capacity)
    }

    /// Releases every idle slot, leaving `capacity == len`.
    ///
    /// An empty buffer gives its storage back entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the smaller block cannot be allocated, in which
    /// case the buffer is unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.capacity() == self.len {
            return Ok(());
        }
        debug!(
            "shrinking buffer to fit: {} -> {} slots",
            self.capacity(),
            self.len
        );
        if self.len == 0 {
            self.block = RawBlock::empty();
            return Ok(());
        }
        self.relocate(self.len)
    }

    /// Makes room for one more value according to the growth policy.
    pub(crate) fn ensure_capacity_for_push(&mut self) -> Result<()> {
        if self.len < self.capacity() {
            return Ok(());
        }
        let target = self
            .policy
            .grown(self.capacity())
            .ok_or(ContainerError::CapacityOverflow {
                requested: self.capacity().saturating_mul(self.policy.growth_factor),
            })?;
        self.reserve(target)
    }

    /// Makes room for `needed` values in total, growing by at least the
    /// policy's factor so repeated bulk appends stay amortized.
    pub(crate) fn ensure_capacity_for(&mut self, needed: usize) -> Result<()> {
        if needed <= self.capacity() {
            return Ok(());
        }
        let target = self
            .policy
            .grown(self.capacity())
            .map_or(needed, |grown| grown.max(needed));
        self.reserve(target)
    }

    /// Gives memory back after a removal when the policy says there is
    /// enough slack.
    ///
    /// The removed value has already been handed out, so a failed
    /// reallocation keeps the current block and is only logged.
    pub(crate) fn maybe_shrink(&mut self) {
        let Some(target) = self.policy.shrunk(self.len, self.capacity()) else {
            return;
        };
        if let Err(err) = self.relocate(target) {
            warn!(
                "keeping {} slots for {} values, shrink to {} failed: {}",
                self.capacity(),
                self.len,
                target,
                err
            );
        }
    }

    /// Moves every live value into a fresh block of `new_capacity` slots and
    /// releases the old block.
    fn relocate(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity >= self.len);
        let mut fresh = RawBlock::allocate(new_capacity)?;
        unsafe { self.block.move_into(&mut fresh, self.len) };
        trace!(
            "relocated {} values: {} -> {} slots",
            self.len,
            self.capacity(),
            new_capacity
        );
        // The old block only deallocates; its slots are dead after the move.
        self.block = fresh;
        Ok(())
    }
}
