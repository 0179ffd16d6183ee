// src/buffer/core.rs
//! Core buffer structure, constructors, and element access
//!
//! This module provides the fundamental [`Buffer`] type. Capacity management
//! lives in `capacity.rs`, mutation in `ops.rs`.

use crate::config::CapacityPolicy;
use crate::error::Result;
use crate::raw::{PartialInit, RawBlock};
use log::debug;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use zeroize::Zeroize;

/// A growable, contiguous sequence of `T`.
///
/// Slots `[0, len)` hold live values; slots `[len, capacity)` are allocated
/// but uninitialized. Capacity doubles when a push finds the buffer full and
/// is cut back to `max(1, len * 2)` once a removal leaves no more than a
/// quarter of the slots live (see [`CapacityPolicy`]).
///
/// Every operation that allocates returns a [`Result`] and is all-or-nothing:
/// on failure the buffer keeps its previous length, capacity, and values.
///
/// # Examples
///
/// ```
/// use seqbuf::Buffer;
/// # use seqbuf::ContainerError;
///
/// let mut buf = Buffer::new();
/// buf.push_back(1)?;
/// buf.push_back(2)?;
/// buf.insert(1, 5)?;
/// assert_eq!(buf.as_slice(), &[1, 5, 2]);
/// assert_eq!(buf.pop_back(), 2);
/// # Ok::<(), ContainerError>(())
/// ```
pub struct Buffer<T> {
    /// Owned storage; knows its capacity but not which slots are live
    pub(crate) block: RawBlock<T>,
    /// Number of live values, occupying slots `[0, len)`
    pub(crate) len: usize,
    /// Growth and shrink policy
    pub(crate) policy: CapacityPolicy,
}

impl<T> Buffer<T> {
    /// Creates an empty buffer. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    ///
    /// let buf: Buffer<u8> = Buffer::new();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_policy(CapacityPolicy::default())
    }

    /// Creates an empty buffer that grows and shrinks according to `policy`.
    ///
    /// # Panics
    ///
    /// Panics if `policy` fails [`CapacityPolicy::validate`].
    pub fn with_policy(policy: CapacityPolicy) -> Self {
        if let Err(reason) = policy.validate() {
            panic!("invalid capacity policy: {}", reason);
        }
        Self {
            block: RawBlock::empty(),
            len: 0,
            policy,
        }
    }

    /// Creates an empty buffer with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let buf: Buffer<u64> = Buffer::with_capacity(16)?;
    /// assert_eq!(buf.capacity(), 16);
    /// assert!(buf.is_empty());
    /// # Ok::<(), ContainerError>(())
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = Self::new();
        buf.block = RawBlock::allocate(capacity)?;
        Ok(buf)
    }

    /// Creates a buffer holding `len` default values in exactly `len` slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let buf: Buffer<i32> = Buffer::with_len(3)?;
    /// assert_eq!(buf.as_slice(), &[0, 0, 0]);
    /// assert_eq!(buf.capacity(), 3);
    /// # Ok::<(), ContainerError>(())
    /// ```
    pub fn with_len(len: usize) -> Result<Self>
    where
        T: Default,
    {
        let mut buf = Self::with_capacity(len)?;
        buf.resize(len)?;
        Ok(buf)
    }

    /// Number of live values.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots, live or not.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Returns `true` if the buffer holds no values.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The growth and shrink policy in effect.
    #[inline]
    pub fn policy(&self) -> &CapacityPolicy {
        &self.policy
    }

    /// Returns the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    ///
    /// let buf: Buffer<i32> = (0..5).collect();
    /// assert_eq!(*buf.at(3), 3);
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> &T {
        assert!(
            index < self.len,
            "index {} out of bounds (len {})",
            index,
            self.len
        );
        unsafe { self.get_unchecked(index) }
    }

    /// Returns the value at `index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        assert!(
            index < self.len,
            "index {} out of bounds (len {})",
            index,
            self.len
        );
        unsafe { self.get_unchecked_mut(index) }
    }

    /// Returns the value at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns the value at `index` mutably, or `None` past the end.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns a slice of all live values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { self.block.as_slice(self.len) }
    }

    /// Returns a mutable slice of all live values.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { self.block.as_mut_slice(self.len) }
    }

    /// Deep-copies the buffer, reporting allocation failure instead of
    /// aborting.
    ///
    /// The copy has the same capacity and policy. If a `clone` panics, the
    /// values cloned so far are dropped and the source is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be allocated.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        let mut copy = Self::with_policy(self.policy);
        copy.block = RawBlock::allocate(self.capacity())?;
        let mut guard = unsafe { PartialInit::new(copy.block.slot(0)) };
        for value in self.as_slice() {
            guard.push(value.clone());
        }
        copy.len = guard.commit();
        Ok(copy)
    }

    /// Securely zeroes every live value and all storage, then releases it.
    ///
    /// Afterwards the buffer is empty with zero capacity.
    ///
    /// Only the current block is wiped. Blocks released by earlier growth or
    /// shrinking were freed without zeroing, so a buffer meant for secrets
    /// should reserve its final capacity up front under
    /// [`CapacityPolicy::never_shrink`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let mut keys: Buffer<[u8; 32]> = Buffer::new();
    /// keys.push_back([0x42; 32])?;
    /// keys.burn();
    /// assert_eq!(keys.capacity(), 0);
    /// # Ok::<(), ContainerError>(())
    /// ```
    pub fn burn(&mut self)
    where
        T: Zeroize,
    {
        debug!("burning buffer: {} values, {} slots", self.len, self.capacity());
        self.zeroize();
        self.block = RawBlock::empty();
    }
}

impl<T: Zeroize> Zeroize for Buffer<T> {
    /// Zeroes and drops every live value, then zeroes the whole allocation.
    /// Capacity is kept. Blocks released by earlier reallocations are not
    /// touched.
    fn zeroize(&mut self) {
        self.as_mut_slice().iter_mut().for_each(Zeroize::zeroize);
        self.clear();
        unsafe { self.block.wipe() };
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe { self.block.drop_slots(0, len) };
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| err.escalate())
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Buffer<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T> IndexMut<usize> for Buffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<T> AsRef<[T]> for Buffer<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for Buffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Buffer<T> {}

impl<T: Hash> Hash for Buffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}
