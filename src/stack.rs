// src/stack.rs
//! Last-in-first-out adapter over [`Buffer`].

use crate::buffer::Buffer;
use crate::error::Result;
use std::fmt;
use zeroize::Zeroize;

/// A LIFO stack backed by a [`Buffer`].
///
/// Every operation delegates to the buffer, so pushes grow by doubling and
/// pops give memory back under the buffer's shrink policy.
///
/// # Examples
///
/// ```
/// use seqbuf::Stack;
/// # use seqbuf::ContainerError;
///
/// let mut st = Stack::new();
/// st.push(2)?;
/// st.push(4)?;
/// assert_eq!(*st.top(), 4);
/// assert_eq!(st.pop(), 4);
/// assert_eq!(*st.top(), 2);
/// # Ok::<(), ContainerError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    buffer: Buffer<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack. Does not allocate.
    pub fn new() -> Self {
        Self {
            buffer: Buffer::new(),
        }
    }

    /// Creates an empty stack with room for `capacity` values.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buffer: Buffer::with_capacity(capacity)?,
        })
    }

    /// Pushes `value` on top.
    ///
    /// # Errors
    ///
    /// Returns an error if growth fails; the stack is unchanged.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<()> {
        self.buffer.push_back(value)
    }

    /// Removes and returns the top value.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> T {
        assert!(!self.buffer.is_empty(), "pop on empty Stack");
        self.buffer.pop_back()
    }

    /// Returns the top value.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    #[inline]
    pub fn top(&self) -> &T {
        assert!(!self.buffer.is_empty(), "top on empty Stack");
        self.buffer.at(self.buffer.len() - 1)
    }

    /// Returns the top value mutably.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    #[inline]
    pub fn top_mut(&mut self) -> &mut T {
        assert!(!self.buffer.is_empty(), "top on empty Stack");
        let last = self.buffer.len() - 1;
        self.buffer.at_mut(last)
    }

    /// Returns `true` if the stack holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of values on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of values the stack can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Drops every value. Capacity is kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterates from the bottom of the stack to the top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buffer.iter()
    }

    /// Securely zeroes every value and releases the storage.
    pub fn burn(&mut self)
    where
        T: Zeroize,
    {
        self.buffer.burn();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("values", &self.buffer)
            .finish()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// The last value yielded ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            buffer: iter.into_iter().collect(),
        }
    }
}

impl<T> From<Buffer<T>> for Stack<T> {
    /// The buffer's last value becomes the top.
    fn from(buffer: Buffer<T>) -> Self {
        Self { buffer }
    }
}
