// src/buffer/unsafe_ops.rs
//! Unchecked (unsafe) buffer operations for hot loops

use super::core::Buffer;

impl<T> Buffer<T> {
    /// Appends `value` without checking capacity.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `self.len() < self.capacity()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let mut buf = Buffer::with_capacity(4)?;
    /// for i in 0..4 {
    ///     unsafe { buf.push_back_unchecked(i) };
    /// }
    /// assert_eq!(buf.as_slice(), &[0, 1, 2, 3]);
    /// # Ok::<(), ContainerError>(())
    /// ```
    #[inline(always)]
    pub unsafe fn push_back_unchecked(&mut self, value: T) {
        debug_assert!(
            self.len < self.capacity(),
            "push_back_unchecked: len {} == capacity {}",
            self.len,
            self.capacity()
        );
        unsafe { self.block.write(self.len, value) };
        self.len += 1;
    }

    /// Returns the value at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `index < self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "get_unchecked: index {} >= len {}",
            index,
            self.len
        );
        unsafe { &*self.block.slot(index) }
    }

    /// Returns the value at `index` mutably without bounds checking.
    ///
    /// # Safety
    ///
    /// Caller MUST guarantee: `index < self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.block.slot(index) }
    }
}
