// src/buffer/ops.rs
//! Buffer mutation: append, remove, positional insert/erase, and resize

use super::core::Buffer;
use crate::error::{ContainerError, Result};
use crate::raw::PartialInit;

impl<T> Buffer<T> {
    /// Appends `value`, growing the storage if the buffer is full.
    ///
    /// # Errors
    ///
    /// Returns an error if growth fails; the buffer is unchanged and `value`
    /// is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let mut buf = Buffer::new();
    /// for i in 0..1000 {
    ///     buf.push_back(i)?;
    /// }
    /// assert_eq!(buf.len(), 1000);
    /// assert_eq!(buf[500], 500);
    /// # Ok::<(), ContainerError>(())
    /// ```
    #[inline]
    pub fn push_back(&mut self, value: T) -> Result<()> {
        self.ensure_capacity_for_push()?;
        unsafe { self.push_back_unchecked(value) };
        Ok(())
    }

    /// Appends the value produced by `make`, constructing it directly in the
    /// new slot once room has been secured.
    ///
    /// `make` is not called if growth fails. If `make` panics the buffer
    /// keeps its previous length.
    ///
    /// # Errors
    ///
    /// Returns an error if growth fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let mut names: Buffer<String> = Buffer::new();
    /// let slot = names.emplace_back(|| String::with_capacity(64))?;
    /// slot.push_str("ada");
    /// assert_eq!(names[0], "ada");
    /// # Ok::<(), ContainerError>(())
    /// ```
    pub fn emplace_back<F>(&mut self, make: F) -> Result<&mut T>
    where
        F: FnOnce() -> T,
    {
        self.ensure_capacity_for_push()?;
        let index = self.len;
        unsafe {
            self.block.slot(index).write(make());
            self.len += 1;
            Ok(self.get_unchecked_mut(index))
        }
    }

    /// Removes and returns the last value, then applies the shrink policy.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    #[inline]
    pub fn pop_back(&mut self) -> T {
        assert!(self.len > 0, "pop_back on empty Buffer");
        self.len -= 1;
        let value = unsafe { self.block.read(self.len) };
        self.maybe_shrink();
        value
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Errors
    ///
    /// Returns an error if growth fails; the buffer is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let mut buf: Buffer<i32> = (0..5).collect();
    /// buf.insert(2, 99)?;
    /// assert_eq!(buf.as_slice(), &[0, 1, 99, 2, 3, 4]);
    /// # Ok::<(), ContainerError>(())
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        assert!(
            index <= self.len,
            "insert index {} out of bounds (len {})",
            index,
            self.len
        );
        self.ensure_capacity_for_push()?;
        unsafe {
            self.block.shift(index, index + 1, self.len - index);
            self.block.write(index, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the value at `index`, shifting `(index, len)` one
    /// slot left, then applies the shrink policy.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "erase index {} out of bounds (len {})",
            index,
            self.len
        );
        let value = unsafe {
            let value = self.block.read(index);
            self.block.shift(index + 1, index, self.len - index - 1);
            value
        };
        self.len -= 1;
        self.maybe_shrink();
        value
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    ///
    /// Shrinking drops the tail and applies the shrink policy. Growing past
    /// the capacity reserves `max(new_len, capacity * growth_factor)` first.
    ///
    /// # Errors
    ///
    /// Returns an error if growth fails; the buffer is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqbuf::Buffer;
    /// # use seqbuf::ContainerError;
    ///
    /// let mut buf: Buffer<i32> = (0..1000).collect();
    /// buf.resize(200)?;
    /// assert_eq!(buf.len(), 200);
    ///
    /// buf.resize(1200)?;
    /// assert_eq!(buf[199], 199);
    /// assert_eq!(buf[200], 0);
    /// # Ok::<(), ContainerError>(())
    /// ```
    pub fn resize(&mut self, new_len: usize) -> Result<()>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes to `new_len`, filling new slots with values from `fill`.
    ///
    /// If `fill` panics, the values it already produced are dropped and the
    /// buffer keeps its previous length.
    ///
    /// # Errors
    ///
    /// Returns an error if growth fails; the buffer is unchanged.
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F) -> Result<()>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.ensure_capacity_for(new_len)?;
        let mut guard = unsafe { PartialInit::new(self.block.slot(self.len)) };
        for _ in self.len..new_len {
            guard.push(fill());
        }
        self.len += guard.commit();
        Ok(())
    }

    /// Drops every value past `new_len`, then applies the shrink policy.
    /// Does nothing if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        self.drop_tail(new_len);
        self.maybe_shrink();
    }

    /// Drops every value. Capacity is kept.
    pub fn clear(&mut self) {
        self.drop_tail(0);
    }

    /// Appends a clone of every value in `values`.
    ///
    /// All-or-nothing: if growth fails or a `clone` panics, the buffer keeps
    /// its previous length and values, and any clones already made are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if growth fails.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()>
    where
        T: Clone,
    {
        let needed = self
            .len
            .checked_add(values.len())
            .ok_or(ContainerError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        self.ensure_capacity_for(needed)?;
        let mut guard = unsafe { PartialInit::new(self.block.slot(self.len)) };
        for value in values {
            guard.push(value.clone());
        }
        self.len += guard.commit();
        Ok(())
    }

    /// Shortens `len` before dropping so a panicking `Drop` cannot cause a
    /// double drop.
    fn drop_tail(&mut self, new_len: usize) {
        let old_len = self.len;
        self.len = new_len;
        unsafe { self.block.drop_slots(new_len, old_len - new_len) };
    }
}
