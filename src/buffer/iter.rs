// src/buffer/iter.rs
//! Iteration and collection support for [`Buffer`]

use super::core::Buffer;
use crate::raw::RawBlock;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

/// An owning iterator over the values of a [`Buffer`].
///
/// Values not yet yielded are dropped along with the iterator.
pub struct IntoIter<T> {
    block: RawBlock<T>,
    /// Live slots are `[front, back)`
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// The values not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // Slots before `front` were moved out and must not be borrowed.
        unsafe { std::slice::from_raw_parts(self.block.slot(self.front), self.back - self.front) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = unsafe { self.block.read(self.front) };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { self.block.read(self.back) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (front, back) = (self.front, self.back);
        self.front = back;
        unsafe { self.block.drop_slots(front, back - front) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for Buffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let len = mem::replace(&mut self.len, 0);
        let block = mem::replace(&mut self.block, RawBlock::empty());
        IntoIter {
            block,
            front: 0,
            back: len,
        }
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Buffer<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    /// # Panics
    ///
    /// Panics (or aborts through the allocation error handler) if storage
    /// cannot be allocated.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buf = Buffer::new();
        buf.extend(iter);
        buf
    }
}

impl<T> Extend<T> for Buffer<T> {
    /// Reserves for the iterator's lower size bound up front, then appends
    /// one value at a time.
    ///
    /// # Panics
    ///
    /// Panics (or aborts through the allocation error handler) if storage
    /// cannot be allocated.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.ensure_capacity_for(self.len.saturating_add(lower)) {
            err.escalate();
        }
        for value in iter {
            if let Err(err) = self.push_back(value) {
                err.escalate();
            }
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Buffer<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_collect_and_iterate() {
        let buf: Buffer<u32> = (1..=5).collect();
        assert_eq!(buf.capacity(), 5);
        let doubled: Vec<u32> = buf.iter().map(|v| v * 2).collect();
        assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_into_iter_both_ends() {
        let buf: Buffer<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let mut iter = buf.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(iter.next_back().as_deref(), Some("d"));
        assert_eq!(iter.as_slice(), &["b", "c"]);
        assert_eq!(iter.collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_into_iter_as_slice_tracks_front() {
        let buf: Buffer<String> = (0..5).map(|i| i.to_string()).collect();
        let mut iter = buf.into_iter();
        for expected in ["0", "1", "2"] {
            assert_eq!(iter.next().as_deref(), Some(expected));
        }
        assert_eq!(iter.as_slice(), &["3", "4"]);
        iter.next_back();
        iter.next();
        assert!(iter.as_slice().is_empty());

        let empty: Buffer<String> = Buffer::new();
        assert!(empty.into_iter().as_slice().is_empty());
    }

    #[test]
    fn test_into_iter_drops_remainder() {
        let marker = Rc::new(());
        let buf: Buffer<Rc<()>> = (0..6).map(|_| Rc::clone(&marker)).collect();
        let mut iter = buf.into_iter();
        let first = iter.next();
        assert_eq!(Rc::strong_count(&marker), 7);
        drop(iter);
        assert_eq!(Rc::strong_count(&marker), 2);
        drop(first);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_iter_mut_by_ref() {
        let mut buf: Buffer<i32> = (0..4).collect();
        for value in &mut buf {
            *value *= 10;
        }
        let total: i32 = (&buf).into_iter().sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_extend_copied_refs() {
        let mut buf: Buffer<u8> = Buffer::new();
        buf.extend(&[1u8, 2, 3]);
        buf.extend([4u8, 5]);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5]);
    }
}
