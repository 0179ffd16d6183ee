// src/raw.rs
//! Owned raw storage for [`Buffer`](crate::Buffer).
//!
//! [`RawBlock`] owns an allocation of exactly `capacity` slots and nothing
//! else: it never constructs, reads, or drops an element on its own. Which
//! slots are live is the caller's bookkeeping, and every slot accessor is
//! `unsafe` with that contract spelled out.
//!
//! [`PartialInit`] tracks a run of freshly written slots and drops them if
//! construction unwinds before [`PartialInit::commit`] is reached.

use crate::error::{ContainerError, Result};
use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::{self, NonNull};
use zeroize::Zeroize;

/// An exclusively owned block of uninitialized slots for `T`.
pub(crate) struct RawBlock<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// The block is uniquely owned; sharing rules follow the element type.
unsafe impl<T: Send> Send for RawBlock<T> {}
unsafe impl<T: Sync> Sync for RawBlock<T> {}

impl<T> RawBlock<T> {
    /// A block with no slots and no allocation.
    #[inline]
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `capacity` slots.
    ///
    /// Zero-sized element types never touch the allocator; their capacity is
    /// purely logical.
    ///
    /// # Errors
    ///
    /// [`ContainerError::CapacityOverflow`] if the slot count has no valid
    /// layout, [`ContainerError::AllocFailed`] if the allocator returns null.
    pub(crate) fn allocate(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Ok(Self::empty());
        }
        let layout = Self::layout(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(ContainerError::alloc_failed(layout))?;
        Ok(Self {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity).map_err(|_| ContainerError::CapacityOverflow {
            requested: capacity,
        })
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    fn holds_allocation(&self) -> bool {
        self.cap != 0 && mem::size_of::<T>() != 0
    }

    /// Pointer to slot `index`; `index == capacity` yields the end pointer.
    ///
    /// # Safety
    ///
    /// `index <= self.capacity()`.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap, "slot {} past capacity {}", index, self.cap);
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Constructs `value` into slot `index`.
    ///
    /// # Safety
    ///
    /// `index < self.capacity()` and the slot holds no live value.
    #[inline(always)]
    pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.cap);
        unsafe { self.slot(index).write(value) }
    }

    /// Moves the value out of slot `index`, leaving the slot dead.
    ///
    /// # Safety
    ///
    /// `index < self.capacity()`, the slot is live, and the caller stops
    /// treating it as live.
    #[inline(always)]
    pub(crate) unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.cap);
        unsafe { self.slot(index).read() }
    }

    /// Drops the live values in `[start, start + count)`.
    ///
    /// # Safety
    ///
    /// Every slot in the range is live and is treated as dead afterwards.
    pub(crate) unsafe fn drop_slots(&mut self, start: usize, count: usize) {
        debug_assert!(start + count <= self.cap);
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.slot(start), count));
        }
    }

    /// Moves `count` values from `from..` to `to..`; the ranges may overlap.
    ///
    /// # Safety
    ///
    /// Both ranges lie within capacity and the source range is live. After
    /// the call the destination is live and the non-overlapping part of the
    /// source is dead.
    #[inline]
    pub(crate) unsafe fn shift(&mut self, from: usize, to: usize, count: usize) {
        debug_assert!(from + count <= self.cap && to + count <= self.cap);
        unsafe { ptr::copy(self.slot(from), self.slot(to), count) }
    }

    /// Moves the first `count` values into the start of `dest`.
    ///
    /// # Safety
    ///
    /// Slots `[0, count)` of `self` are live and are dead afterwards;
    /// `dest` has at least `count` slots, none of them live.
    pub(crate) unsafe fn move_into(&mut self, dest: &mut RawBlock<T>, count: usize) {
        debug_assert!(count <= self.cap && count <= dest.cap);
        unsafe { ptr::copy_nonoverlapping(self.slot(0), dest.slot(0), count) }
    }

    /// Views the first `len` slots as initialized values.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` are live.
    #[inline(always)]
    pub(crate) unsafe fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.cap);
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), len) }
    }

    /// Mutable view of the first `len` slots.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` are live.
    #[inline(always)]
    pub(crate) unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.cap);
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), len) }
    }

    /// Overwrites every byte of the allocation with zeros.
    ///
    /// # Safety
    ///
    /// No slot is live.
    pub(crate) unsafe fn wipe(&mut self) {
        if !self.holds_allocation() {
            return;
        }
        let bytes = self.cap * mem::size_of::<T>();
        let raw = unsafe {
            std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<MaybeUninit<u8>>(), bytes)
        };
        raw.zeroize();
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        if !self.holds_allocation() {
            return;
        }
        // The layout was valid when the block was allocated.
        if let Ok(layout) = Self::layout(self.cap) {
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) }
        }
    }
}

/// Rollback guard for a run of slots being constructed in order.
///
/// Values written through [`push`](Self::push) are dropped when the guard is
/// dropped, which is what happens if a constructor panics part-way through.
/// [`commit`](Self::commit) hands ownership of the run to the caller.
pub(crate) struct PartialInit<T> {
    base: *mut T,
    written: usize,
}

impl<T> PartialInit<T> {
    /// # Safety
    ///
    /// `base` points at enough unoccupied slots for every value that will be
    /// pushed, and the allocation outlives the guard.
    #[inline]
    pub(crate) unsafe fn new(base: *mut T) -> Self {
        Self { base, written: 0 }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        // SAFETY: room was guaranteed by the caller of `new`.
        unsafe { self.base.add(self.written).write(value) };
        self.written += 1;
    }

    /// Keeps the constructed values and returns how many there are.
    #[inline]
    pub(crate) fn commit(self) -> usize {
        let written = self.written;
        mem::forget(self);
        written
    }
}

impl<T> Drop for PartialInit<T> {
    fn drop(&mut self) {
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.base, self.written)) }
    }
}
