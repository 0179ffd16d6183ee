// tests/alloc_failure.rs
//! Allocation failure paths, driven by a global allocator that refuses one
//! chosen allocation size on the current thread

use log::{Level, LevelFilter, Log, Metadata, Record};
use proptest::prelude::*;
use seqbuf::prelude::*;
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;

thread_local! {
    /// Allocation size in bytes to refuse; zero refuses nothing
    static REFUSE_BYTES: Cell<usize> = const { Cell::new(0) };
    static WARNINGS: Cell<usize> = const { Cell::new(0) };
}

struct RefusingAlloc;

unsafe impl GlobalAlloc for RefusingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let refuse = REFUSE_BYTES.try_with(Cell::get).unwrap_or(0);
        if refuse != 0 && layout.size() == refuse {
            return ptr::null_mut();
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: RefusingAlloc = RefusingAlloc;

/// Counts warnings per thread without allocating.
struct WarningCounter;

impl Log for WarningCounter {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            let _ = WARNINGS.try_with(|w| w.set(w.get() + 1));
        }
    }

    fn flush(&self) {}
}

static LOGGER: WarningCounter = WarningCounter;

fn init_logging() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Warn);
}

fn warnings() -> usize {
    WARNINGS.with(Cell::get)
}

/// Runs `f` while allocations of exactly `bytes` bytes fail.
fn refusing<R>(bytes: usize, f: impl FnOnce() -> R) -> R {
    REFUSE_BYTES.with(|r| r.set(bytes));
    let result = f();
    REFUSE_BYTES.with(|r| r.set(0));
    result
}

fn full_buffer() -> Buffer<u64> {
    let mut buf = Buffer::with_capacity(16).unwrap();
    for i in 0..16 {
        buf.push_back(i).unwrap();
    }
    buf
}

#[test]
fn push_back_growth_failure_leaves_buffer_untouched() {
    init_logging();
    let mut buf = full_buffer();
    let ptr = buf.as_ptr();

    // 32 slots of u64
    let err = refusing(256, || buf.push_back(99)).unwrap_err();
    assert_eq!(err, ContainerError::AllocFailed { bytes: 256, align: 8 });
    assert_eq!(err.to_string(), "Allocation of 256 bytes (align 8) failed");
    assert_eq!(buf.len(), 16);
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.as_ptr(), ptr);
    assert_eq!(buf.as_slice(), (0..16).collect::<Vec<u64>>().as_slice());

    buf.push_back(99).unwrap();
    assert_eq!(buf.capacity(), 32);
    assert_eq!(buf[16], 99);
}

#[test]
fn emplace_and_extend_growth_failure() {
    init_logging();
    let mut buf = full_buffer();

    let err = refusing(256, || buf.emplace_back(|| 7).map(|v| *v)).unwrap_err();
    assert_eq!(err, ContainerError::AllocFailed { bytes: 256, align: 8 });
    assert_eq!(buf.len(), 16);

    // 20 values round up to the next growth step of 32 slots
    let err = refusing(256, || buf.extend_from_slice(&[1, 2, 3, 4])).unwrap_err();
    assert_eq!(err, ContainerError::AllocFailed { bytes: 256, align: 8 });
    assert_eq!(buf.len(), 16);
    assert_eq!(buf.capacity(), 16);
}

#[test]
fn reserve_failure_leaves_buffer_untouched() {
    init_logging();
    let mut buf = full_buffer();

    let err = refusing(800, || buf.reserve(100)).unwrap_err();
    assert_eq!(err, ContainerError::AllocFailed { bytes: 800, align: 8 });
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.as_slice(), (0..16).collect::<Vec<u64>>().as_slice());

    buf.reserve(100).unwrap();
    assert_eq!(buf.capacity(), 100);
}

#[test]
fn constructor_and_clone_failures() {
    init_logging();
    let err = refusing(24, || Buffer::<u64>::with_capacity(3)).unwrap_err();
    assert_eq!(err, ContainerError::AllocFailed { bytes: 24, align: 8 });

    // The clone copies the source capacity: 16 slots of u64
    let buf = full_buffer();
    let err = refusing(128, || buf.try_clone()).unwrap_err();
    assert_eq!(err, ContainerError::AllocFailed { bytes: 128, align: 8 });
    assert_eq!(buf.len(), 16);

    let copy = buf.try_clone().unwrap();
    assert_eq!(copy, buf);
}

#[test]
fn failed_shrink_after_pop_keeps_block() {
    init_logging();
    let mut buf: Buffer<u64> = Buffer::with_capacity(16).unwrap();
    for i in 0..5 {
        buf.push_back(i).unwrap();
    }
    let ptr = buf.as_ptr();
    let before = warnings();

    // len 4 <= 16 / 4 wants 8 slots
    let popped = refusing(64, || buf.pop_back());
    assert_eq!(popped, 4);
    assert_eq!(buf.len(), 4);
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.as_ptr(), ptr);
    assert_eq!(buf.as_slice(), &[0, 1, 2, 3]);
    assert_eq!(warnings(), before + 1);

    // len 3 wants 6 slots and the allocator cooperates again
    assert_eq!(buf.pop_back(), 3);
    assert_eq!(buf.capacity(), 6);
    assert_eq!(buf.as_slice(), &[0, 1, 2]);
}

#[test]
fn failed_shrink_after_erase_and_truncate() {
    init_logging();
    let mut buf: Buffer<u64> = Buffer::with_capacity(16).unwrap();
    for i in 0..5 {
        buf.push_back(i).unwrap();
    }

    let removed = refusing(64, || buf.erase(0));
    assert_eq!(removed, 0);
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);

    // len 2 wants 4 slots
    refusing(32, || buf.truncate(2));
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.as_slice(), &[1, 2]);

    buf.truncate(1);
    assert_eq!(buf.capacity(), 2);
    assert_eq!(buf.as_slice(), &[1]);
}

#[test]
fn stack_push_failure() {
    init_logging();
    let mut st: Stack<u64> = Stack::with_capacity(4).unwrap();
    for i in 0..4 {
        st.push(i).unwrap();
    }
    let err = refusing(64, || st.push(4)).unwrap_err();
    assert_eq!(err, ContainerError::AllocFailed { bytes: 64, align: 8 });
    assert_eq!(st.len(), 4);
    assert_eq!(*st.top(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn refused_reserve_is_atomic(
        values in prop::collection::vec(any::<u32>(), 1..64),
        extra in 1usize..512,
    ) {
        let mut buf: Buffer<u32> = values.iter().copied().collect();
        let cap = buf.capacity();
        let target = cap + extra;

        let result = refusing(target * 4, || buf.reserve(target));
        prop_assert_eq!(
            result,
            Err(ContainerError::AllocFailed { bytes: target * 4, align: 4 })
        );
        prop_assert_eq!(buf.capacity(), cap);
        prop_assert_eq!(buf.as_slice(), values.as_slice());
    }
}
