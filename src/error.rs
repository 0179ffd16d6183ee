// src/error.rs
//! Error types for container operations with conversion support

use std::alloc::Layout;
use std::fmt;

/// Errors that can occur while a container acquires storage.
///
/// Precondition violations (popping an empty container, indexing past the
/// end) are not represented here: they are caller bugs and panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The requested slot count cannot be expressed as an allocation layout
    CapacityOverflow {
        /// Number of slots that was requested
        requested: usize,
    },
    /// The global allocator refused the request
    AllocFailed {
        /// Size of the refused allocation in bytes
        bytes: usize,
        /// Alignment of the refused allocation
        align: usize,
    },
}

impl ContainerError {
    /// Builds an [`AllocFailed`](Self::AllocFailed) from the refused layout.
    pub fn alloc_failed(layout: Layout) -> Self {
        Self::AllocFailed {
            bytes: layout.size(),
            align: layout.align(),
        }
    }

    /// Escalates the error the way the standard collections do.
    ///
    /// Used by trait impls (`Clone`, `FromIterator`, `Extend`) whose
    /// signatures leave no room for a `Result`.
    pub(crate) fn escalate(self) -> ! {
        match self {
            Self::CapacityOverflow { .. } => panic!("capacity overflow"),
            Self::AllocFailed { bytes, align } => match Layout::from_size_align(bytes, align) {
                Ok(layout) => std::alloc::handle_alloc_error(layout),
                Err(_) => panic!("allocation of {} bytes failed", bytes),
            },
        }
    }
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "Capacity overflow: {} slots requested", requested)
            }
            Self::AllocFailed { bytes, align } => {
                write!(f, "Allocation of {} bytes (align {}) failed", bytes, align)
            }
        }
    }
}

// `anyhow::Error` picks this up through its blanket `From<E: Error>` impl.
impl std::error::Error for ContainerError {}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

/// Convert ContainerError to std::io::Error
impl From<ContainerError> for std::io::Error {
    fn from(err: ContainerError) -> Self {
        std::io::Error::new(std::io::ErrorKind::OutOfMemory, err)
    }
}

// ============================================================================
// RESULT TYPE ALIASES
// ============================================================================

/// Result type alias for container operations
///
/// Note: When using with other Result types (like anyhow::Result),
/// either qualify the type (`seqbuf::Result<T>`) or use the conversion traits.
pub type Result<T> = std::result::Result<T, ContainerError>;

// ============================================================================
// EXTENSION TRAIT FOR EASY CONVERSION
// ============================================================================

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| e.into())
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

/// Converts the error of a container operation into another error type.
///
/// The second argument names the target type; it defaults to
/// `std::io::Error`.
///
/// # Example
/// ```
/// use seqbuf::prelude::*;
/// use seqbuf::container_op;
///
/// fn fill() -> std::io::Result<Buffer<u32>> {
///     let mut buf = Buffer::new();
///     container_op!(buf.push_back(42))?;
///     container_op!(buf.reserve(64), std::io::Error)?;
///     Ok(buf)
/// }
/// assert_eq!(fill().unwrap().len(), 1);
/// ```
#[macro_export]
macro_rules! container_op {
    ($expr:expr, $target:ty) => {
        $expr.map_err(|e: $crate::ContainerError| -> $target { e.into() })
    };
    ($expr:expr) => {
        $expr.map_err(|e: $crate::ContainerError| -> std::io::Error { e.into() })
    };
}
