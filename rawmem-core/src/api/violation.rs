//! Contract violations.
//!
//! Contracts are only checked in debug builds, where a violation panics with the message of the violation. In
//! optimized builds the checks are compiled out, and violating a contract is undefined behavior.

use core::fmt;

use crate::Category;

/// A violated caller contract, detected in a debug build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractViolation {
    /// `reallocate` was asked for a new size of 0.
    ZeroSizedGrowth,
    /// `reallocate` was asked for a new size not strictly greater than the old size.
    NonGrowingReallocation {
        /// The size the block was allocated with.
        old_size: usize,
        /// The requested size.
        new_size: usize,
    },
    /// An element was accessed past the end of a view.
    ElementOutOfBounds {
        /// The index of the element.
        index: usize,
        /// The number of elements in the view.
        len: usize,
    },
    /// An element was accessed at an address not aligned for its type.
    MisalignedElement {
        /// The address of the element.
        address: usize,
        /// The alignment required by the type of the element.
        alignment: usize,
    },
    /// Memory was requested for a category which is never allocated for.
    UnallocatableCategory {
        /// The offending category.
        category: Category,
    },
}

impl ContractViolation {
    /// Panics with the message of the violation.
    #[cold]
    #[inline(never)]
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("contract violation: {}", self)
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSizedGrowth => write!(f, "new size must be greater than 0"),
            Self::NonGrowingReallocation { old_size, new_size } => {
                write!(f, "new size must be greater than old size: {} <= {}", new_size, old_size)
            }
            Self::ElementOutOfBounds { index, len } => {
                write!(f, "element index out of bounds: {} >= {}", index, len)
            }
            Self::MisalignedElement { address, alignment } => {
                write!(f, "element at {:#x} is not {}-aligned", address, alignment)
            }
            Self::UnallocatableCategory { category } => {
                write!(f, "cannot allocate for category {:?}", category)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContractViolation {}
