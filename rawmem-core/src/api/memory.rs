//! Memory
//!
//! The Memory front-end sits atop a `Backend`, and provides the operations consumers rely on:
//!
//! -   Allocation failures are fatal, consumers never see a null Handle.
//! -   Contracts are checked in debug builds, unless the `profile` feature is enabled, and assumed otherwise.
//! -   Handles are consumed by the operations which invalidate them.

use core::{
    alloc::Layout,
    ptr::{self, NonNull},
};

use alloc::alloc::handle_alloc_error;

use crate::{Backend, Category, ContractViolation, FixedLayout, Handle, OPTIMAL_ALIGNMENT};
use crate::utils::{check_element_alignment, CHECK_CONTRACTS};

/// Memory
///
/// The allocation front-end over a given `Backend`.
#[derive(Default)]
pub struct Memory<B>(B);

impl<B> Memory<B> {
    /// Creates an instance.
    ///
    /// The instance will allocate memory from the `backend`, and return it to the `backend`.
    pub const fn new(backend: B) -> Self { Self(backend) }

    /// Returns a reference to the underlying `Backend`.
    pub fn backend(&self) -> &B { &self.0 }
}

impl<B> Memory<B>
    where
        B: Backend
{
    /// Allocates a block of at least `byte_count` bytes, for the given `category`.
    ///
    /// The content of the block is uninitialized. A request for 0 bytes is served as a request for 1 byte, so that the
    /// returned Handle is never null.
    ///
    /// #   Panics
    ///
    /// In debug builds, if `category` is not allocatable.
    ///
    /// #   Aborts
    ///
    /// If the `Backend` cannot satisfy the request.
    pub fn allocate(&self, byte_count: usize, category: Category) -> Handle {
        if CHECK_CONTRACTS && !category.is_allocatable() {
            ContractViolation::UnallocatableCategory { category }.raise();
        }

        let size = byte_count.max(1);

        //  Safety:
        //  -   `size` is non-zero.
        match unsafe { self.0.allocate(size, category) } {
            //  Safety:
            //  -   `pointer` was just returned by the `Backend`, and is owned by no one else.
            Some(pointer) => unsafe { Handle::from_raw(pointer.as_ptr()) },
            None => allocation_failure(size),
        }
    }

    /// Deallocates the block owned by `handle`.
    ///
    /// Deallocating the null Handle does nothing.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `handle` was allocated by this instance, with a compatible `category`.
    /// -   Assumes the memory owned by `handle` is no longer in use.
    pub unsafe fn free(&self, handle: Handle, category: Category) {
        if let Some(pointer) = handle.as_non_null() {
            self.0.deallocate(pointer, category);
        }
    }

    /// Grows the block owned by `handle` from `old_size` to `new_size` bytes.
    ///
    /// The first `old_size` bytes are preserved, the remainder is uninitialized. `handle` is consumed, and the block
    /// is only accessible through the returned Handle from then on.
    ///
    /// #   Panics
    ///
    /// In debug builds, if `new_size` is 0, or not strictly greater than `old_size`.
    ///
    /// #   Aborts
    ///
    /// If the `Backend` cannot satisfy the request.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `handle` was allocated by this instance, with `category`, and is not null.
    /// -   Assumes that `old_size` is the size `handle` was allocated, or last reallocated, with.
    /// -   Assumes that `new_size` is strictly greater than `old_size`; undefined behavior in optimized builds.
    pub unsafe fn reallocate(&self, handle: Handle, old_size: usize, new_size: usize, category: Category) -> Handle {
        if CHECK_CONTRACTS {
            if new_size == 0 {
                ContractViolation::ZeroSizedGrowth.raise();
            }

            if new_size <= old_size {
                ContractViolation::NonGrowingReallocation { old_size, new_size }.raise();
            }
        }

        debug_assert!(!handle.is_null(), "Cannot reallocate the null Handle");

        //  Safety:
        //  -   `handle` is not null, as per pre-conditions.
        let pointer = NonNull::new_unchecked(handle.into_raw());

        match self.0.reallocate(pointer, old_size, new_size, category) {
            Some(pointer) => Handle::from_raw(pointer.as_ptr()),
            None => allocation_failure(new_size),
        }
    }

    /// Sets `byte_count` bytes of the block owned by `handle` to 0.
    ///
    /// #   Safety
    ///
    /// -   Assumes that the block owned by `handle` is at least `byte_count` bytes long.
    pub unsafe fn clear(&self, handle: &Handle, byte_count: usize) {
        if let Some(pointer) = handle.as_non_null() {
            self.0.clear(pointer, byte_count);
        }
    }
}

/// Copies the bytes of `value` at the start of the block owned by `handle`.
///
/// Exactly `size_of::<T>()` bytes are written, no alignment is required.
///
/// #   Safety
///
/// -   Assumes that the block owned by `handle` is at least `size_of::<T>()` bytes long.
pub unsafe fn copy_value_into<T>(value: &T, handle: &Handle)
    where
        T: FixedLayout
{
    ptr::copy_nonoverlapping(value as *const T as *const u8, handle.as_ptr(), core::mem::size_of::<T>());
}

/// Returns a mutable reference to the `index`-th `T` of the block owned by `handle`.
///
/// The reference aliases the block: writes through it land directly in the block.
///
/// #   Panics
///
/// In debug builds, if the element is not suitably aligned for `T`.
///
/// #   Safety
///
/// -   Assumes that the block owned by `handle` holds at least `index + 1` elements of `T`.
/// -   Assumes that the bytes of the element form a valid `T`.
/// -   Assumes that no other reference to the element is live for `'a`.
pub unsafe fn element_as_mut<'a, T>(handle: &'a Handle, index: usize) -> &'a mut T
    where
        T: FixedLayout
{
    let element = handle.as_ptr().cast::<T>().add(index);

    if CHECK_CONTRACTS {
        check_element_alignment(element);
    }

    &mut *element
}

#[cold]
#[inline(never)]
fn allocation_failure(size: usize) -> ! { handle_alloc_error(failure_layout(size)) }

//  The layout reported for a failed request of `size` bytes.
//
//  A size too large to form a layout is reported as the largest layout there is, the failure remains fatal.
fn failure_layout(size: usize) -> Layout {
    let alignment = OPTIMAL_ALIGNMENT.value();

    Layout::from_size_align(size, alignment)
        .or_else(|_| Layout::from_size_align(isize::MAX as usize - (alignment - 1), alignment))
        .unwrap_or_else(|_| Layout::new::<u8>())
}
