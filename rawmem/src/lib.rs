#![no_std]
#![deny(missing_docs)]

//! An allocator-agnostic layer over raw, unmanaged memory.
//!
//! The free functions of this crate allocate, grow, clear and free blocks of unmanaged memory through the process-wide
//! backend, whichever it is:
//!
//! -   A backend installed by the host environment, see `install`.
//! -   Or the default backend: `NativeBackend` with the `native` feature (the default), `HeapBackend` otherwise.
//!
//! Blocks are denoted by a `Handle`, which records neither size nor type: the owner of the Handle is responsible for
//! remembering the number of bytes it was allocated with. Fixed-layout values are copied into, and accessed in place
//! within, those blocks with `copy_value_into`, `element_as_mut`, and `Handle::view`.
//!
//! ```
//! use rawmem::Category;
//!
//! let handle = rawmem::allocate(4 * rawmem::size_of::<u32>() as usize, Category::Temp);
//!
//! unsafe {
//!     rawmem::clear(&handle, 16);
//!
//!     *rawmem::element_as_mut::<u32>(&handle, 1) = 42;
//!
//!     let handle = rawmem::reallocate(handle, 16, 32, Category::Temp);
//!
//!     assert_eq!(42, handle.view::<u32>(32).read(1));
//!
//!     rawmem::free(handle, Category::Temp);
//! }
//! ```

mod platform;
mod selection;

pub use rawmem_core::{
    align_up4, copy_value_into, element_as_mut, field_offset, fixed_layout, size_of,
    Backend, Category, ContractViolation, Field, FixedLayout, Handle, LayoutError, Memory, PowerOf2, RawView,
    OPTIMAL_ALIGNMENT,
};

pub use platform::{HeapBackend, NativeBackend};
pub use selection::{backend_name, install, memory, Host};

/// Allocates a block of at least `byte_count` bytes, for the given `category`.
///
/// The content of the block is uninitialized.
///
/// #   Panics
///
/// In debug builds, if `category` is `Invalid` or `None`.
///
/// #   Aborts
///
/// If the process-wide backend cannot satisfy the request.
#[inline(always)]
pub fn allocate(byte_count: usize, category: Category) -> Handle { memory().allocate(byte_count, category) }

/// Deallocates the block owned by `handle`; does nothing for the null Handle.
///
/// #   Safety
///
/// -   Assumes that `handle` was allocated by this crate, with a compatible `category`.
/// -   Assumes the memory owned by `handle` is no longer in use.
#[inline(always)]
pub unsafe fn free(handle: Handle, category: Category) { memory().free(handle, category) }

/// Grows the block owned by `handle` from `old_size` to `new_size` bytes, preserving its first `old_size` bytes.
///
/// `handle` is consumed; the block is only accessible through the returned Handle from then on.
///
/// #   Panics
///
/// In debug builds, if `new_size` is 0, or not strictly greater than `old_size`.
///
/// #   Aborts
///
/// If the process-wide backend cannot satisfy the request.
///
/// #   Safety
///
/// -   Assumes that `handle` was allocated by this crate, with `category`, and is not null.
/// -   Assumes that `old_size` is the size `handle` was allocated, or last reallocated, with.
/// -   Assumes that `new_size` is strictly greater than `old_size`; undefined behavior in optimized builds.
#[inline(always)]
pub unsafe fn reallocate(handle: Handle, old_size: usize, new_size: usize, category: Category) -> Handle {
    memory().reallocate(handle, old_size, new_size, category)
}

/// Sets `byte_count` bytes of the block owned by `handle` to 0.
///
/// #   Safety
///
/// -   Assumes that the block owned by `handle` is at least `byte_count` bytes long.
#[inline(always)]
pub unsafe fn clear(handle: &Handle, byte_count: usize) { memory().clear(handle, byte_count) }
