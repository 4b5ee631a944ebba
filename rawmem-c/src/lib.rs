#![deny(missing_docs)]

//! Exposition of the rawmem API via a C ABI.
//!
//! Categories are passed as their raw values: 0 (Invalid), 1 (None), 2 (Temp), 3 (TempJob), 4 (Persistent). Unknown
//! values are treated as Invalid.

use rawmem::{Category, Handle};

/// Allocates `size` bytes of memory, for the category `category`.
///
/// The content of the memory is uninitialized. The returned pointer is never NULL: the process aborts if the
/// allocation cannot be satisfied.
#[no_mangle]
pub extern fn rm_allocate(size: usize, category: u8) -> *mut u8 {
    rawmem::allocate(size, category_of(category)).into_raw()
}

/// Deallocates the memory located at `pointer`; does nothing if `pointer` is NULL.
///
/// #   Safety
///
/// -   Assumes `pointer` has been returned by a prior call to `rm_allocate` or `rm_reallocate`, with `category`.
/// -   Assumes `pointer` has not been deallocated since its allocation.
/// -   Assumes the memory pointed by `pointer` is no longer in use.
#[no_mangle]
pub unsafe extern fn rm_free(pointer: *mut u8, category: u8) {
    rawmem::free(Handle::from_raw(pointer), category_of(category))
}

/// Grows the memory located at `pointer` from `old_size` to `new_size` bytes, preserving its first `old_size` bytes.
///
/// `pointer` is invalidated; the memory is only accessible through the returned pointer from then on.
///
/// #   Safety
///
/// -   Assumes `pointer` has been returned by a prior call to `rm_allocate` or `rm_reallocate`, with `category`.
/// -   Assumes `old_size` is the size `pointer` was allocated, or last reallocated, with.
/// -   Assumes `new_size` is strictly greater than `old_size`.
#[no_mangle]
pub unsafe extern fn rm_reallocate(pointer: *mut u8, old_size: usize, new_size: usize, category: u8) -> *mut u8 {
    rawmem::reallocate(Handle::from_raw(pointer), old_size, new_size, category_of(category)).into_raw()
}

/// Sets `size` bytes of the memory located at `pointer` to 0.
///
/// #   Safety
///
/// -   Assumes `pointer` is valid for writes of `size` bytes.
#[no_mangle]
pub unsafe extern fn rm_clear(pointer: *mut u8, size: usize) {
    //  The temporary Handle is only borrowed, and dropping a Handle releases nothing.
    rawmem::clear(&Handle::from_raw(pointer), size)
}

/// Rounds `n` up to the next multiple of 4.
#[no_mangle]
pub extern fn rm_align_up4(n: usize) -> usize { rawmem::align_up4(n) }

/// Returns the alignment of allocations of the native backend.
#[no_mangle]
pub extern fn rm_optimal_alignment() -> usize { rawmem::OPTIMAL_ALIGNMENT.value() }

//
//  Implementation
//

fn category_of(raw: u8) -> Category { Category::from_raw(raw).unwrap_or(Category::Invalid) }
