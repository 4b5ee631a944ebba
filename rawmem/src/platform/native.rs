//! Implementation of the feature-rich backend.

use core::ptr::{self, NonNull};

use rawmem_core::{Backend, Category, OPTIMAL_ALIGNMENT};

/// The feature-rich backend.
///
/// -   Allocations are aligned on `OPTIMAL_ALIGNMENT`, via `posix_memalign`.
/// -   Allocations for a category which is not allocatable are refused.
/// -   Growth and clearing are those of `Backend`: growth goes through a fresh, hence aligned, allocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeBackend;

impl NativeBackend {
    /// Creates an instance.
    pub const fn new() -> Self { Self }
}

impl Backend for NativeBackend {
    fn name(&self) -> &'static str { "native" }

    unsafe fn allocate(&self, size: usize, category: Category) -> Option<NonNull<u8>> {
        debug_assert!(size > 0, "Expected non-zero size");

        if !category.is_allocatable() {
            return None;
        }

        let mut pointer: *mut libc::c_void = ptr::null_mut();

        //  Safety:
        //  -   `OPTIMAL_ALIGNMENT` is a power of 2, and a multiple of the size of a pointer.
        let result = libc::posix_memalign(&mut pointer as *mut _, OPTIMAL_ALIGNMENT.value(), size);

        if result != 0 {
            return None;
        }

        let pointer = NonNull::new(pointer as *mut u8)?;

        debug_assert!(pointer.as_ptr() as usize % OPTIMAL_ALIGNMENT == 0,
            "Incorrect alignment of allocation: {:x} % {:x} != 0", pointer.as_ptr() as usize, OPTIMAL_ALIGNMENT.value());

        Some(pointer)
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, category: Category) {
        debug_assert!(category.is_allocatable(), "Cannot deallocate for category {:?}", category);

        libc::free(pointer.as_ptr() as *mut libc::c_void);
    }
}
