//! Implementation of the minimal fallback backend.

use core::ptr::NonNull;

use rawmem_core::{Backend, Category};

/// The minimal fallback backend, over the process heap.
///
/// Categories are ignored, and the alignment is whatever `malloc` guarantees.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapBackend;

impl HeapBackend {
    /// Creates an instance.
    pub const fn new() -> Self { Self }
}

impl Backend for HeapBackend {
    fn name(&self) -> &'static str { "heap" }

    unsafe fn allocate(&self, size: usize, _: Category) -> Option<NonNull<u8>> {
        NonNull::new(libc::malloc(size) as *mut u8)
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, _: Category) {
        libc::free(pointer.as_ptr() as *mut libc::c_void);
    }

    unsafe fn reallocate(&self, pointer: NonNull<u8>, _: usize, new_size: usize, _: Category) -> Option<NonNull<u8>> {
        //  On failure, `realloc` leaves the original block untouched.
        NonNull::new(libc::realloc(pointer.as_ptr() as *mut libc::c_void, new_size) as *mut u8)
    }

    unsafe fn clear(&self, pointer: NonNull<u8>, size: usize) {
        libc::memset(pointer.as_ptr() as *mut libc::c_void, 0, size);
    }
}
