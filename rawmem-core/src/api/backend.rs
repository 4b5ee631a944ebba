//! Backend
//!
//! The Backend trait is used to request memory from whichever allocator services the process: the platform's own
//! allocator, or one supplied by a host environment. By abstracting the underlying allocator, consumers depend only
//! on the operations of `Memory`, never on which allocator is actually in use.

use core::ptr::{self, NonNull};

use crate::Category;

/// Abstraction of allocator specific memory allocation, reallocation, clearing and deallocation.
///
/// Implementations are shared across threads, and must be safe to call concurrently for independent blocks.
pub trait Backend: Send + Sync {
    /// Returns a short human-readable name for the backend.
    fn name(&self) -> &'static str;

    /// Allocates a fresh block of memory of at least `size` bytes, for the given `category`.
    ///
    /// May return None if the allocation request cannot be satisfied.
    ///
    /// #   Safety
    ///
    /// The caller may assume that if the returned pointer is not None then the number of usable bytes is _greater
    /// than or equal_ to `size`.
    ///
    /// `allocate` assumes that:
    /// -   `size` is non-zero.
    unsafe fn allocate(&self, size: usize, category: Category) -> Option<NonNull<u8>>;

    /// Deallocates the supplied block of memory.
    ///
    /// #   Safety
    ///
    /// The caller should no longer reference the memory after calling this function.
    ///
    /// `deallocate` assumes that:
    /// -   `pointer` was allocated by this instance of `Backend`, with a compatible `category`.
    /// -   `pointer` is the value returned by `Backend`, and not an interior pointer.
    /// -   `pointer` has not been deallocated since.
    unsafe fn deallocate(&self, pointer: NonNull<u8>, category: Category);

    /// Grows the supplied block of memory to at least `new_size` bytes, preserving its first `old_size` bytes.
    ///
    /// On success, `pointer` is invalidated and the block is accessible through the returned pointer only. On
    /// failure, None is returned and `pointer` is left untouched.
    ///
    /// The default implementation allocates a new block, copies `old_size` bytes, and deallocates `pointer`. Unlike
    /// an in-place `realloc`, it preserves the alignment guarantees of `allocate`.
    ///
    /// #   Safety
    ///
    /// `reallocate` assumes that:
    /// -   `pointer` was allocated by this instance of `Backend`, with `category`, and is still live.
    /// -   `old_size` is the size `pointer` was allocated with.
    /// -   `new_size` is strictly greater than `old_size`.
    unsafe fn reallocate(&self, pointer: NonNull<u8>, old_size: usize, new_size: usize, category: Category)
        -> Option<NonNull<u8>>
    {
        let new_pointer = self.allocate(new_size, category)?;

        //  Safety:
        //  -   `pointer` is valid for `old_size` bytes, as per pre-conditions.
        //  -   `new_pointer` is valid for `new_size` bytes, and `new_size > old_size`.
        //  -   Distinct live blocks do not overlap.
        ptr::copy_nonoverlapping(pointer.as_ptr(), new_pointer.as_ptr(), old_size);

        self.deallocate(pointer, category);

        Some(new_pointer)
    }

    /// Sets `size` bytes, starting at `pointer`, to 0.
    ///
    /// #   Safety
    ///
    /// `clear` assumes that:
    /// -   `pointer` is valid for writes of `size` bytes.
    unsafe fn clear(&self, pointer: NonNull<u8>, size: usize) {
        ptr::write_bytes(pointer.as_ptr(), 0, size);
    }
}

impl<'a, B> Backend for &'a B
    where
        B: Backend + ?Sized
{
    fn name(&self) -> &'static str { (**self).name() }

    unsafe fn allocate(&self, size: usize, category: Category) -> Option<NonNull<u8>> {
        (**self).allocate(size, category)
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, category: Category) {
        (**self).deallocate(pointer, category)
    }

    unsafe fn reallocate(&self, pointer: NonNull<u8>, old_size: usize, new_size: usize, category: Category)
        -> Option<NonNull<u8>>
    {
        (**self).reallocate(pointer, old_size, new_size, category)
    }

    unsafe fn clear(&self, pointer: NonNull<u8>, size: usize) { (**self).clear(pointer, size) }
}
