//! Handle
//!
//! A Handle denotes the start of a block of unmanaged memory. It carries neither size nor type: the owner of the
//! Handle is responsible for remembering the number of bytes it was allocated with.

use core::{fmt, ptr::{self, NonNull}};

use crate::{FixedLayout, RawView};

/// An owning handle to a block of unmanaged memory.
///
/// A Handle has exactly one owner at a time: it is neither `Copy` nor `Clone`, and moving it transfers ownership.
/// Dropping a Handle does not release the memory; the block must be handed back to `Memory::free` or consumed by
/// `Memory::reallocate`.
pub struct Handle(*mut u8);

impl Handle {
    /// Creates the null Handle, which owns nothing.
    pub const fn null() -> Self { Self(ptr::null_mut()) }

    /// Creates a Handle from a raw pointer.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `pointer` is null, or was returned by the `Backend` the Handle will be freed with.
    /// -   Assumes that no other Handle owns `pointer`.
    pub const unsafe fn from_raw(pointer: *mut u8) -> Self { Self(pointer) }

    /// Releases ownership of the Handle, returning the raw pointer.
    pub fn into_raw(self) -> *mut u8 { self.0 }

    /// Returns the raw pointer, without releasing ownership.
    pub fn as_ptr(&self) -> *mut u8 { self.0 }

    /// Returns the raw pointer, if not null.
    pub fn as_non_null(&self) -> Option<NonNull<u8>> { NonNull::new(self.0) }

    /// Returns whether the Handle is the null Handle.
    pub fn is_null(&self) -> bool { self.0.is_null() }

    /// Views the first `byte_count` bytes of the block as an array of `T`.
    ///
    /// The view covers as many whole `T` as fit in `byte_count`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that the block is at least `byte_count` bytes long.
    /// -   Assumes that no other view, or reference, mutably aliases the elements accessed through the view.
    pub unsafe fn view<T>(&self, byte_count: usize) -> RawView<'_, T>
        where
            T: FixedLayout
    {
        RawView::new(self, byte_count)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:p})", self.0)
    }
}

impl Default for Handle {
    fn default() -> Self { Self::null() }
}

//  Safety:
//  -   A Handle is a unique owner of its block, much like `Box<[u8]>`.
unsafe impl Send for Handle {}

//  Safety:
//  -   Shared access to a Handle only exposes the address; accessing the memory requires `unsafe`.
unsafe impl Sync for Handle {}
