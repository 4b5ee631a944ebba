//! RawView
//!
//! A typed view over the block owned by a `Handle`: the block is considered as an array of `T`, addressed by index.
//!
//! Higher-level containers store their elements directly in unmanaged blocks, and access them through such views
//! without boxing or copying.

use core::{marker::PhantomData, mem, ptr};

use crate::{ContractViolation, FixedLayout, Handle};
use crate::utils::{check_element_alignment, CHECK_CONTRACTS};

/// A view of a block of unmanaged memory as an array of `T`.
pub struct RawView<'a, T> {
    base: *mut T,
    len: usize,
    _marker: PhantomData<&'a Handle>,
}

impl<'a, T> RawView<'a, T>
    where
        T: FixedLayout
{
    /// Creates a view over the first `byte_count` bytes of the block owned by `handle`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that the block owned by `handle` is at least `byte_count` bytes long.
    pub(crate) unsafe fn new(handle: &'a Handle, byte_count: usize) -> Self {
        let base = handle.as_ptr().cast::<T>();
        let len = match mem::size_of::<T>() {
            0 => 0,
            size => byte_count / size,
        };

        Self { base, len, _marker: PhantomData }
    }

    /// Returns the number of elements in the view.
    pub fn len(&self) -> usize { self.len }

    /// Returns whether the view contains no element.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// #   Panics
    ///
    /// In debug builds, if `index` is out of bounds, or the element is not suitably aligned for `T`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `index` is less than `self.len()`.
    /// -   Assumes that the bytes of the element form a valid `T`.
    /// -   Assumes that no other reference to the element is live for `'a`.
    pub unsafe fn element_mut(&self, index: usize) -> &'a mut T {
        let element = self.element_ptr(index);

        if CHECK_CONTRACTS {
            check_element_alignment(element);
        }

        &mut *element
    }

    /// Reads the element at `index`, which need not be aligned.
    ///
    /// #   Panics
    ///
    /// In debug builds, if `index` is out of bounds.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `index` is less than `self.len()`.
    /// -   Assumes that the bytes of the element form a valid `T`.
    pub unsafe fn read(&self, index: usize) -> T { ptr::read_unaligned(self.element_ptr(index)) }

    /// Writes `value` at `index`, which need not be aligned.
    ///
    /// #   Panics
    ///
    /// In debug builds, if `index` is out of bounds.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `index` is less than `self.len()`.
    /// -   Assumes that no reference to the element is live.
    pub unsafe fn write(&self, index: usize, value: T) { ptr::write_unaligned(self.element_ptr(index), value) }

    //  Computes the address of the element at `index`.
    unsafe fn element_ptr(&self, index: usize) -> *mut T {
        if CHECK_CONTRACTS && index >= self.len {
            ContractViolation::ElementOutOfBounds { index, len: self.len }.raise();
        }

        self.base.add(index)
    }
}

#[cfg(test)]
mod tests {

use std::vec::Vec;

use crate::size_of;

use super::*;

crate::fixed_layout! {
    #[derive(Debug, PartialEq)]
    struct Cell {
        x: i16,
        y: i16,
        value: f32,
    }
}

#[repr(align(16))]
struct Buffer([u8; 64]);

fn handle_of(buffer: &mut Buffer) -> Handle { unsafe { Handle::from_raw(buffer.0.as_mut_ptr()) } }

#[test]
fn view_len() {
    let mut buffer = Buffer([0; 64]);
    let handle = handle_of(&mut buffer);

    unsafe {
        assert_eq!(8, handle.view::<u64>(64).len());
        assert_eq!(5, handle.view::<[u32; 3]>(64).len());
        assert_eq!(64 / size_of::<Cell>() as usize, handle.view::<Cell>(64).len());
        assert!(handle.view::<u64>(7).is_empty());
    }
}

#[test]
fn view_element_mut_writes_through() {
    let mut buffer = Buffer([0; 64]);
    let handle = handle_of(&mut buffer);

    unsafe {
        let view = handle.view::<Cell>(64);

        for index in 0..view.len() {
            *view.element_mut(index) = Cell { x: index as i16, y: -(index as i16), value: index as f32 * 0.5 };
        }

        view.element_mut(2).value = 42.0;

        let cells: Vec<_> = (0..view.len()).map(|index| view.read(index)).collect();

        assert_eq!(Cell { x: 0, y: 0, value: 0.0 }, cells[0]);
        assert_eq!(Cell { x: 1, y: -1, value: 0.5 }, cells[1]);
        assert_eq!(Cell { x: 2, y: -2, value: 42.0 }, cells[2]);
    }

    //  x of element 1, little or big endian alike.
    assert_eq!(1i16.to_ne_bytes(), [buffer.0[8], buffer.0[9]]);
}

#[test]
fn view_unaligned_access() {
    let mut buffer = Buffer([0; 64]);
    let base = handle_of(&mut buffer);
    let shifted = unsafe { Handle::from_raw(base.as_ptr().add(1)) };

    unsafe {
        let view = shifted.view::<u32>(32);

        view.write(3, 0xAABB_CCDD);

        assert_eq!(0xAABB_CCDD, view.read(3));
    }

    assert_eq!(0xAABB_CCDDu32.to_ne_bytes(), [buffer.0[13], buffer.0[14], buffer.0[15], buffer.0[16]]);
}

#[cfg(all(debug_assertions, not(feature = "profile")))]
#[test]
#[should_panic(expected = "element index out of bounds: 8 >= 8")]
fn view_out_of_bounds() {
    let mut buffer = Buffer([0; 64]);
    let handle = handle_of(&mut buffer);

    let _ = unsafe { handle.view::<u64>(64).read(8) };
}

}
