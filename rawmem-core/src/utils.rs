//! A collection of utilities.

use core::ptr::NonNull;

use crate::ContractViolation;

mod power_of_2;

pub use power_of_2::PowerOf2;

/// The default alignment of allocations: 16 bytes on 64-bits targets, 8 bytes otherwise.
#[cfg(target_pointer_width = "64")]
//  Safety:
//  -   16 is a power of 2.
pub const OPTIMAL_ALIGNMENT: PowerOf2 = unsafe { PowerOf2::new_unchecked(16) };

/// The default alignment of allocations: 16 bytes on 64-bits targets, 8 bytes otherwise.
#[cfg(not(target_pointer_width = "64"))]
//  Safety:
//  -   8 is a power of 2.
pub const OPTIMAL_ALIGNMENT: PowerOf2 = unsafe { PowerOf2::new_unchecked(8) };

/// Rounds `n` up to the next multiple of 4, or returns `n` if already a multiple of 4.
///
/// #   Panics
///
/// In debug builds, if `n` is greater than `usize::MAX - 3`, as the result would not be representable.
pub const fn align_up4(n: usize) -> usize {
    //  Safety:
    //  -   4 is a power of 2.
    const FOUR: PowerOf2 = unsafe { PowerOf2::new_unchecked(4) };

    debug_assert!(n <= usize::MAX - 3, "align_up4 overflows for values greater than usize::MAX - 3");

    FOUR.round_up(n)
}

/// Whether contracts are checked: in debug builds, unless the `profile` feature strips them for profiling.
pub(crate) const CHECK_CONTRACTS: bool = cfg!(debug_assertions) && !cfg!(feature = "profile");

/// Returns whether the pointer is sufficiently aligned for the given alignment.
pub(crate) fn is_sufficiently_aligned_for(ptr: NonNull<u8>, alignment: PowerOf2) -> bool {
    (ptr.as_ptr() as usize) % alignment == 0
}

/// Raises a contract violation if `element` is not aligned for `T`.
#[inline(always)]
pub(crate) fn check_element_alignment<T>(element: *const T) {
    let alignment = PowerOf2::align_of::<T>();

    if let Some(address) = NonNull::new(element as *mut u8) {
        if !is_sufficiently_aligned_for(address, alignment) {
            ContractViolation::MisalignedElement { address: address.as_ptr() as usize, alignment: alignment.value() }
                .raise();
        }
    }
}
