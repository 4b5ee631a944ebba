//! An integer guaranteed to be a PowerOf2.

use core::{mem, num, ops};

/// PowerOf2
///
/// An integral guaranteed to be non-zero and a power of 2, as alignments are.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PowerOf2(num::NonZeroUsize);

impl PowerOf2 {
    /// Creates a new instance of PowerOf2.
    ///
    /// Or nothing if the value is not a power of 2.
    pub const fn new(value: usize) -> Option<PowerOf2> {
        if value.count_ones() == 1 {
            //  Safety:
            //  -   Value is a power of 2, as per the if check.
            Some(unsafe { PowerOf2::new_unchecked(value) })
        } else {
            None
        }
    }

    /// Creates a new instance of PowerOf2.
    ///
    /// #   Safety
    ///
    /// Assumes that the value is a power of 2.
    pub const unsafe fn new_unchecked(value: usize) -> PowerOf2 {
        //  Safety:
        //  -   A power of 2 cannot be 0.
        PowerOf2(num::NonZeroUsize::new_unchecked(value))
    }

    /// Creates a PowerOf2 matching the alignment of a type.
    pub const fn align_of<T>() -> PowerOf2 {
        //  Safety:
        //  -   Alignment is always a power of 2, and never 0.
        unsafe { PowerOf2::new_unchecked(mem::align_of::<T>()) }
    }

    /// Returns the inner value.
    pub const fn value(&self) -> usize { self.0.get() }

    /// Rounds the value up to the nearest higher multiple of `self`.
    ///
    /// `n` is assumed to be at most `usize::MAX - self.value() + 1`.
    pub const fn round_up(&self, n: usize) -> usize {
        let mask = self.mask();

        (n + mask) & !mask
    }

    const fn mask(&self) -> usize { self.value() - 1 }
}

impl ops::Rem<PowerOf2> for usize {
    type Output = usize;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn rem(self, rhs: PowerOf2) -> usize { self & rhs.mask() }
}

#[cfg(test)]
mod tests {

use super::*;

#[test]
fn power_of_2_new() {
    fn new(value: usize) -> Option<usize> {
        PowerOf2::new(value).map(|p| p.value())
    }

    assert_eq!(None, new(0));
    assert_eq!(Some(1), new(1));
    assert_eq!(Some(2), new(2));
    assert_eq!(None, new(3));
    assert_eq!(Some(16), new(16));
    assert_eq!(None, new(24));
}

#[test]
fn power_of_2_align_of() {
    assert_eq!(1, PowerOf2::align_of::<u8>().value());
    assert_eq!(mem::align_of::<u64>(), PowerOf2::align_of::<u64>().value());
    assert_eq!(mem::align_of::<[u32; 3]>(), PowerOf2::align_of::<[u32; 3]>().value());
}

#[test]
fn power_of_2_rem() {
    fn rem(pow2: usize, n: usize) -> usize {
        n % PowerOf2::new(pow2).expect("Power of 2")
    }

    assert_eq!(0, rem(1, 3));

    assert_eq!(0, rem(4, 0));
    assert_eq!(1, rem(4, 5));
    assert_eq!(3, rem(4, 7));

    assert_eq!(15, rem(16, 31));
    assert_eq!(0, rem(16, 32));
}

#[test]
fn power_of_2_round_up() {
    fn round_up(pow2: usize, n: usize) -> usize {
        PowerOf2::new(pow2).expect("Power of 2").round_up(n)
    }

    assert_eq!(0, round_up(1, 0));
    assert_eq!(3, round_up(1, 3));

    assert_eq!(0, round_up(8, 0));
    assert_eq!(8, round_up(8, 1));
    assert_eq!(8, round_up(8, 8));
    assert_eq!(16, round_up(8, 9));

    assert_eq!(16, round_up(16, 1));
    assert_eq!(32, round_up(16, 17));
}

}
