//! Category
//!
//! The Category of an allocation describes its intended lifetime. It is advisory: it is handed over to the `Backend`,
//! which may segregate its pools accordingly, but no lifetime rule is enforced by rawmem itself.

/// Category
///
/// The intended lifetime, or scope, of an allocation.
///
/// The numeric values are stable, and used as is across the C ABI.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Category {
    /// Invalid.
    ///
    /// Sentinel value, never a valid allocation target.
    Invalid = 0,
    /// None.
    ///
    /// Explicitly no allocation.
    None = 1,
    /// Temp.
    ///
    /// Very short-lived, scoped to a single logical frame or iteration.
    Temp = 2,
    /// TempJob.
    ///
    /// Short-lived, may be shared across concurrent workers within a single iteration.
    TempJob = 3,
    /// Persistent.
    ///
    /// Long-lived, must be explicitly freed by its owner.
    Persistent = 4,
}

impl Category {
    /// All categories, in order of their raw values.
    pub const ALL: [Category; 5] =
        [Category::Invalid, Category::None, Category::Temp, Category::TempJob, Category::Persistent];

    /// Creates a Category from its raw value.
    ///
    /// Or nothing if the value matches no Category.
    pub const fn from_raw(raw: u8) -> Option<Category> {
        match raw {
            0 => Some(Category::Invalid),
            1 => Some(Category::None),
            2 => Some(Category::Temp),
            3 => Some(Category::TempJob),
            4 => Some(Category::Persistent),
            _ => None,
        }
    }

    /// Returns the raw value.
    pub const fn into_raw(self) -> u8 { self as u8 }

    /// Returns whether memory may be allocated for this category.
    ///
    /// `Invalid` and `None` are never allocated for.
    pub const fn is_allocatable(self) -> bool {
        matches!(self, Category::Temp | Category::TempJob | Category::Persistent)
    }
}

impl Default for Category {
    fn default() -> Self { Category::Persistent }
}

#[cfg(test)]
mod tests {

use super::*;

#[test]
fn category_raw_round_trip() {
    for (raw, category) in Category::ALL.iter().enumerate() {
        assert_eq!(raw as u8, category.into_raw());
        assert_eq!(Some(*category), Category::from_raw(raw as u8));
    }

    assert_eq!(None, Category::from_raw(5));
    assert_eq!(None, Category::from_raw(u8::MAX));
}

#[test]
fn category_is_allocatable() {
    assert!(!Category::Invalid.is_allocatable());
    assert!(!Category::None.is_allocatable());
    assert!(Category::Temp.is_allocatable());
    assert!(Category::TempJob.is_allocatable());
    assert!(Category::Persistent.is_allocatable());
}

}
