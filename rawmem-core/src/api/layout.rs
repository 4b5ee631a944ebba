//! Layout introspection of fixed-layout value types.
//!
//! A fixed-layout value type has its size and the offsets of its fields decided at compile time. Its values can be
//! copied byte for byte into unmanaged memory, and reinterpreted from there.
//!
//! The size of any such type is available through `size_of`. Field offsets are only available for types whose layout
//! has been pinned with `#[repr(C)]`, which `fixed_layout!` takes care of; for any other type the layout is left to
//! the compiler's discretion, and field offset queries are rejected rather than guessed.

use core::{any, fmt, marker::PhantomData, mem};

use alloc::string::{String, ToString};

/// A value type of fixed layout.
///
/// #   Safety
///
/// Implementers guarantee that:
/// -   Every bit pattern written through `copy_value_into` from a value of the type may be read back as the type.
/// -   If `FIELDS` is provided, the layout of the type is pinned (`#[repr(C)]` or equivalent) and the table matches it.
///
/// Use `fixed_layout!` to declare structures implementing this trait.
pub unsafe trait FixedLayout: Copy + 'static {
    /// The table of fields of the type, if its layout is pinned.
    const FIELDS: Option<&'static [Field]> = None;

    /// Returns the table of fields of the type.
    fn fields() -> Result<&'static [Field], LayoutError> {
        Self::FIELDS.ok_or(LayoutError::UnpinnedLayout { type_name: any::type_name::<Self>() })
    }

    /// Returns the descriptor of the field named `name`.
    fn field(name: &str) -> Result<&'static Field, LayoutError> {
        Self::fields()?
            .iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| LayoutError::UnknownField { type_name: any::type_name::<Self>(), field: name.to_string() })
    }
}

/// Returns the size, in bytes, of `T`.
///
/// The size is signed, so that arithmetic on sizes and offsets may go negative without wrapping around.
pub const fn size_of<T>() -> isize
    where
        T: FixedLayout
{
    CachedSize::<T>::VALUE
}

/// Returns the offset, in bytes, of the field named `name` within `T`.
pub fn field_offset<T>(name: &str) -> Result<isize, LayoutError>
    where
        T: FixedLayout
{
    T::field(name).map(Field::offset)
}

/// Descriptor of a field of a fixed-layout type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    name: &'static str,
    offset: usize,
    size: usize,
}

impl Field {
    /// Creates a descriptor.
    pub const fn new(name: &'static str, offset: usize, size: usize) -> Self { Self { name, offset, size } }

    /// Returns the name of the field.
    pub const fn name(&self) -> &'static str { self.name }

    /// Returns the offset of the field within its declaring type, in bytes.
    pub const fn offset(&self) -> isize { self.offset as isize }

    /// Returns the size of the field, in bytes.
    pub const fn size(&self) -> isize { self.size as isize }
}

/// Errors that can occur when querying the layout of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout of the type is not pinned, hence its field offsets are unknown.
    UnpinnedLayout {
        /// The name of the type.
        type_name: &'static str,
    },
    /// The type has no such field.
    UnknownField {
        /// The name of the type.
        type_name: &'static str,
        /// The name of the field.
        field: String,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnpinnedLayout { type_name } => {
                write!(f, "layout of {} is not pinned, field offsets are unavailable", type_name)
            }
            Self::UnknownField { type_name, field } => {
                write!(f, "{} has no field named {:?}", type_name, field)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}

/// Declares a structure of fixed layout.
///
/// The structure is declared `#[repr(C)]`, derives `Clone` and `Copy`, and implements `FixedLayout` with its table of
/// fields. Every field must itself be of a `FixedLayout` type.
///
/// ```
/// rawmem_core::fixed_layout! {
///     #[derive(Debug, PartialEq)]
///     pub struct Particle {
///         pub mass: f32,
///         pub position: [f64; 3],
///     }
/// }
///
/// assert_eq!(Ok(0), rawmem_core::field_offset::<Particle>("mass"));
/// ```
#[macro_export]
macro_rules! fixed_layout {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(Clone, Copy)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        const _: () = {
            $( $crate::assert_fixed_layout::<$field_ty>(); )*
        };

        unsafe impl $crate::FixedLayout for $name {
            const FIELDS: ::core::option::Option<&'static [$crate::Field]> = {
                const TABLE: &[$crate::Field] = &[
                    $(
                        $crate::Field::new(
                            ::core::stringify!($field),
                            ::core::mem::offset_of!($name, $field),
                            ::core::mem::size_of::<$field_ty>(),
                        ),
                    )*
                ];

                ::core::option::Option::Some(TABLE)
            };
        }
    };
}

/// Compile-time check that `T` is of fixed layout, used by `fixed_layout!`.
#[doc(hidden)]
pub const fn assert_fixed_layout<T>()
    where
        T: FixedLayout
{}

//  Computed once per type, at compile time.
struct CachedSize<T>(PhantomData<T>);

impl<T> CachedSize<T> {
    const VALUE: isize = mem::size_of::<T>() as isize;
}

macro_rules! fixed_layout_primitives {
    ($($t:ty),*) => {
        $(
            //  Safety:
            //  -   Any bit pattern is a valid value.
            unsafe impl FixedLayout for $t {}
        )*
    };
}

fixed_layout_primitives!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

//  Safety:
//  -   An array has no padding of its own, and the layout of its elements is fixed.
unsafe impl<T, const N: usize> FixedLayout for [T; N]
    where
        T: FixedLayout
{}
