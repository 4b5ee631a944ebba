//! The API of rawmem-core.

mod backend;
mod category;
mod handle;
mod layout;
mod memory;
mod view;
mod violation;

pub use backend::Backend;
pub use category::Category;
pub use handle::Handle;
pub use layout::{assert_fixed_layout, field_offset, size_of, Field, FixedLayout, LayoutError};
pub use memory::{copy_value_into, element_as_mut, Memory};
pub use view::RawView;
pub use violation::ContractViolation;
