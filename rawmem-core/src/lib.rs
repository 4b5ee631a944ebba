#![no_std]

#![deny(missing_docs)]

//! Building blocks for an allocator-agnostic layer over raw, unmanaged memory.
//!
//! rawmem-core is the backend-independent part of rawmem. It contains:
//! -   A backend trait, used to obtain, grow, clear and release raw blocks of memory.
//! -   An owning handle to such a block, and a front-end enforcing the allocation contracts over any backend.
//! -   Layout introspection for fixed-layout value types: size, field offsets, and alignment helpers.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod api;
mod utils;

pub use api::*;
pub use utils::{align_up4, OPTIMAL_ALIGNMENT, PowerOf2};
