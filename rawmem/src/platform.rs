//! Abstraction over the allocators of the platform.

#[cfg(unix)]
mod heap;

#[cfg(unix)]
mod native;

#[cfg(unix)]
pub use heap::HeapBackend;

#[cfg(unix)]
pub use native::NativeBackend;

#[cfg(not(unix))]
compile_error!("rawmem platform backends are only implemented for unix targets");
