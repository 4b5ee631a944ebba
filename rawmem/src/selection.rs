//! Selection of the process-wide backend.
//!
//! The backend is selected once, and never changes afterwards:
//!
//! -   Either a host installs its own backend, prior to the first allocation.
//! -   Or the first allocation locks in the default backend, chosen at build time.
//!
//! Blocks allocated by one backend must be returned to it, hence switching backends mid-flight is not an option.

use core::{
    fmt,
    ptr,
    sync::atomic::{AtomicPtr, Ordering},
};

use rawmem_core::{Backend, Memory};

use crate::platform;

/// A backend, as registered by the host environment.
///
/// Declared as a `static`, then handed to `install`:
///
/// ```
/// use rawmem::{HeapBackend, Host};
///
/// static HEAP: HeapBackend = HeapBackend::new();
/// static HOST: Host = Host::new(&HEAP);
///
/// rawmem::install(&HOST).expect("First to select");
///
/// assert_eq!("heap", rawmem::backend_name());
/// ```
pub struct Host(&'static dyn Backend);

impl Host {
    /// Creates an instance.
    pub const fn new(backend: &'static dyn Backend) -> Self { Self(backend) }

    /// Returns the backend.
    pub fn backend(&self) -> &'static dyn Backend { self.0 }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Host").field(&self.0.name()).finish()
    }
}

/// Installs the backend of `host` as the process-wide backend.
///
/// Fails, returning the already selected host, if a backend was already selected: either by a prior call to
/// `install`, or by a prior allocation.
#[cold]
pub fn install(host: &'static Host) -> Result<(), &'static Host> {
    SELECTED.initialize(host)
}

/// Returns the name of the process-wide backend, selecting the default one if none is selected yet.
#[cold]
pub fn backend_name() -> &'static str { selected().backend().name() }

/// Returns the allocation front-end over the process-wide backend, selecting the default one if none is selected yet.
#[inline(always)]
pub fn memory() -> Memory<&'static dyn Backend> { Memory::new(selected().backend()) }

//
//  Implementation
//

#[cfg(feature = "native")]
static DEFAULT_BACKEND: platform::NativeBackend = platform::NativeBackend::new();

#[cfg(not(feature = "native"))]
static DEFAULT_BACKEND: platform::HeapBackend = platform::HeapBackend::new();

static DEFAULT: Host = Host::new(&DEFAULT_BACKEND);

static SELECTED: AtomicHost = AtomicHost::new();

#[inline(always)]
fn selected() -> &'static Host {
    SELECTED.load().unwrap_or_else(select_default)
}

//  Races to lock in the default backend; whoever wins, the result is the selected host.
#[cold]
#[inline(never)]
fn select_default() -> &'static Host {
    match SELECTED.initialize(&DEFAULT) {
        Ok(()) => &DEFAULT,
        Err(host) => host,
    }
}

//  A thread-safe, write-once, reference to a Host.
struct AtomicHost(AtomicPtr<Host>);

impl AtomicHost {
    const fn new() -> Self { Self(AtomicPtr::new(ptr::null_mut())) }

    //  Initializes the instance with the given host.
    //
    //  If `self` is already initialized, then the initialization fails and the current host is returned.
    fn initialize(&self, host: &'static Host) -> Result<(), &'static Host> {
        let pointer = host as *const Host as *mut Host;

        self.0.compare_exchange(ptr::null_mut(), pointer, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            //  Safety:
            //  -   Only references to `'static` hosts are ever stored, and the exchange failed on a non-null pointer.
            .map_err(|current| unsafe { &*current })
    }

    //  Loads the host, if initialized.
    fn load(&self) -> Option<&'static Host> {
        let pointer = self.0.load(Ordering::Acquire);

        //  Safety:
        //  -   Only references to `'static` hosts are ever stored.
        unsafe { pointer.as_ref() }
    }
}
