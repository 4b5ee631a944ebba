//  A host-supplied backend, installed before any allocation in this test binary.

use std::{
    ptr::NonNull,
    sync::{atomic::{AtomicUsize, Ordering}, Once},
};

use rawmem::{Backend, Category, HeapBackend, Host};

//  Tallies the live blocks per category, delegating the actual work to the heap.
struct TallyBackend {
    heap: HeapBackend,
    live: [AtomicUsize; 5],
    reallocations: AtomicUsize,
}

impl TallyBackend {
    const fn new() -> Self {
        const ZERO: AtomicUsize = AtomicUsize::new(0);

        Self { heap: HeapBackend::new(), live: [ZERO; 5], reallocations: AtomicUsize::new(0) }
    }

    fn live(&self, category: Category) -> usize { self.live[category.into_raw() as usize].load(Ordering::SeqCst) }

    fn reallocations(&self) -> usize { self.reallocations.load(Ordering::SeqCst) }
}

impl Backend for TallyBackend {
    fn name(&self) -> &'static str { "tally" }

    unsafe fn allocate(&self, size: usize, category: Category) -> Option<NonNull<u8>> {
        let pointer = self.heap.allocate(size, category)?;
        self.live[category.into_raw() as usize].fetch_add(1, Ordering::SeqCst);
        Some(pointer)
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, category: Category) {
        self.live[category.into_raw() as usize].fetch_sub(1, Ordering::SeqCst);
        self.heap.deallocate(pointer, category);
    }

    unsafe fn reallocate(&self, pointer: NonNull<u8>, old_size: usize, new_size: usize, category: Category)
        -> Option<NonNull<u8>>
    {
        self.reallocations.fetch_add(1, Ordering::SeqCst);
        self.heap.reallocate(pointer, old_size, new_size, category)
    }
}

static TALLY: TallyBackend = TallyBackend::new();
static TALLY_HOST: Host = Host::new(&TALLY);

static OTHER: HeapBackend = HeapBackend::new();
static OTHER_HOST: Host = Host::new(&OTHER);

fn setup() {
    static INSTALL: Once = Once::new();

    INSTALL.call_once(|| rawmem::install(&TALLY_HOST).expect("First to select"));
}

#[test]
fn host_backend_is_selected() {
    setup();

    assert_eq!("tally", rawmem::backend_name());
}

#[test]
fn host_backend_cannot_be_replaced() {
    setup();

    let current = rawmem::install(&OTHER_HOST).expect_err("Already installed");

    assert!(std::ptr::eq(&TALLY_HOST, current));
    assert!(rawmem::install(&TALLY_HOST).is_err());
}

#[test]
fn host_backend_sees_categories() {
    setup();

    //  Only this test allocates `Temp` blocks in this binary.
    let first = rawmem::allocate(16, Category::Temp);
    let second = rawmem::allocate(32, Category::Temp);

    assert_eq!(2, TALLY.live(Category::Temp));

    unsafe {
        rawmem::free(first, Category::Temp);
        rawmem::free(second, Category::Temp);
    }

    assert_eq!(0, TALLY.live(Category::Temp));
}

#[test]
fn host_backend_serves_growth() {
    setup();

    //  Only this test allocates `TempJob` blocks in this binary.
    let handle = rawmem::allocate(4, Category::TempJob);

    unsafe {
        rawmem::copy_value_into(&0xCAFE_F00Du32, &handle);

        let before = TALLY.reallocations();
        let handle = rawmem::reallocate(handle, 4, 64, Category::TempJob);
        assert!(TALLY.reallocations() > before);

        assert_eq!(0xCAFE_F00D, handle.view::<u32>(64).read(0));
        assert_eq!(1, TALLY.live(Category::TempJob));

        rawmem::free(handle, Category::TempJob);
    }

    assert_eq!(0, TALLY.live(Category::TempJob));
}
