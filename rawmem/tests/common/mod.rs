//  Helpers shared by the multi-threaded test binaries.

#![allow(dead_code)]

use std::{sync::{self, atomic}, thread};

/// A pool of threads, joined on drop.
pub struct Pool<T>(Vec<thread::JoinHandle<T>>);

impl<T> Pool<T> {
    pub fn new<F, G>(count: usize, mut factory: F) -> Self
        where
            F: FnMut(usize) -> G,
            G: FnOnce() -> T + Send + 'static,
            T: Send + 'static
    {
        let threads : Vec<_> = (0..count)
            .map(|i| {
                thread::spawn(factory(i))
            })
            .collect();

        Self(threads)
    }

    pub fn join(mut self) -> Vec<T> {
        let thread_handles = std::mem::replace(&mut self.0, vec!());
        Self::join_handles(thread_handles)
    }

    fn join_handles(thread_handles: Vec<thread::JoinHandle<T>>) -> Vec<T> {
        //  First join _all_ threads.
        let results: Vec<_> = thread_handles.into_iter()
            .map(|handle| handle.join())
            .collect();
        //  Then collect the results.
        results.into_iter()
            .map(|value| value.unwrap())
            .collect()
    }
}

impl<T> Drop for Pool<T> {
    fn drop(&mut self) {
        let thread_handles = std::mem::replace(&mut self.0, vec!());
        Self::join_handles(thread_handles);
    }
}

/// Single-use barrier: each thread spins until all `count` threads have arrived.
#[derive(Clone, Debug)]
pub struct RendezVous(sync::Arc<atomic::AtomicUsize>);

impl RendezVous {
    pub fn new(count: usize) -> Self { Self(sync::Arc::new(atomic::AtomicUsize::new(count))) }

    pub fn wait_until_all_ready(&self) {
        self.0.fetch_sub(1, atomic::Ordering::AcqRel);

        while !self.is_ready() {
            std::hint::spin_loop();
        }
    }

    fn is_ready(&self) -> bool { self.0.load(atomic::Ordering::Acquire) == 0 }
}

pub fn number_iterations() -> usize { read_number_from_environment("RAWMEM_MULTI_NUMBER_ITERATIONS", 10) }

pub fn number_threads() -> usize {
    read_number_from_environment("RAWMEM_MULTI_NUMBER_THREADS", num_cpus::get().max(2).min(16))
}

fn read_number_from_environment(name: &str, default: usize) -> usize {
    if let Some(result) = std::env::var(name).ok().and_then(|value| value.parse().ok()) {
        println!("read_number_from_environment - {}: {}", name, result);
        return result;
    }

    println!("read_number_from_environment - {}: {} (default)", name, default);
    default
}
