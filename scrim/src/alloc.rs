//! Allocation shim between the UI library and the host allocator.
//!
//! The library allocates font-atlas scratch and conversion buffers through
//! [`ShimAllocator`], which draws memory from a [`HostAllocator`] and records
//! every outstanding block by address. Releasing an address with no registry
//! entry is a library-side programming error and is treated as fatal.

use std::collections::HashMap;
use std::ptr::NonNull;

/// Host-side source of raw memory.
///
/// Returned buffers are zero-initialized. `release` takes back a buffer that
/// came out of `allocate` on the same allocator.
pub trait HostAllocator {
    fn allocate(&mut self, byte_count: usize) -> Box<[u8]>;
    fn release(&mut self, buffer: Box<[u8]>);
}

/// [`HostAllocator`] backed by the process allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl HostAllocator for SystemAllocator {
    fn allocate(&mut self, byte_count: usize) -> Box<[u8]> {
        vec![0u8; byte_count].into_boxed_slice()
    }

    fn release(&mut self, buffer: Box<[u8]>) {
        drop(buffer);
    }
}

struct Allocation {
    /// Size originally requested; zero-byte requests still occupy one byte.
    requested: usize,
    /// Raw block handed to the library, reboxed on release.
    block: *mut [u8],
}

/// Routes library allocations through a [`HostAllocator`] and records every
/// outstanding allocation by address.
pub struct ShimAllocator {
    host: Box<dyn HostAllocator>,
    registry: HashMap<usize, Allocation>,
}

impl ShimAllocator {
    pub fn new(host: impl HostAllocator + 'static) -> Self {
        ShimAllocator {
            host: Box::new(host),
            registry: HashMap::new(),
        }
    }

    /// Hand out a zero-initialized block of `byte_count` bytes.
    ///
    /// Zero-byte requests still return a unique, registry-tracked address.
    pub fn allocate(&mut self, byte_count: usize) -> NonNull<u8> {
        let block = Box::into_raw(self.host.allocate(byte_count.max(1)));
        let address = block as *mut u8 as usize;
        tracing::trace!(target: "scrim", address, byte_count, "shim allocate");
        self.registry.insert(address, Allocation { requested: byte_count, block });
        // Box::into_raw never returns null.
        unsafe { NonNull::new_unchecked(block as *mut u8) }
    }

    /// Release a block previously handed out by [`allocate`](Self::allocate).
    ///
    /// Null is ignored. Any other address must have a live registry entry;
    /// a miss is logged and raised as a panic.
    pub fn release(&mut self, ptr: *mut u8) {
        if ptr.is_null() {
            return;
        }
        let address = ptr as usize;
        let Some(allocation) = self.registry.remove(&address) else {
            tracing::error!(target: "scrim", address, "release of an address the shim never allocated");
            panic!("release of address {address:#x} the shim never allocated");
        };
        tracing::trace!(target: "scrim", address, byte_count = allocation.requested, "shim release");
        // SAFETY: the block came out of Box::into_raw in allocate and its
        // registry entry was just removed, so this rebox happens exactly once.
        let buffer = unsafe { Box::from_raw(allocation.block) };
        self.host.release(buffer);
    }

    /// Size recorded for a live allocation.
    pub fn allocation_size(&self, ptr: *const u8) -> Option<usize> {
        self.registry.get(&(ptr as usize)).map(|a| a.requested)
    }

    /// Number of live allocations.
    pub fn live_allocations(&self) -> usize {
        self.registry.len()
    }

    /// Sum of requested bytes across live allocations.
    pub fn bytes_in_flight(&self) -> usize {
        self.registry.values().map(|a| a.requested).sum()
    }
}

impl Default for ShimAllocator {
    fn default() -> Self {
        Self::new(SystemAllocator)
    }
}

impl Drop for ShimAllocator {
    fn drop(&mut self) {
        for (address, allocation) in self.registry.drain() {
            tracing::debug!(
                target: "scrim",
                address,
                byte_count = allocation.requested,
                "releasing allocation left behind by the library"
            );
            // SAFETY: same single-rebox argument as in release.
            let buffer = unsafe { Box::from_raw(allocation.block) };
            self.host.release(buffer);
        }
    }
}

impl std::fmt::Debug for ShimAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShimAllocator")
            .field("live_allocations", &self.registry.len())
            .field("bytes_in_flight", &self.bytes_in_flight())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingHost {
        allocated: Rc<Cell<usize>>,
        released: Rc<Cell<usize>>,
    }

    impl HostAllocator for CountingHost {
        fn allocate(&mut self, byte_count: usize) -> Box<[u8]> {
            self.allocated.set(self.allocated.get() + 1);
            vec![0u8; byte_count].into_boxed_slice()
        }

        fn release(&mut self, buffer: Box<[u8]>) {
            self.released.set(self.released.get() + 1);
            drop(buffer);
        }
    }

    #[test]
    fn allocate_release_round_trip() {
        let mut alloc = ShimAllocator::default();
        let ptr = alloc.allocate(256);
        assert_eq!(alloc.allocation_size(ptr.as_ptr()), Some(256));
        assert_eq!(alloc.bytes_in_flight(), 256);
        alloc.release(ptr.as_ptr());
        assert_eq!(alloc.live_allocations(), 0);
        assert_eq!(alloc.bytes_in_flight(), 0);
    }

    #[test]
    fn zero_byte_allocations_get_distinct_addresses() {
        let mut alloc = ShimAllocator::default();
        let a = alloc.allocate(0);
        let b = alloc.allocate(0);
        assert_ne!(a, b);
        assert_eq!(alloc.allocation_size(a.as_ptr()), Some(0));
        alloc.release(a.as_ptr());
        alloc.release(b.as_ptr());
    }

    #[test]
    fn releasing_null_is_ignored() {
        let mut alloc = ShimAllocator::default();
        alloc.release(std::ptr::null_mut());
        assert_eq!(alloc.live_allocations(), 0);
    }

    #[test]
    #[should_panic(expected = "never allocated")]
    fn releasing_an_unknown_address_is_fatal() {
        let mut alloc = ShimAllocator::default();
        let bogus = alloc.allocate(8).as_ptr().wrapping_add(1);
        alloc.release(bogus);
    }

    #[test]
    fn drop_returns_leftovers_to_the_host() {
        let host = CountingHost::default();
        let (allocated, released) = (host.allocated.clone(), host.released.clone());
        let mut alloc = ShimAllocator::new(host);
        alloc.allocate(64);
        alloc.allocate(128);
        drop(alloc);
        assert_eq!(allocated.get(), 2);
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn writes_through_handed_out_blocks_stick() {
        let mut alloc = ShimAllocator::default();
        let ptr = alloc.allocate(4);
        // SAFETY: the block is 4 bytes, live, and nothing else aliases it.
        unsafe {
            std::slice::from_raw_parts_mut(ptr.as_ptr(), 4).copy_from_slice(&[1, 2, 3, 4]);
            assert_eq!(std::slice::from_raw_parts(ptr.as_ptr(), 4), &[1, 2, 3, 4]);
        }
        alloc.release(ptr.as_ptr());
    }
}
