//! Host-installable allocation hooks, documenting spec §6's allocator vtable
//! shape as a Rust trait.
//!
//! Spec §6 describes a host-provided structure of three nullable function
//! pointers (allocate, free, reallocate) installed once, process-wide. Spec
//! §9's Design Notes call that out as something "a rewrite should pass ...
//! through a context parameter rather than installing one process-wide," so
//! here the equivalent is a small trait rather than a global.
//!
//! Every allocation this crate makes (`Vec`, `String`, `IndexMap`) already
//! delegates to the process allocator with no stable, safe seam to intercept
//! per-call short of the unstable `allocator_api` feature or a process-wide
//! `#[global_allocator]`. Neither the serializer nor any other call site in
//! this crate is wired up to use [`Allocator`] — it documents the host-hook
//! shape spec §6 describes without a fabricated integration point. See
//! `DESIGN.md`'s Allocator-hooks entry for the scope decision.

use std::alloc::{GlobalAlloc, Layout, System};

/// Three allocator hooks, analogous to spec §6's allocate/free/reallocate
/// trio. A null field there "falls back to the platform allocator"; here that
/// is simply the default trait methods, which delegate to [`System`].
pub trait Allocator: Send + Sync {
    /// Allocate `layout` bytes, or return null on failure.
    ///
    /// # Safety
    ///
    /// Same contract as [`GlobalAlloc::alloc`].
    unsafe fn allocate(&self, layout: Layout) -> *mut u8 {
        unsafe { System.alloc(layout) }
    }

    /// Free a block previously returned by `allocate` or `reallocate`.
    ///
    /// # Safety
    ///
    /// Same contract as [`GlobalAlloc::dealloc`].
    unsafe fn free(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    /// Grow or shrink a block previously returned by `allocate` or
    /// `reallocate`.
    ///
    /// # Safety
    ///
    /// Same contract as [`GlobalAlloc::realloc`].
    unsafe fn reallocate(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

/// The default allocator: the platform's global allocator, used when no host
/// hook is installed (spec §6: "Null fields fall back to the platform
/// allocator").
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAllocator;

impl Allocator for DefaultAllocator {}

#[cfg(test)]
mod tests {
    use std::alloc::Layout;

    use super::{Allocator, DefaultAllocator};

    #[test]
    fn default_allocator_round_trips() {
        let a = DefaultAllocator;
        let layout = Layout::array::<u8>(64).unwrap();
        unsafe {
            let ptr = a.allocate(layout);
            assert!(!ptr.is_null());
            let ptr = a.reallocate(ptr, layout, 128);
            assert!(!ptr.is_null());
            a.free(ptr, Layout::array::<u8>(128).unwrap());
        }
    }
}
