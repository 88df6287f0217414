//! Raw slot storage.
//!
//! `Slots` owns one block of `capacity` element slots and nothing else: it
//! never knows which slots are initialized. Constructing and destroying
//! elements is explicit, through the unsafe accessors, and is the job of the
//! owning `RingBuffer`.

use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

use crate::error::TryReserveError;

pub struct Slots<T> {
    ptr: NonNull<T>,
    cap: usize,
    marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for Slots<T> {}
unsafe impl<T: Sync> Sync for Slots<T> {}

impl<T> Slots<T> {
    /// A block with no slots. Does not allocate.
    #[inline]
    pub const fn new() -> Slots<T> {
        Slots {
            ptr: NonNull::dangling(),
            cap: 0,
            marker: PhantomData,
        }
    }

    /// Allocates `capacity` uninitialized slots.
    ///
    /// Zero-sized element types never touch the allocator.
    pub fn try_with_capacity(capacity: usize) -> Result<Slots<T>, TryReserveError> {
        let layout = Self::layout(capacity)?;
        if layout.size() == 0 {
            return Ok(Slots {
                ptr: NonNull::dangling(),
                cap: capacity,
                marker: PhantomData,
            });
        }
        let raw = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(raw) {
            Some(ptr) => Ok(Slots {
                ptr,
                cap: capacity,
                marker: PhantomData,
            }),
            None => Err(TryReserveError::AllocError { layout }),
        }
    }

    /// Allocates `capacity` uninitialized slots.
    ///
    /// # Panics
    ///
    /// Panics if the byte size overflows `isize::MAX`. Allocator failure
    /// goes through `handle_alloc_error`.
    pub fn with_capacity(capacity: usize) -> Slots<T> {
        match Self::try_with_capacity(capacity) {
            Ok(slots) => slots,
            Err(TryReserveError::CapacityOverflow) => panic!("capacity overflow"),
            Err(TryReserveError::AllocError { layout }) => handle_alloc_error(layout),
        }
    }

    #[inline]
    fn layout(capacity: usize) -> Result<Layout, TryReserveError> {
        Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Largest slot count a block of `T` could ever describe.
    #[inline]
    pub fn max_slots() -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            size => usize::MAX / size,
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    fn slot_ptr(&self, slot: usize) -> *mut T {
        debug_assert!(slot < self.cap, "slot {} out of {}", slot, self.cap);
        unsafe { self.ptr.as_ptr().add(slot) }
    }

    /// Moves the element out of `slot`, leaving it logically uninitialized.
    #[inline]
    pub unsafe fn read(&self, slot: usize) -> T {
        ptr::read(self.slot_ptr(slot))
    }

    /// Constructs `element` in the uninitialized `slot`.
    #[inline]
    pub unsafe fn write(&mut self, slot: usize, element: T) {
        ptr::write(self.slot_ptr(slot), element);
    }

    /// Swaps `element` with the live value in `slot`.
    #[inline]
    pub unsafe fn replace(&mut self, slot: usize, element: T) -> T {
        ptr::replace(self.slot_ptr(slot), element)
    }

    /// Destroys the live value in `slot`.
    #[inline]
    pub unsafe fn drop_in_place(&mut self, slot: usize) {
        ptr::drop_in_place(self.slot_ptr(slot));
    }

    #[inline]
    pub unsafe fn get(&self, slot: usize) -> &T {
        &*self.slot_ptr(slot)
    }

    #[inline]
    pub unsafe fn get_mut(&mut self, slot: usize) -> &mut T {
        &mut *self.slot_ptr(slot)
    }

    /// Copies a contiguous run of `len` slots inside this block. The runs
    /// may overlap.
    #[inline]
    pub unsafe fn copy(&mut self, dst: usize, src: usize, len: usize) {
        debug_assert!(
            dst + len <= self.cap,
            "cpy dst={} src={} len={} cap={}",
            dst,
            src,
            len,
            self.cap
        );
        debug_assert!(
            src + len <= self.cap,
            "cpy dst={} src={} len={} cap={}",
            dst,
            src,
            len,
            self.cap
        );
        let base = self.ptr.as_ptr();
        ptr::copy(base.add(src), base.add(dst), len);
    }

    /// Moves `len` slots starting at `src` into `dst` starting at `at`.
    #[inline]
    pub unsafe fn move_to(&self, src: usize, dst: &mut Slots<T>, at: usize, len: usize) {
        debug_assert!(src + len <= self.cap);
        debug_assert!(at + len <= dst.cap);
        ptr::copy_nonoverlapping(self.ptr.as_ptr().add(src), dst.ptr.as_ptr().add(at), len);
    }
}

impl<T> Drop for Slots<T> {
    fn drop(&mut self) {
        if let Ok(layout) = Self::layout(self.cap) {
            if layout.size() != 0 {
                unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_does_not_allocate() {
        let slots: Slots<u32> = Slots::new();
        assert_eq!(slots.capacity(), 0);
        let slots: Slots<u32> = Slots::with_capacity(0);
        assert_eq!(slots.capacity(), 0);
    }

    #[test]
    fn write_read_roundtrip_in_place() {
        let mut slots: Slots<String> = Slots::with_capacity(3);
        unsafe {
            slots.write(0, "a".to_string());
            slots.write(2, "c".to_string());
            assert_eq!(slots.get(2), "c");
            let old = slots.replace(2, "z".to_string());
            assert_eq!(old, "c");
            slots.copy(1, 2, 1);
            assert_eq!(slots.read(1), "z");
            assert_eq!(slots.read(0), "a");
        }
    }

    #[test]
    fn overflowing_layout_is_reported() {
        let err = Slots::<u64>::try_with_capacity(usize::MAX).err();
        assert_eq!(err, Some(TryReserveError::CapacityOverflow));
    }

    #[test]
    fn zero_sized_elements_keep_capacity() {
        let slots: Slots<()> = Slots::with_capacity(usize::MAX);
        assert_eq!(slots.capacity(), usize::MAX);
        assert_eq!(Slots::<()>::max_slots(), usize::MAX);
        assert_eq!(Slots::<u32>::max_slots(), usize::MAX / 4);
    }
}
