use alloc::alloc::handle_alloc_error;
use core::cmp;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ptr;
use core::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use super::RingBuffer;
use crate::behavior::Behavior;
use crate::cursor::Handle;
use crate::error::TryReserveError;
use crate::position::{Position, Ring};
use crate::storage::Slots;
use crate::utils::{advance, retreat};

/// Unwraps a growth result the way the infallible entry points expect.
#[inline]
pub(crate) fn infallible<R>(result: Result<R, TryReserveError>) -> R {
    match result {
        Ok(value) => value,
        Err(TryReserveError::CapacityOverflow) => panic!("capacity overflow"),
        Err(TryReserveError::AllocError { layout }) => handle_alloc_error(layout),
    }
}

static STAMPS: AtomicUsize = AtomicUsize::new(1);

/// A generation or lineage value no buffer in the process has used before.
#[inline]
pub(crate) fn fresh_stamp() -> u64 {
    STAMPS.fetch_add(1, AtomicOrdering::Relaxed) as u64
}

impl<T, B: Behavior> RingBuffer<T, B> {
    #[inline]
    pub(crate) fn ring(&self) -> Ring {
        Ring::new(self.begin, self.len, self.slots.capacity())
    }

    /// Id of the slot right after the last element.
    #[inline]
    fn tail_id(&self) -> u64 {
        self.head_id.wrapping_add(self.len as u64)
    }

    /// Starts a new generation: every `Slot` handle taken so far goes stale
    /// and the id range restarts at the live elements.
    #[inline]
    pub(crate) fn bump_generation(&mut self) {
        self.generation = fresh_stamp();
        self.id_floor = self.head_id;
        self.id_ceiling = self.tail_id();
    }

    /// Starts a new lineage, so that `Begin`/`End` handles taken so far go
    /// stale as well.
    #[inline]
    pub(crate) fn renew_lineage(&mut self) {
        self.lineage = fresh_stamp();
        self.bump_generation();
    }

    /// Records that the last element took a new id. An id inside
    /// `[id_floor, id_ceiling)` may still be held by a stale handle.
    #[inline]
    pub(crate) fn claim_back_id(&mut self) {
        let id = self.tail_id().wrapping_sub(1);
        if id == self.id_ceiling {
            self.id_ceiling = id.wrapping_add(1);
        } else {
            self.bump_generation();
        }
    }

    /// Records that the first element took a new id.
    #[inline]
    pub(crate) fn claim_front_id(&mut self) {
        if self.head_id.wrapping_add(1) == self.id_floor {
            self.id_floor = self.head_id;
        } else {
            self.bump_generation();
        }
    }

    /// Detaches `pos` into a handle stamped for the current state.
    #[inline]
    pub(crate) fn handle_for(&self, pos: Position) -> Handle {
        match pos {
            Position::Begin | Position::End => Handle::new(pos, self.lineage, 0),
            Position::Slot(_) => {
                let id = self.head_id.wrapping_add(self.ring().linearize(pos) as u64);
                Handle::new(pos, self.generation, id)
            }
        }
    }

    #[inline]
    fn wrap_add(&self, slot: usize, addend: usize) -> usize {
        advance(slot, addend, self.slots.capacity())
    }

    #[inline]
    fn wrap_sub(&self, slot: usize, subtrahend: usize) -> usize {
        retreat(slot, subtrahend, self.slots.capacity())
    }

    #[inline]
    pub(crate) fn is_contiguous(&self) -> bool {
        self.begin + self.len <= self.slots.capacity()
    }

    /// Length of the run that starts at `begin` before the block end.
    #[inline]
    pub(crate) fn front_run(&self) -> usize {
        cmp::min(self.len, self.slots.capacity() - self.begin)
    }

    #[inline]
    pub(crate) fn element(&self, pos: Position) -> Option<&T> {
        let slot = self.ring().element_slot(pos)?;
        unsafe { Some(self.slots.get(slot)) }
    }

    #[inline]
    pub(crate) fn element_mut(&mut self, pos: Position) -> Option<&mut T> {
        let slot = self.ring().element_slot(pos)?;
        unsafe { Some(self.slots.get_mut(slot)) }
    }

    /// Reinterprets the buffer under another behavior without touching storage.
    pub(crate) fn rebrand<C: Behavior>(self) -> RingBuffer<T, C> {
        let this = ManuallyDrop::new(self);
        let mut buf = RingBuffer {
            slots: unsafe { ptr::read(&this.slots) },
            begin: this.begin,
            len: this.len,
            head_id: this.head_id,
            id_floor: this.id_floor,
            id_ceiling: this.id_ceiling,
            generation: this.generation,
            lineage: this.lineage,
            behavior: PhantomData,
        };
        buf.renew_lineage();
        buf
    }

    /// Copies a potentially wrapping block of slots len long from src to dst.
    /// (abs(dst - src) + len) must be no larger than capacity (There must be at
    /// most one continuous overlapping region between src and dst).
    pub(crate) unsafe fn wrap_copy(&mut self, dst: usize, src: usize, len: usize) {
        fn diff(a: usize, b: usize) -> usize {
            if a <= b {
                b - a
            } else {
                a - b
            }
        }
        let cap = self.slots.capacity();
        debug_assert!(
            cmp::min(diff(dst, src), cap - diff(dst, src)) + len <= cap,
            "wrc dst={} src={} len={} cap={}",
            dst,
            src,
            len,
            cap
        );

        if src == dst || len == 0 {
            return;
        }

        let dst_after_src = self.wrap_sub(dst, src) < len;

        let src_pre_wrap_len = cap - src;
        let dst_pre_wrap_len = cap - dst;
        let src_wraps = src_pre_wrap_len < len;
        let dst_wraps = dst_pre_wrap_len < len;

        match (dst_after_src, src_wraps, dst_wraps) {
            (_, false, false) => {
                // src doesn't wrap, dst doesn't wrap
                //
                //        S . . .
                // 1 [_ _ A A B B C C _]
                // 2 [_ _ A A A A B B _]
                //            D . . .
                //
                self.slots.copy(dst, src, len);
            }
            (false, false, true) => {
                // dst before src, src doesn't wrap, dst wraps
                //
                //    S . . .
                // 1 [A A B B _ _ _ C C]
                // 2 [A A B B _ _ _ A A]
                // 3 [B B B B _ _ _ A A]
                //    . .           D .
                //
                self.slots.copy(dst, src, dst_pre_wrap_len);
                self.slots.copy(0, src + dst_pre_wrap_len, len - dst_pre_wrap_len);
            }
            (true, false, true) => {
                // src before dst, src doesn't wrap, dst wraps
                //
                //              S . . .
                // 1 [C C _ _ _ A A B B]
                // 2 [B B _ _ _ A A B B]
                // 3 [B B _ _ _ A A A A]
                //    . .           D .
                //
                self.slots.copy(0, src + dst_pre_wrap_len, len - dst_pre_wrap_len);
                self.slots.copy(dst, src, dst_pre_wrap_len);
            }
            (false, true, false) => {
                // dst before src, src wraps, dst doesn't wrap
                //
                //    . .           S .
                // 1 [C C _ _ _ A A B B]
                // 2 [C C _ _ _ B B B B]
                // 3 [C C _ _ _ B B C C]
                //              D . . .
                //
                self.slots.copy(dst, src, src_pre_wrap_len);
                self.slots.copy(dst + src_pre_wrap_len, 0, len - src_pre_wrap_len);
            }
            (true, true, false) => {
                // src before dst, src wraps, dst doesn't wrap
                //
                //    . .           S .
                // 1 [A A B B _ _ _ C C]
                // 2 [A A A A _ _ _ C C]
                // 3 [C C A A _ _ _ C C]
                //    D . . .
                //
                self.slots.copy(dst + src_pre_wrap_len, 0, len - src_pre_wrap_len);
                self.slots.copy(dst, src, src_pre_wrap_len);
            }
            (false, true, true) => {
                // dst before src, src wraps, dst wraps
                //
                //    . . .         S .
                // 1 [A B C D _ E F G H]
                // 2 [A B C D _ E G H H]
                // 3 [A B C D _ E G H A]
                // 4 [B C C D _ E G H A]
                //    . .         D . .
                //
                debug_assert!(dst_pre_wrap_len > src_pre_wrap_len);
                let delta = dst_pre_wrap_len - src_pre_wrap_len;
                self.slots.copy(dst, src, src_pre_wrap_len);
                self.slots.copy(dst + src_pre_wrap_len, 0, delta);
                self.slots.copy(0, delta, len - dst_pre_wrap_len);
            }
            (true, true, true) => {
                // src before dst, src wraps, dst wraps
                //
                //    . .         S . .
                // 1 [A B C D _ E F G H]
                // 2 [A A B D _ E F G H]
                // 3 [H A B D _ E F G H]
                // 4 [H A B D _ E F F G]
                //    . . .         D .
                //
                debug_assert!(src_pre_wrap_len > dst_pre_wrap_len);
                let delta = src_pre_wrap_len - dst_pre_wrap_len;
                self.slots.copy(delta, 0, len - src_pre_wrap_len);
                self.slots.copy(0, cap - delta, delta);
                self.slots.copy(dst, src, dst_pre_wrap_len);
            }
        }
    }

    #[inline]
    pub(crate) fn push_front_expecting_space_available(&mut self, element: T) {
        debug_assert!(!self.is_full());
        let new_begin = if self.len == 0 { 0 } else { self.wrap_sub(self.begin, 1) };
        unsafe { self.slots.write(new_begin, element) }
        self.begin = new_begin;
        self.len += 1;
        self.head_id = self.head_id.wrapping_sub(1);
        self.claim_front_id();
    }

    #[inline]
    pub(crate) fn push_back_expecting_space_available(&mut self, element: T) {
        debug_assert!(!self.is_full());
        let end = self.ring().end_slot();
        unsafe { self.slots.write(end, element) }
        self.len += 1;
        self.claim_back_id();
    }

    /// Inserts at logical `index`, moving whichever side of the ring is
    /// shorter by one slot. At most `len / 2` elements move.
    pub(crate) fn insert_expecting_space_available(&mut self, index: usize, element: T) {
        debug_assert!(!self.is_full());
        assert!(index <= self.len, "index out of bounds");

        if self.len == 0 {
            self.begin = 0;
        }

        let distance_to_begin = index;
        let distance_to_end = self.len - index;

        unsafe {
            if distance_to_begin < distance_to_end {
                //       B   I       E
                // [. . . o o A o o o . .]
                //
                //     B       E
                // [. . o o I A o o o . .]
                //     M M
                let old_begin = self.begin;
                let new_begin = self.wrap_sub(old_begin, 1);
                self.wrap_copy(new_begin, old_begin, index);
                self.begin = new_begin;
            } else {
                //       B     I   E
                // [. . . o o o A o . .]
                //
                //       B         E
                // [. . . o o o I A o .]
                //                M M
                let at = self.ring().physical(index);
                let dst = self.wrap_add(at, 1);
                self.wrap_copy(dst, at, distance_to_end);
            }
            let slot = self.ring().physical(index);
            self.slots.write(slot, element);
        }
        self.len += 1;
    }

    /// Removes the element at logical `index`, closing the gap from whichever
    /// side is shorter.
    pub(crate) fn remove_expecting_element(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        let at = self.ring().physical(index);
        let distance_to_begin = index;
        let distance_to_end = self.len - index - 1;

        let element = unsafe {
            let element = self.slots.read(at);
            if distance_to_begin < distance_to_end {
                //       B   x       E
                // [. . . o o x o o o . .]
                //
                //         B         E
                // [. . . . o o o o o . .]
                //         M M
                let old_begin = self.begin;
                let dst = self.wrap_add(old_begin, 1);
                self.wrap_copy(dst, old_begin, index);
                self.begin = dst;
            } else {
                //       B     x   E
                // [. . . o o o x o . .]
                //
                //       B       E
                // [. . . o o o o . . .]
                //              M
                let src = self.wrap_add(at, 1);
                self.wrap_copy(at, src, distance_to_end);
            }
            element
        };
        self.len -= 1;
        if self.len == 0 {
            self.begin = 0;
        }
        element
    }

    #[inline]
    pub(crate) unsafe fn swap_offsets(&mut self, i: usize, j: usize) {
        let ring = self.ring();
        let base = self.slots.as_mut_ptr();
        ptr::swap(base.add(ring.physical(i)), base.add(ring.physical(j)));
    }

    /// Moves every element into a fresh block of exactly `new_capacity` slots,
    /// in logical order starting at slot 0. Elements past `new_capacity` are
    /// dropped. On error the buffer is untouched.
    pub(crate) fn try_relocate(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        let mut fresh = Slots::try_with_capacity(new_capacity)?;
        if new_capacity < self.len {
            self.truncate(new_capacity);
        }

        let old_capacity = self.slots.capacity();
        let front = self.front_run();
        let back = self.len - front;
        unsafe {
            self.slots.move_to(self.begin, &mut fresh, 0, front);
            self.slots.move_to(0, &mut fresh, front, back);
        }
        self.slots = fresh;
        self.begin = 0;
        self.bump_generation();

        tracing::trace!(
            target: "ringdeque",
            old_capacity,
            new_capacity,
            len = self.len,
            "relocated ring storage"
        );
        Ok(())
    }

    /// Capacity after one growth step: doubled, or a single slot from zero.
    #[inline]
    fn grown_capacity(capacity: usize) -> Result<usize, TryReserveError> {
        match capacity {
            0 => Ok(1),
            cap => cap.checked_mul(2).ok_or(TryReserveError::CapacityOverflow),
        }
    }

    /// Doubles the capacity until `additional` more elements fit.
    pub(crate) fn try_grow_to_fit(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(TryReserveError::CapacityOverflow)?;
        let old_capacity = self.capacity();
        if needed <= old_capacity {
            return Ok(());
        }
        let mut new_capacity = old_capacity;
        while new_capacity < needed {
            new_capacity = Self::grown_capacity(new_capacity)?;
        }
        tracing::debug!(
            target: "ringdeque",
            old_capacity,
            new_capacity,
            "growing ring buffer"
        );
        self.try_relocate(new_capacity)
    }

    #[inline]
    pub(crate) fn grow_to_fit(&mut self, additional: usize) {
        infallible(self.try_grow_to_fit(additional))
    }

    /// Inserts at logical `index`, growing first when the buffer is full.
    pub(crate) fn insert_index(&mut self, index: usize, element: T) {
        assert!(index <= self.len, "index out of bounds");
        self.grow_to_fit(1);
        self.insert_expecting_space_available(index, element);
        self.bump_generation();
    }
}
