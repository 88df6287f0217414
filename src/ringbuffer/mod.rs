use alloc::vec::Vec;
use core::cmp::Ordering;
use core::marker::PhantomData;
use core::mem;
use core::ptr;
use core::slice;

pub use odds::IndexRange as RangeArgument;

use crate::behavior::{Behavior, Wrapping};
use crate::cursor::{Cursor, CursorMut, Handle};
use crate::error::TryReserveError;
use crate::position::Position;
use crate::storage::Slots;

use self::internal::{fresh_stamp, infallible};

mod internal;
mod iterator_impls;
mod push;
mod trait_impls;

pub use self::iterator_impls::{Drain, IntoIter, Iter, IterMut};

/// A ring buffer over one heap block, addressed modulo its capacity.
///
/// The "default" usage of this type as a queue is to use `push_back` to add to
/// the queue, and `pop_front` to remove from the queue. Iterating over
/// `RingBuffer` goes front to back.
///
/// The behavior parameter decides what a push does once the buffer is full:
/// [`Wrapping`] (the default) overwrites the element at the opposite end,
/// [`Growing`](crate::Growing) doubles the capacity instead. Everything else
/// is shared.
///
/// # Positions
///
/// Besides plain indices, the buffer hands out [`Cursor`]s (random access,
/// borrowing), [`CursorMut`]s, and detached [`Handle`]s.
///
/// A handle to an element survives `push_*` and `pop_*` calls that neither
/// reallocate nor remove that element. It goes stale when its element is
/// popped or overwritten, when a push refills a slot that was vacated while
/// handles to it could exist, on any reallocation, and on every operation
/// that shifts elements (`insert*`, `erase*`, `remove`, `drain`, `retain`,
/// `truncate`, `resize*`, `assign*`, `clear`, `swap`, `make_contiguous`,
/// `sort*`). Handles to the begin and end positions follow the ends of the
/// buffer and only go stale on `swap`, `assign*`, and policy conversion.
/// A handle is never valid on a buffer other than the one it came from.
/// Check with [`is_valid`](RingBuffer::is_valid).
pub struct RingBuffer<T, B: Behavior = Wrapping> {
    slots: Slots<T>,
    begin: usize,
    len: usize,
    // element ids: the first element has `head_id`, the rest count up from
    // it; ids in `[id_floor, id_ceiling)` were handed out this generation
    head_id: u64,
    id_floor: u64,
    id_ceiling: u64,
    generation: u64,
    lineage: u64,
    behavior: PhantomData<B>,
}

impl<T, B: Behavior> RingBuffer<T, B> {
    /// Creates an empty `RingBuffer` with zero capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::new();
    /// assert_eq!(buf.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> RingBuffer<T, B> {
        RingBuffer::with_slots(Slots::new())
    }

    #[inline]
    fn with_slots(slots: Slots<T>) -> RingBuffer<T, B> {
        RingBuffer {
            slots,
            begin: 0,
            len: 0,
            head_id: 0,
            id_floor: 0,
            id_ceiling: 0,
            generation: fresh_stamp(),
            lineage: fresh_stamp(),
            behavior: PhantomData,
        }
    }

    /// Creates an empty `RingBuffer` holding exactly `capacity` slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::with_capacity(10);
    /// assert_eq!(buf.capacity(), 10);
    /// assert!(buf.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> RingBuffer<T, B> {
        infallible(Self::try_with_capacity(capacity))
    }

    /// Fallible version of [`with_capacity`](RingBuffer::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<RingBuffer<T, B>, TryReserveError> {
        Ok(RingBuffer::with_slots(Slots::try_with_capacity(capacity)?))
    }

    /// Creates a full buffer of `len` clones of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let buf: RingBuffer<_> = RingBuffer::from_elem("x", 3);
    /// assert_eq!(buf, ["x", "x", "x"]);
    /// assert!(buf.is_full());
    /// ```
    pub fn from_elem(value: T, len: usize) -> RingBuffer<T, B>
    where
        T: Clone,
    {
        let mut buf = Self::with_capacity(len);
        if len > 0 {
            for _ in 1..len {
                buf.push_back_expecting_space_available(value.clone());
            }
            buf.push_back_expecting_space_available(value);
        }
        buf
    }

    /// Creates a full buffer of `len` default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let buf: RingBuffer<u8> = RingBuffer::with_default(2);
    /// assert_eq!(buf, [0, 0]);
    /// assert_eq!(buf.capacity(), 2);
    /// ```
    pub fn with_default(len: usize) -> RingBuffer<T, B>
    where
        T: Default,
    {
        let mut buf = Self::with_capacity(len);
        for _ in 0..len {
            buf.push_back_expecting_space_available(T::default());
        }
        buf
    }

    /// Retrieves an element in the `RingBuffer` by index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(4);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// assert_eq!(buf.get(1), Some(&4));
    /// assert_eq!(buf.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            let slot = self.ring().physical(index);
            unsafe { Some(self.slots.get(slot)) }
        } else {
            None
        }
    }

    /// Retrieves an element in the `RingBuffer` mutably by index.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from(vec![3, 4, 5]);
    /// if let Some(elem) = buf.get_mut(1) {
    ///     *elem = 7;
    /// }
    ///
    /// assert_eq!(buf[1], 7);
    /// ```
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            let slot = self.ring().physical(index);
            unsafe { Some(self.slots.get_mut(slot)) }
        } else {
            None
        }
    }

    /// Return the capacity of the `RingBuffer`.
    ///
    /// Unlike a fixed array deque, every slot is usable: a buffer of
    /// capacity `n` holds `n` elements when full.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Theoretical upper bound on the capacity for this element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let buf: RingBuffer<u32> = RingBuffer::new();
    /// assert_eq!(buf.max_size(), usize::MAX / 4);
    /// ```
    #[inline]
    pub fn max_size(&self) -> usize {
        Slots::<T>::max_slots()
    }

    /// Returns the number of elements in the `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut v: RingBuffer<_> = RingBuffer::with_capacity(4);
    /// assert_eq!(v.len(), 0);
    /// v.push_back(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer contains no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the buffer is full.
    ///
    /// A zero-capacity buffer is both empty and full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(1);
    ///
    /// assert!(!buf.is_full());
    ///
    /// buf.push_back(1);
    ///
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.capacity()
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(6);
    /// let c: Vec<&i32> = buf.iter().collect();
    /// assert_eq!(c, [&3, &4, &6]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        let (front, back) = self.as_slices();
        Iter::new(front, back)
    }

    /// Returns a front-to-back iterator that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from(vec![5, 3, 4]);
    /// for num in buf.iter_mut() {
    ///     *num = *num - 2;
    /// }
    /// assert_eq!(buf, [3, 1, 2]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<T> {
        let (front, back) = self.as_mut_slices();
        IterMut::new(front, back)
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(5);
    ///
    /// buf.push_back(0);
    /// buf.push_back(1);
    /// buf.push_back(2);
    ///
    /// assert_eq!(buf.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// buf.push_front(10);
    /// buf.push_front(9);
    ///
    /// assert_eq!(buf.as_slices(), (&[9, 10][..], &[0, 1, 2][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let front = self.front_run();
        let back = self.len - front;
        let base = self.slots.as_ptr();
        unsafe {
            (
                slice::from_raw_parts(base.add(self.begin), front),
                slice::from_raw_parts(base, back),
            )
        }
    }

    /// Returns a pair of mutable slices which contain, in order, the contents
    /// of the `RingBuffer`.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let front = self.front_run();
        let back = self.len - front;
        let begin = self.begin;
        let base = self.slots.as_mut_ptr();
        unsafe {
            (
                slice::from_raw_parts_mut(base.add(begin), front),
                slice::from_raw_parts_mut(base, back),
            )
        }
    }

    /// Rotates the storage so the elements start at slot 0 and returns them
    /// as one slice.
    ///
    /// An unwrapped run is shifted down and a full buffer is rotated in place;
    /// otherwise the elements move into a fresh block of the same capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from(vec![1, 2, 3]);
    /// buf.push_back(4);
    /// assert_eq!(buf.as_slices(), (&[2, 3][..], &[4][..]));
    /// assert_eq!(buf.make_contiguous(), &[2, 3, 4]);
    /// ```
    pub fn make_contiguous(&mut self) -> &mut [T] {
        if self.begin != 0 {
            if self.is_contiguous() {
                let (begin, len) = (self.begin, self.len);
                unsafe { self.slots.copy(0, begin, len) }
                self.begin = 0;
            } else if self.is_full() {
                let begin = self.begin;
                let cap = self.capacity();
                let whole = unsafe { slice::from_raw_parts_mut(self.slots.as_mut_ptr(), cap) };
                whole.rotate_left(begin);
                self.begin = 0;
            } else {
                infallible(self.try_relocate(self.capacity()));
            }
        }
        self.bump_generation();
        self.as_mut_slices().0
    }

    /// Create a draining iterator that removes the specified range in the
    /// `RingBuffer` and yields the removed items.
    ///
    /// Note 1: The element range is removed even if the iterator is not
    /// consumed until the end.
    ///
    /// Note 2: It is unspecified how many elements are removed from the buffer,
    /// if the `Drain` value is not dropped, but the borrow it holds expires
    /// (eg. due to mem::forget).
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if
    /// the end point is greater than the length of the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 2, 3].into_iter().collect();
    /// let drain1: Vec<_> = buf.drain(2..).collect();
    /// assert_eq!(drain1, vec![3]);
    ///
    /// // A full range clears all contents
    /// let drain2: Vec<_> = buf.drain(..).collect();
    /// assert_eq!(drain2, vec![1, 2]);
    /// assert!(buf.is_empty());
    /// ```
    pub fn drain<R>(&mut self, range: R) -> Drain<T, B>
    where
        R: RangeArgument<usize>,
    {
        let len = self.len;
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        assert!(start <= end, "drain lower bound was too large");
        assert!(end <= len, "drain upper bound was too large");
        self.bump_generation();
        Drain::new(self, start, end)
    }

    /// Clears the buffer, removing all values. The capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut v: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 3);
    /// ```
    pub fn clear(&mut self) {
        let (front, back) = self.as_mut_slices();
        let front = front as *mut [T];
        let back = back as *mut [T];
        self.len = 0;
        self.begin = 0;
        self.bump_generation();
        unsafe {
            ptr::drop_in_place(front);
            ptr::drop_in_place(back);
        }
    }

    /// Returns `true` if the `RingBuffer` contains an element equal to the
    /// given value.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        let (a, b) = self.as_slices();
        a.contains(x) || b.contains(x)
    }

    /// Provides a reference to the front element, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.front(), None);
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// assert_eq!(buf.front(), Some(&1));
    /// ```
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// buffer is empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Provides a reference to the back element, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.back(), None);
    ///
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// assert_eq!(buf.back(), Some(&2));
    /// ```
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// buffer is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len.checked_sub(1) {
            Some(last) => self.get_mut(last),
            None => None,
        }
    }

    /// Removes the first element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// Taking the last element out resets the ring to slot 0, like `clear`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// buf.push_back(1);
    /// buf.push_back(2);
    ///
    /// assert_eq!(buf.pop_front(), Some(1));
    /// assert_eq!(buf.pop_front(), Some(2));
    /// assert_eq!(buf.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let begin = self.begin;
        let element = unsafe { self.slots.read(begin) };
        self.len -= 1;
        self.head_id = self.head_id.wrapping_add(1);
        self.begin = if self.len == 0 {
            0
        } else {
            self.ring().physical(1)
        };
        Some(element)
    }

    /// Removes the last element from the buffer and returns it, or `None` if
    /// it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.pop_back(), None);
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(buf.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let last = self.ring().physical(self.len - 1);
        let element = unsafe { self.slots.read(last) };
        self.len -= 1;
        if self.len == 0 {
            self.begin = 0;
        }
        Some(element)
    }

    /// Removes and returns the element at `index` from the `RingBuffer`.
    /// Whichever end is closer to the removal point will be moved to make
    /// room, and all the affected elements will be moved to new positions.
    /// Returns `None` if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
    ///
    /// assert_eq!(buf.remove(1), Some(2));
    /// assert_eq!(buf.get(1), Some(&3));
    /// assert_eq!(buf.remove(5), None);
    /// ```
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let element = self.remove_expecting_element(index);
        self.bump_generation();
        Some(element)
    }

    /// Shortens the buffer, dropping the elements past `len`.
    ///
    /// Does nothing when `len` is not below the current length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([5, 10, 15]);
    /// buf.truncate(1);
    /// assert_eq!(buf, [5]);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.drain(len..);
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` such that `f(&e)` returns false.
    /// This method operates in place and preserves the order of the retained
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3, 4]);
    /// buf.retain(|&x| x % 2 == 0);
    ///
    /// assert_eq!(buf, [2, 4]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.len;
        let mut del = 0;
        for i in 0..len {
            let keep = match self.get(i) {
                Some(elem) => f(elem),
                None => true,
            };
            if !keep {
                del += 1;
            } else if del > 0 {
                unsafe { self.swap_offsets(i - del, i) }
            }
        }
        if del > 0 {
            self.truncate(len - del);
        }
        self.bump_generation();
    }

    /// Reallocates to exactly `new_capacity` slots, moving the elements to
    /// the start of the new block in logical order.
    ///
    /// When `new_capacity` is below the current length, the trailing
    /// elements are dropped. Every outstanding handle is invalidated.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2]);
    /// buf.push_back(3);
    /// buf.reserve(4);
    /// assert_eq!(buf.capacity(), 4);
    /// assert_eq!(buf.as_slices(), (&[2, 3][..], &[][..]));
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        infallible(self.try_reserve(new_capacity))
    }

    /// Fallible version of [`reserve`](RingBuffer::reserve). On error the
    /// buffer is left exactly as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{RingBuffer, TryReserveError};
    ///
    /// let mut buf: RingBuffer<u64> = RingBuffer::from([1, 2]);
    /// assert_eq!(buf.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
    /// assert_eq!(buf, [1, 2]);
    /// ```
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        self.try_relocate(new_capacity)
    }

    /// Resizes the buffer in place so that `len()` equals `new_len`, filling
    /// new slots at the back with `T::default()`.
    ///
    /// Growing past the capacity reallocates to exactly `new_len` slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([5, 10]);
    /// buf.resize(4);
    /// assert_eq!(buf, [5, 10, 0, 0]);
    /// buf.resize(1);
    /// assert_eq!(buf, [5]);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes the buffer in place so that `len()` equals `new_len`, filling
    /// new slots at the back with values produced by `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            self.bump_generation();
            return;
        }
        if new_len > self.capacity() {
            infallible(self.try_relocate(new_len));
        }
        for _ in self.len..new_len {
            self.push_back_expecting_space_available(f());
        }
        self.bump_generation();
    }

    /// Replaces the contents with the items of `iter`.
    ///
    /// The replacement is built on the side and swapped in, so a panicking
    /// iterator leaves the buffer untouched. The new capacity equals the
    /// number of items.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
    /// buf.assign(vec![7, 8]);
    /// assert_eq!(buf, [7, 8]);
    /// assert_eq!(buf.capacity(), 2);
    /// ```
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut fresh: RingBuffer<T, B> = iter.into_iter().collect();
        self.swap(&mut fresh);
    }

    /// Replaces the contents with `n` clones of `value`.
    pub fn assign_n(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        let mut fresh = RingBuffer::<T, B>::from_elem(value, n);
        self.swap(&mut fresh);
    }

    /// Exchanges the whole contents, capacity included, with `other`.
    ///
    /// Handles taken from either buffer before the swap are invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut a: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
    /// let mut b: RingBuffer<_> = RingBuffer::with_capacity(8);
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(a.capacity(), 8);
    /// assert_eq!(b, [1, 2, 3]);
    /// assert!(b.is_full());
    /// ```
    pub fn swap(&mut self, other: &mut RingBuffer<T, B>) {
        mem::swap(self, other);
        self.renew_lineage();
        other.renew_lineage();
    }

    /// Handle to the first element.
    #[inline]
    pub fn begin(&self) -> Handle {
        self.handle_for(Position::Begin)
    }

    /// Handle one past the last element.
    #[inline]
    pub fn end(&self) -> Handle {
        self.handle_for(Position::End)
    }

    /// Handle to the element at logical `index`; `index == len()` gives the
    /// end handle.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    #[inline]
    pub fn handle_at(&self, index: usize) -> Handle {
        assert!(
            index <= self.len,
            "index out of bounds: the len is {} but the index is {}",
            self.len,
            index
        );
        self.handle_for(self.ring().locate(index))
    }

    /// Returns `true` if `handle` still refers to a position in this buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
    /// let second = buf.handle_at(1);
    /// buf.pop_back();
    /// assert!(buf.is_valid(second));
    /// buf.reserve(10);
    /// assert!(!buf.is_valid(second));
    /// ```
    #[inline]
    pub fn is_valid(&self, handle: Handle) -> bool {
        match handle.position() {
            Position::Begin | Position::End => handle.stamp() == self.lineage,
            Position::Slot(slot) => {
                let offset = handle.id().wrapping_sub(self.head_id);
                handle.stamp() == self.generation
                    && offset < self.len as u64
                    && self.ring().physical(offset as usize) == slot
            }
        }
    }

    /// Position behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[inline]
    pub(crate) fn resolve(&self, handle: Handle) -> Position {
        assert!(
            self.is_valid(handle),
            "stale handle: the buffer was reallocated or reshaped after it was taken"
        );
        handle.position()
    }

    /// Read-only cursor at the first element.
    #[inline]
    pub fn cbegin(&self) -> Cursor<T, B> {
        Cursor::new(self, Position::Begin)
    }

    /// Read-only cursor one past the last element.
    #[inline]
    pub fn cend(&self) -> Cursor<T, B> {
        Cursor::new(self, Position::End)
    }

    /// Read-only cursor at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[inline]
    pub fn cursor(&self, handle: Handle) -> Cursor<T, B> {
        let pos = self.resolve(handle);
        Cursor::new(self, pos)
    }

    /// Mutable cursor at the first element.
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<T, B> {
        CursorMut::new(self, Position::Begin)
    }

    /// Mutable cursor one past the last element.
    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<T, B> {
        CursorMut::new(self, Position::End)
    }

    /// Mutable cursor at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[inline]
    pub fn cursor_mut(&mut self, handle: Handle) -> CursorMut<T, B> {
        let pos = self.resolve(handle);
        CursorMut::new(self, pos)
    }

    /// Inserts `element` right before `at` and returns a handle to it.
    ///
    /// A full buffer doubles its capacity first (a zero-capacity buffer gets
    /// one slot), whatever the behavior. All other handles are invalidated.
    ///
    /// # Panics
    ///
    /// Panics if `at` is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 3]);
    /// let at = buf.handle_at(1);
    /// let two = buf.insert(at, 2);
    /// assert_eq!(buf, [1, 2, 3]);
    /// assert_eq!(buf.capacity(), 4);
    /// assert_eq!(buf.cursor(two).get(), Some(&2));
    /// ```
    pub fn insert(&mut self, at: Handle, element: T) -> Handle {
        let index = self.ring().linearize(self.resolve(at));
        self.insert_index(index, element);
        self.handle_at(index)
    }

    /// Inserts `n` clones of `value` right before `at` and returns a handle
    /// to the first of them (or to `at`'s position when `n == 0`).
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
    /// let begin = buf.begin();
    /// buf.insert_n(begin, 3, 4);
    /// assert_eq!(buf, [4, 4, 4, 1, 2, 3]);
    /// ```
    pub fn insert_n(&mut self, at: Handle, n: usize, value: T) -> Handle
    where
        T: Clone,
    {
        let index = self.ring().linearize(self.resolve(at));
        if n == 0 {
            return self.handle_at(index);
        }
        self.grow_to_fit(n);
        for k in 0..n - 1 {
            self.insert_index(index + k, value.clone());
        }
        self.insert_index(index + n - 1, value);
        self.handle_at(index)
    }

    /// Inserts the items of `iter`, in order, right before `at` and returns a
    /// handle to the first inserted item (or to `at`'s position when `iter`
    /// is empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
    /// let end = buf.end();
    /// buf.insert_iter(end, [99, 98, 97]);
    /// assert_eq!(buf, [1, 2, 3, 99, 98, 97]);
    /// ```
    pub fn insert_iter<I>(&mut self, at: Handle, iter: I) -> Handle
    where
        I: IntoIterator<Item = T>,
    {
        let index = self.ring().linearize(self.resolve(at));
        let iter = iter.into_iter();
        self.grow_to_fit(iter.size_hint().0);
        for (k, element) in iter.enumerate() {
            self.insert_index(index + k, element);
        }
        self.handle_at(index)
    }

    /// Removes the element at `at` and returns a handle to the element that
    /// took its place (the end handle when the last element went away).
    ///
    /// Erasing at the end position, or from an empty buffer, does nothing and
    /// hands `at` back unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
    /// let next = buf.erase(buf.handle_at(1));
    /// assert_eq!(buf.cursor(next).get(), Some(&3));
    /// assert_eq!(buf.len(), 2);
    ///
    /// let end = buf.end();
    /// assert_eq!(buf.erase(end), end);
    /// ```
    pub fn erase(&mut self, at: Handle) -> Handle {
        let pos = self.resolve(at);
        if pos == Position::End || self.is_empty() {
            return at;
        }
        let index = self.ring().linearize(pos);
        drop(self.remove_expecting_element(index));
        self.bump_generation();
        self.handle_at(index)
    }

    /// Removes the half-open range `[first, last)` and returns a handle to
    /// the element that now sits where `first` was.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (1..10).collect();
    /// let (first, last) = (buf.handle_at(2), buf.handle_at(5));
    /// buf.erase_range(first, last);
    /// assert_eq!(buf, [1, 2, 6, 7, 8, 9]);
    /// ```
    pub fn erase_range(&mut self, first: Handle, last: Handle) -> Handle {
        let ring = self.ring();
        let start = ring.linearize(self.resolve(first));
        let end = ring.linearize(self.resolve(last));
        if end <= start {
            return first;
        }
        self.drain(start..end);
        self.handle_at(start)
    }

    /// First position whose element is not less than `value`, found by
    /// binary search over cursors. The buffer must be sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([414414, 2112, 1, 222, 412]);
    /// buf.sort();
    /// assert_eq!(buf.lower_bound(&1000).get(), Some(&2112));
    /// assert_eq!(buf.upper_bound(&1).get(), Some(&222));
    /// ```
    pub fn lower_bound(&self, value: &T) -> Cursor<T, B>
    where
        T: Ord,
    {
        self.partition_cursor(|elem| elem < value)
    }

    /// First position whose element is greater than `value`. The buffer must
    /// be sorted.
    pub fn upper_bound(&self, value: &T) -> Cursor<T, B>
    where
        T: Ord,
    {
        self.partition_cursor(|elem| elem <= value)
    }

    /// Binary searches the sorted buffer for `value`.
    ///
    /// Returns `Ok(index)` of a matching element, or `Err(index)` where it
    /// could be inserted keeping the order.
    pub fn binary_search(&self, value: &T) -> Result<usize, usize>
    where
        T: Ord,
    {
        let found = self.lower_bound(value);
        match found.get() {
            Some(elem) if elem.cmp(value) == Ordering::Equal => Ok(found.offset()),
            _ => Err(found.offset()),
        }
    }

    fn partition_cursor<P>(&self, mut pred: P) -> Cursor<T, B>
    where
        P: FnMut(&T) -> bool,
    {
        let mut first = self.cbegin();
        let mut count = self.cend() - first;
        while count > 0 {
            let step = count / 2;
            let probe = first + step;
            match probe.get() {
                Some(elem) if pred(elem) => {
                    first = probe + 1;
                    count -= step + 1;
                }
                _ => count = step,
            }
        }
        first
    }

    /// Sorts the buffer in place, linearizing the ring first.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::from([3, 1, 2]);
    /// buf.push_back(0);
    /// buf.sort();
    /// assert_eq!(buf, [0, 1, 2]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.make_contiguous().sort();
    }

    /// Sorts the buffer in place with a comparator function.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.make_contiguous().sort_by(compare);
    }

    /// Sorts the buffer in place with a key extraction function.
    pub fn sort_by_key<K, F>(&mut self, f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.make_contiguous().sort_by_key(f);
    }

    /// Sorts the buffer in place without preserving the order of equal
    /// elements.
    pub fn sort_unstable(&mut self)
    where
        T: Ord,
    {
        self.make_contiguous().sort_unstable();
    }
}

impl<T, B: Behavior> From<Vec<T>> for RingBuffer<T, B> {
    /// Takes the elements of `vec` into a full buffer of capacity
    /// `vec.len()`.
    fn from(vec: Vec<T>) -> Self {
        let mut buf = RingBuffer::with_capacity(vec.len());
        for element in vec {
            buf.push_back_expecting_space_available(element);
        }
        buf
    }
}

impl<T, B: Behavior, const N: usize> From<[T; N]> for RingBuffer<T, B> {
    fn from(array: [T; N]) -> Self {
        let mut buf = RingBuffer::with_capacity(N);
        for element in array {
            buf.push_back_expecting_space_available(element);
        }
        buf
    }
}
