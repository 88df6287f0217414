use crate::behavior::{Growing, Wrapping};
use crate::error::CapacityError;

use super::RingBuffer;

impl<T> RingBuffer<T, Wrapping> {
    /// Add an element to the back of the buffer.
    ///
    /// When the buffer is full, the front element is overwritten and
    /// returned; the buffer stays full. A zero-capacity buffer refuses the
    /// element and hands it straight back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{RingBuffer, Wrapping};
    ///
    /// let mut buf: RingBuffer<_, Wrapping> = RingBuffer::with_capacity(2);
    ///
    /// assert_eq!(buf.push_back(1), None);
    /// assert_eq!(buf.push_back(2), None);
    /// let overflow = buf.push_back(3);
    ///
    /// assert_eq!(overflow, Some(1));
    /// assert_eq!(buf, [2, 3]);
    /// ```
    pub fn push_back(&mut self, element: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(element);
        }
        if self.is_full() {
            let begin = self.begin;
            let existing = unsafe { self.slots.replace(begin, element) };
            self.begin = self.ring().physical(1);
            self.head_id = self.head_id.wrapping_add(1);
            self.claim_back_id();
            Some(existing)
        } else {
            self.push_back_expecting_space_available(element);
            None
        }
    }

    /// Add an element to the front of the buffer.
    ///
    /// When the buffer is full, the back element is overwritten and returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{RingBuffer, Wrapping};
    ///
    /// let mut buf: RingBuffer<_, Wrapping> = RingBuffer::with_capacity(2);
    ///
    /// assert_eq!(buf.push_front(1), None);
    /// assert_eq!(buf.push_front(2), None);
    /// let overflow = buf.push_front(3);
    ///
    /// assert_eq!(overflow, Some(1));
    /// assert_eq!(buf, [3, 2]);
    /// ```
    pub fn push_front(&mut self, element: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(element);
        }
        if self.is_full() {
            let last = self.ring().physical(self.len - 1);
            let existing = unsafe { self.slots.replace(last, element) };
            self.begin = last;
            self.head_id = self.head_id.wrapping_sub(1);
            self.claim_front_id();
            Some(existing)
        } else {
            self.push_front_expecting_space_available(element);
            None
        }
    }

    /// Converts into a buffer that grows instead of overwriting. The storage
    /// is kept as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let buf: RingBuffer<_> = RingBuffer::from([1, 2]);
    /// let mut growing = buf.into_growing();
    /// growing.push_back(3);
    /// assert_eq!(growing, [1, 2, 3]);
    /// ```
    pub fn into_growing(self) -> RingBuffer<T, Growing> {
        self.rebrand()
    }
}

impl<T> RingBuffer<T, Growing> {
    /// Add an element to the back of the buffer, doubling the capacity first
    /// when it is full (a zero-capacity buffer gets one slot).
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{Growing, RingBuffer};
    ///
    /// let mut buf: RingBuffer<_, Growing> = RingBuffer::from([1, 2]);
    /// buf.push_back(3);
    ///
    /// assert_eq!(buf.len(), 3);
    /// assert_eq!(buf.capacity(), 4);
    /// assert_eq!(buf.front(), Some(&1));
    /// assert_eq!(buf.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, element: T) {
        self.grow_to_fit(1);
        self.push_back_expecting_space_available(element);
    }

    /// Add an element to the front of the buffer, doubling the capacity
    /// first when it is full.
    pub fn push_front(&mut self, element: T) {
        self.grow_to_fit(1);
        self.push_front_expecting_space_available(element);
    }

    /// Fallible version of [`push_back`](RingBuffer::push_back).
    ///
    /// When growth fails, the element comes back inside the error and the
    /// buffer is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{Growing, RingBuffer};
    ///
    /// let mut buf: RingBuffer<_, Growing> = RingBuffer::new();
    /// assert!(buf.try_push_back(1).is_ok());
    /// assert_eq!(buf, [1]);
    /// ```
    pub fn try_push_back(&mut self, element: T) -> Result<(), CapacityError<T>> {
        match self.try_grow_to_fit(1) {
            Ok(()) => {
                self.push_back_expecting_space_available(element);
                Ok(())
            }
            Err(cause) => Err(CapacityError::new(element, cause)),
        }
    }

    /// Fallible version of [`push_front`](RingBuffer::push_front).
    pub fn try_push_front(&mut self, element: T) -> Result<(), CapacityError<T>> {
        match self.try_grow_to_fit(1) {
            Ok(()) => {
                self.push_front_expecting_space_available(element);
                Ok(())
            }
            Err(cause) => Err(CapacityError::new(element, cause)),
        }
    }

    /// Converts into a buffer that overwrites once full. The storage is kept
    /// as is.
    pub fn into_wrapping(self) -> RingBuffer<T, Wrapping> {
        self.rebrand()
    }
}

/// Extend the buffer from an iterator, overwriting the front once full.
///
/// Only the last `capacity` items survive when the iterator is longer than
/// the buffer.
impl<T> Extend<T> for RingBuffer<T, Wrapping> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

/// Extend the buffer from an iterator, growing as needed.
impl<T> Extend<T> for RingBuffer<T, Growing> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.grow_to_fit(iter.size_hint().0);
        for elt in iter {
            self.push_back(elt);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for RingBuffer<T, Wrapping> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for RingBuffer<T, Growing> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}
