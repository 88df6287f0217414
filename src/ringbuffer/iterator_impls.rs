use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use core::slice;

use super::RingBuffer;
use crate::behavior::Behavior;
use crate::utils::advance;

/// `RingBuffer` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    front: slice::Iter<'a, T>,
    back: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(front: &'a [T], back: &'a [T]) -> Iter<'a, T> {
        Iter {
            front: front.iter(),
            back: back.iter(),
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.front.as_slice())
            .field(&self.back.as_slice())
            .finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if let Some(elem) = self.front.next() {
            return Some(elem);
        }
        // the front run is exhausted, continue in the wrapped part
        mem::swap(&mut self.front, &mut self.back);
        self.front.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.front.len() + self.back.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if let Some(elem) = self.back.next_back() {
            return Some(elem);
        }
        mem::swap(&mut self.front, &mut self.back);
        self.back.next_back()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// `RingBuffer` mutable iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T: 'a> {
    front: slice::IterMut<'a, T>,
    back: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(front: &'a mut [T], back: &'a mut [T]) -> IterMut<'a, T> {
        IterMut {
            front: front.iter_mut(),
            back: back.iter_mut(),
        }
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("IterMut")
            .field(&self.front.as_slice())
            .field(&self.back.as_slice())
            .finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if let Some(elem) = self.front.next() {
            return Some(elem);
        }
        mem::swap(&mut self.front, &mut self.back);
        self.front.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.front.len() + self.back.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if let Some(elem) = self.back.next_back() {
            return Some(elem);
        }
        mem::swap(&mut self.front, &mut self.back);
        self.back.next_back()
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

/// A by-value `RingBuffer` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T, B: Behavior> {
    pub(crate) inner: RingBuffer<T, B>,
}

impl<T: fmt::Debug, B: Behavior> fmt::Debug for IntoIter<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T, B: Behavior> Iterator for IntoIter<T, B> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T, B: Behavior> DoubleEndedIterator for IntoIter<T, B> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T, B: Behavior> ExactSizeIterator for IntoIter<T, B> {}

impl<T, B: Behavior> FusedIterator for IntoIter<T, B> {}

/// Draining `RingBuffer` iterator
///
/// While the drain is alive the buffer only reports the elements before the
/// drained range; the rest is reattached when the drain is dropped.
pub struct Drain<'a, T: 'a, B: Behavior + 'a> {
    buffer: NonNull<RingBuffer<T, B>>,
    start: usize,
    end: usize,
    front: usize,
    back: usize,
    orig_len: usize,
    marker: PhantomData<&'a mut RingBuffer<T, B>>,
}

impl<'a, T, B: Behavior> Drain<'a, T, B> {
    pub(crate) fn new(buffer: &'a mut RingBuffer<T, B>, start: usize, end: usize) -> Self {
        let orig_len = buffer.len;
        // leak amplification: a forgotten drain leaves only the head behind
        buffer.len = start;
        Drain {
            buffer: NonNull::from(buffer),
            start,
            end,
            front: start,
            back: end,
            orig_len,
            marker: PhantomData,
        }
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        let buffer = unsafe { self.buffer.as_ref() };
        advance(buffer.begin, offset, buffer.capacity())
    }
}

impl<'a, T: fmt::Debug, B: Behavior> fmt::Debug for Drain<'a, T, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Drain")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("remaining", &(self.back - self.front))
            .finish()
    }
}

impl<'a, T, B: Behavior> Drop for Drain<'a, T, B> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}

        let buffer = unsafe { self.buffer.as_mut() };
        let cap = buffer.capacity();

        // B = begin; s = drain start; e = drain end; E = original end
        //
        //        B   s   e   E
        // [. . . o o x x o o . . .]
        //
        let head_len = self.start;
        let tail_len = self.orig_len - self.end;
        let drained = self.end - self.start;
        let begin = buffer.begin;

        match (head_len, tail_len) {
            (_, 0) => {}
            (0, _) => buffer.begin = advance(begin, drained, cap),
            _ => unsafe {
                if head_len <= tail_len {
                    let new_begin = advance(begin, drained, cap);
                    buffer.wrap_copy(new_begin, begin, head_len);
                    buffer.begin = new_begin;
                } else {
                    let dst = advance(begin, self.start, cap);
                    let src = advance(begin, self.end, cap);
                    buffer.wrap_copy(dst, src, tail_len);
                }
            },
        }

        buffer.len = self.orig_len - drained;
        if buffer.len == 0 {
            buffer.begin = 0;
        }
    }
}

impl<'a, T, B: Behavior> Iterator for Drain<'a, T, B> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let slot = self.slot(self.front);
        self.front += 1;
        unsafe { Some(self.buffer.as_ref().slots.read(slot)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<'a, T, B: Behavior> DoubleEndedIterator for Drain<'a, T, B> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let slot = self.slot(self.back);
        unsafe { Some(self.buffer.as_ref().slots.read(slot)) }
    }
}

impl<'a, T, B: Behavior> ExactSizeIterator for Drain<'a, T, B> {}

impl<'a, T, B: Behavior> FusedIterator for Drain<'a, T, B> {}
