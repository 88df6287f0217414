//! Random-access cursors and detached handles.
//!
//! A [`Cursor`] borrows its buffer and can move anywhere in `[0, len]` in
//! constant time. A [`Handle`] is the same position with the borrow dropped:
//! it can be stored while the buffer is mutated and turned back into a
//! cursor later, as long as no operation in between invalidated it.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr;

use crate::behavior::Behavior;
use crate::position::Position;
use crate::ringbuffer::RingBuffer;

/// A position in a `RingBuffer` detached from any borrow.
///
/// Handles are `Copy` and can be kept while the buffer is mutated.
///
/// A `Begin` or `End` handle always denotes the current first element or
/// end position of the buffer it came from. It goes stale only when that
/// buffer's contents are replaced wholesale (`swap`, `assign*`, policy
/// conversion).
///
/// A `Slot` handle names one element. It goes stale as soon as that element
/// is popped or overwritten, and on every reallocation or operation that
/// moves elements around. Once stale it never becomes valid again, even if
/// the slot is filled anew.
///
/// Comparing two handles compares their raw contents only; use a [`Cursor`]
/// for logical ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    position: Position,
    stamp: u64,
    id: u64,
}

impl Handle {
    #[inline]
    pub(crate) fn new(position: Position, stamp: u64, id: u64) -> Handle {
        Handle {
            position,
            stamp,
            id,
        }
    }

    /// The position this handle refers to.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Lineage for `Begin`/`End` handles, generation for `Slot` handles.
    #[inline]
    pub(crate) fn stamp(&self) -> u64 {
        self.stamp
    }

    /// Id of the element a `Slot` handle names.
    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

/// A read-only random-access cursor over a `RingBuffer`.
///
/// Movement is cyclic over the `len + 1` positions: one step past the end
/// lands on the first element, one step before the first element lands on
/// the end.
///
/// # Examples
///
/// ```
/// use ringdeque::RingBuffer;
///
/// let buf: RingBuffer<_> = RingBuffer::from([1, 2, 3, 4, 5]);
/// let begin = buf.cbegin();
/// let end = buf.cend();
/// assert_eq!(end - begin, 5);
///
/// let third = begin + 2;
/// assert_eq!(third.get(), Some(&3));
/// assert!(begin < third && third < end);
/// assert_eq!(end + 1, begin);
/// ```
pub struct Cursor<'a, T: 'a, B: Behavior + 'a> {
    buf: &'a RingBuffer<T, B>,
    pos: Position,
}

impl<'a, T, B: Behavior> Cursor<'a, T, B> {
    #[inline]
    pub(crate) fn new(buf: &'a RingBuffer<T, B>, pos: Position) -> Cursor<'a, T, B> {
        Cursor { buf, pos }
    }

    /// The element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.buf.element(self.pos)
    }

    /// Logical offset from the first element, in `[0, len]`.
    #[inline]
    pub fn offset(&self) -> usize {
        self.buf.ring().linearize(self.pos)
    }

    /// The raw position of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Detaches the cursor from its borrow.
    #[inline]
    pub fn handle(&self) -> Handle {
        self.buf.handle_for(self.pos)
    }

    /// Steps forward once.
    #[inline]
    pub fn move_next(&mut self) {
        self.pos = self.buf.ring().offset_by(self.pos, 1);
    }

    /// Steps backward once.
    #[inline]
    pub fn move_prev(&mut self) {
        self.pos = self.buf.ring().offset_by(self.pos, -1);
    }
}

impl<'a, T, B: Behavior> Clone for Cursor<'a, T, B> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, B: Behavior> Copy for Cursor<'a, T, B> {}

impl<'a, T, B: Behavior> Add<isize> for Cursor<'a, T, B> {
    type Output = Cursor<'a, T, B>;

    #[inline]
    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T, B: Behavior> Sub<isize> for Cursor<'a, T, B> {
    type Output = Cursor<'a, T, B>;

    #[inline]
    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<'a, T, B: Behavior> AddAssign<isize> for Cursor<'a, T, B> {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.pos = self.buf.ring().offset_by(self.pos, n as i128);
    }
}

impl<'a, T, B: Behavior> SubAssign<isize> for Cursor<'a, T, B> {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        self.pos = self.buf.ring().offset_by(self.pos, -(n as i128));
    }
}

impl<'a, T, B: Behavior> Sub for Cursor<'a, T, B> {
    type Output = isize;

    /// Signed logical distance between two cursors of the same buffer.
    #[inline]
    fn sub(self, other: Self) -> isize {
        debug_assert!(ptr::eq(self.buf, other.buf), "cursors of different buffers");
        self.buf.ring().diff(self.pos, other.pos)
    }
}

impl<'a, T, B: Behavior> PartialEq for Cursor<'a, T, B> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(ptr::eq(self.buf, other.buf), "cursors of different buffers");
        self.offset() == other.offset()
    }
}

impl<'a, T, B: Behavior> Eq for Cursor<'a, T, B> {}

impl<'a, T, B: Behavior> PartialOrd for Cursor<'a, T, B> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T, B: Behavior> Ord for Cursor<'a, T, B> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert!(ptr::eq(self.buf, other.buf), "cursors of different buffers");
        self.offset().cmp(&other.offset())
    }
}

impl<'a, T, B: Behavior> fmt::Debug for Cursor<'a, T, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.pos)
            .field("offset", &self.offset())
            .finish()
    }
}

/// A cursor with exclusive access to its `RingBuffer`.
///
/// Navigation works like [`Cursor`]. On top of that the element under the
/// cursor can be modified, and elements can be inserted or erased at the
/// cursor.
///
/// # Examples
///
/// ```
/// use ringdeque::RingBuffer;
///
/// let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 4]);
/// {
///     let mut cur = buf.begin_mut();
///     cur += 2;
///     cur.insert_before(3);
///     assert_eq!(cur.get(), Some(&4));
///     *cur.get_mut().unwrap() = 40;
/// }
/// assert_eq!(buf, [1, 2, 3, 40]);
/// ```
pub struct CursorMut<'a, T: 'a, B: Behavior + 'a> {
    buf: &'a mut RingBuffer<T, B>,
    pos: Position,
}

impl<'a, T, B: Behavior> CursorMut<'a, T, B> {
    #[inline]
    pub(crate) fn new(buf: &'a mut RingBuffer<T, B>, pos: Position) -> CursorMut<'a, T, B> {
        CursorMut { buf, pos }
    }

    /// The element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.buf.element(self.pos)
    }

    /// Mutable access to the element under the cursor.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.buf.element_mut(self.pos)
    }

    /// Logical offset from the first element, in `[0, len]`.
    #[inline]
    pub fn offset(&self) -> usize {
        self.buf.ring().linearize(self.pos)
    }

    /// The raw position of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Detaches the cursor from its borrow.
    #[inline]
    pub fn handle(&self) -> Handle {
        self.buf.handle_for(self.pos)
    }

    /// Reborrows as a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<T, B> {
        Cursor::new(self.buf, self.pos)
    }

    /// Steps forward once.
    #[inline]
    pub fn move_next(&mut self) {
        self.pos = self.buf.ring().offset_by(self.pos, 1);
    }

    /// Steps backward once.
    #[inline]
    pub fn move_prev(&mut self) {
        self.pos = self.buf.ring().offset_by(self.pos, -1);
    }

    /// Inserts `element` before the cursor. The cursor keeps pointing at the
    /// element (or end position) it pointed at before.
    ///
    /// Grows the buffer when it is full, whatever the behavior.
    pub fn insert_before(&mut self, element: T) {
        let index = self.offset();
        self.buf.insert_index(index, element);
        self.pos = self.buf.ring().locate(index + 1);
    }

    /// Removes the element under the cursor and returns it. The cursor moves
    /// to the element that followed it. Returns `None` at the end position.
    pub fn erase(&mut self) -> Option<T> {
        let index = self.offset();
        let element = self.buf.remove(index)?;
        self.pos = self.buf.ring().locate(index);
        Some(element)
    }
}

impl<'a, T, B: Behavior> AddAssign<isize> for CursorMut<'a, T, B> {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.pos = self.buf.ring().offset_by(self.pos, n as i128);
    }
}

impl<'a, T, B: Behavior> SubAssign<isize> for CursorMut<'a, T, B> {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        self.pos = self.buf.ring().offset_by(self.pos, -(n as i128));
    }
}

impl<'a, T, B: Behavior> Add<isize> for CursorMut<'a, T, B> {
    type Output = CursorMut<'a, T, B>;

    #[inline]
    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T, B: Behavior> Sub<isize> for CursorMut<'a, T, B> {
    type Output = CursorMut<'a, T, B>;

    #[inline]
    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<'a, T, B: Behavior> fmt::Debug for CursorMut<'a, T, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.pos)
            .field("offset", &self.offset())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Growing, Position, RingBuffer, Wrapping};

    #[test]
    fn any_distance_and_offsets() {
        macro_rules! test {
            ($behavior:ident) => {{
                let buf: RingBuffer<_, $behavior> = RingBuffer::from([1, 2, 3, 4, 5]);
                let begin = buf.cbegin();
                let end = buf.cend();
                assert_eq!(end - begin, 5);
                assert_eq!(begin - end, -5);
                for k in 0..=5 {
                    assert_eq!((begin + k) - begin, k);
                    assert_eq!((begin + k).offset(), k as usize);
                }
                for k in 0..5 {
                    assert_eq!((begin + k).get(), Some(&buf[k as usize]));
                }
                assert_eq!((end - 1).get(), Some(&5));
                assert_eq!(end.get(), None);
            }};
        }

        test!(Wrapping);
        test!(Growing);
    }

    #[test]
    fn any_cyclic_steps() {
        macro_rules! test {
            ($behavior:ident) => {{
                let buf: RingBuffer<_, $behavior> = RingBuffer::from([1, 2, 3]);
                let mut cur = buf.cend();
                cur.move_next();
                assert_eq!(cur, buf.cbegin());
                assert_eq!(cur.position(), Position::Begin);
                cur.move_prev();
                assert_eq!(cur, buf.cend());
                cur.move_prev();
                assert_eq!(cur.get(), Some(&3));
                assert_eq!(buf.cbegin() - 1, buf.cend());
                assert_eq!(buf.cbegin() + 7, buf.cend());
                assert_eq!(buf.cbegin() + 8, buf.cbegin());
            }};
        }

        test!(Wrapping);
        test!(Growing);
    }

    #[test]
    fn full_buffer_keeps_begin_and_end_apart() {
        let mut buf: RingBuffer<_> = RingBuffer::from([1, 2]);
        buf.push_back(3);
        assert!(buf.is_full());
        assert_ne!(buf.cbegin(), buf.cend());
        assert!(buf.cbegin() < buf.cend());
        assert_eq!(buf.cbegin().get(), Some(&2));
        assert_eq!((buf.cend() - 1).get(), Some(&3));
    }

    #[test]
    fn empty_buffer_begin_equals_end() {
        let buf: RingBuffer<u8> = RingBuffer::with_capacity(4);
        assert_eq!(buf.cbegin(), buf.cend());
        assert_eq!(buf.cend() - buf.cbegin(), 0);
        assert_eq!(buf.cbegin().get(), None);

        let unallocated: RingBuffer<u8> = RingBuffer::new();
        assert_eq!(unallocated.cbegin(), unallocated.cend());
    }

    #[test]
    fn ordering_follows_logical_offset_on_wrapped_storage() {
        let mut buf: RingBuffer<_> = RingBuffer::from([0, 1, 2, 3]);
        buf.push_back(4);
        buf.push_back(5);
        let (front, back) = buf.as_slices();
        assert_eq!((front, back), (&[2, 3][..], &[4, 5][..]));

        let cursors: Vec<_> = (0..=4).map(|k| buf.cbegin() + k).collect();
        for w in cursors.windows(2) {
            assert!(w[0] < w[1]);
        }
        // slot 0 holds a later element than slot 2
        assert!(cursors[2].position() == Position::Slot(0));
        assert!(cursors[1].position() == Position::Slot(3));
    }

    #[test]
    fn handle_round_trips_through_cursor() {
        let mut buf: RingBuffer<_> = RingBuffer::from([10, 20, 30]);
        let handle = (buf.cbegin() + 1).handle();
        buf.pop_front();
        buf.push_back(40);
        assert!(buf.is_valid(handle));
        assert_eq!(buf.cursor(handle).get(), Some(&20));
    }

    #[test]
    #[should_panic(expected = "stale handle")]
    fn stale_handle_panics() {
        let mut buf: RingBuffer<_, Growing> = RingBuffer::from([1, 2]);
        let handle = buf.handle_at(1);
        buf.push_back(3);
        let _ = buf.cursor(handle);
    }

    #[test]
    fn cursor_mut_insert_and_erase() {
        let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
        {
            let mut cur = buf.begin_mut();
            cur.move_next();
            assert_eq!(cur.erase(), Some(2));
            assert_eq!(cur.get(), Some(&3));
            cur.insert_before(9);
            assert_eq!(cur.get(), Some(&3));
            cur.move_next();
            assert_eq!(cur.erase(), None);
            assert_eq!(cur.offset(), 3);
        }
        assert_eq!(buf, [1, 9, 3]);
    }

    #[test]
    fn cursor_mut_at_end_appends() {
        let mut buf: RingBuffer<_> = RingBuffer::new();
        {
            let mut cur = buf.end_mut();
            cur.insert_before(1);
            cur.insert_before(2);
            assert_eq!(cur.get(), None);
            cur -= 1;
            *cur.get_mut().unwrap() += 10;
        }
        assert_eq!(buf, [1, 12]);
    }
}
