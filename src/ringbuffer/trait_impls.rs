use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FromIterator;
use core::ops::{Index, IndexMut};

use super::{IntoIter, Iter, IterMut, RingBuffer};
use crate::behavior::Behavior;

impl<T: Clone, B: Behavior> Clone for RingBuffer<T, B> {
    /// Clones the elements into a buffer of the same capacity.
    fn clone(&self) -> RingBuffer<T, B> {
        let mut buf = RingBuffer::with_capacity(self.capacity());
        for elt in self.iter() {
            buf.push_back_expecting_space_available(elt.clone());
        }
        buf
    }
}

impl<T, B: Behavior> Drop for RingBuffer<T, B> {
    fn drop(&mut self) {
        self.clear();
        // the block itself is released by `Slots`
    }
}

impl<T, B: Behavior> Default for RingBuffer<T, B> {
    #[inline]
    fn default() -> RingBuffer<T, B> {
        RingBuffer::new()
    }
}

impl<T, U, B, C> PartialEq<RingBuffer<U, C>> for RingBuffer<T, B>
where
    T: PartialEq<U>,
    B: Behavior,
    C: Behavior,
{
    fn eq(&self, other: &RingBuffer<U, C>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (sa, sb) = self.as_slices();
        let (oa, ob) = other.as_slices();
        if sa.len() == oa.len() {
            sa == oa && sb == ob
        } else if sa.len() < oa.len() {
            // Always divisible in three sections, for example:
            // self:  [a b c|d e f]
            // other: [0 1 2 3|4 5]
            // front = 3, mid = 1,
            // [a b c] == [0 1 2] && [d] == [3] && [e f] == [4 5]
            let front = sa.len();
            let mid = oa.len() - front;

            let (oa_front, oa_mid) = oa.split_at(front);
            let (sb_mid, sb_back) = sb.split_at(mid);
            debug_assert_eq!(sa.len(), oa_front.len());
            debug_assert_eq!(sb_mid.len(), oa_mid.len());
            debug_assert_eq!(sb_back.len(), ob.len());
            sa == oa_front && sb_mid == oa_mid && sb_back == ob
        } else {
            let front = oa.len();
            let mid = sa.len() - front;

            let (sa_front, sa_mid) = sa.split_at(front);
            let (ob_mid, ob_back) = ob.split_at(mid);
            debug_assert_eq!(sa_front.len(), oa.len());
            debug_assert_eq!(sa_mid.len(), ob_mid.len());
            debug_assert_eq!(sb.len(), ob_back.len());
            sa_front == oa && sa_mid == ob_mid && sb == ob_back
        }
    }
}

impl<T: Eq, B: Behavior> Eq for RingBuffer<T, B> {}

macro_rules! impl_slice_eq {
    ([$($vars:tt)*] $rhs:ty) => {
        impl<T, U, B, $($vars)*> PartialEq<$rhs> for RingBuffer<T, B>
        where
            T: PartialEq<U>,
            B: Behavior,
        {
            fn eq(&self, other: &$rhs) -> bool {
                if self.len() != other.len() {
                    return false;
                }
                let (sa, sb) = self.as_slices();
                let (oa, ob) = other[..].split_at(sa.len());
                sa == oa && sb == ob
            }
        }
    };
}

impl_slice_eq! { [] Vec<U> }
impl_slice_eq! { [] &[U] }
impl_slice_eq! { [] &mut [U] }
impl_slice_eq! { [const N: usize] [U; N] }
impl_slice_eq! { [const N: usize] &[U; N] }

impl<T: PartialOrd, B: Behavior> PartialOrd for RingBuffer<T, B> {
    fn partial_cmp(&self, other: &RingBuffer<T, B>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, B: Behavior> Ord for RingBuffer<T, B> {
    #[inline]
    fn cmp(&self, other: &RingBuffer<T, B>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, B: Behavior> Hash for RingBuffer<T, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.iter().for_each(|elem| elem.hash(state));
    }
}

impl<T, B: Behavior> Index<usize> for RingBuffer<T, B> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(elem) => elem,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                len, index
            ),
        }
    }
}

impl<T, B: Behavior> IndexMut<usize> for RingBuffer<T, B> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(elem) => elem,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                len, index
            ),
        }
    }
}

impl<T, B: Behavior> FromIterator<T> for RingBuffer<T, B> {
    /// Collects into a full buffer whose capacity is the number of items.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        RingBuffer::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T, B: Behavior> IntoIterator for RingBuffer<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T, B>;

    fn into_iter(self) -> IntoIter<T, B> {
        IntoIter { inner: self }
    }
}

impl<'a, T, B: Behavior> IntoIterator for &'a RingBuffer<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, B: Behavior> IntoIterator for &'a mut RingBuffer<T, B> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: fmt::Debug, B: Behavior> fmt::Debug for RingBuffer<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use crate::{Growing, RingBuffer, Wrapping};

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_ignores_rotation() {
        let mut rotated: RingBuffer<_> = RingBuffer::from([0, 1, 2, 3]);
        rotated.push_back(4);
        rotated.push_back(5);
        let straight: RingBuffer<_, Growing> = RingBuffer::from(vec![2, 3, 4, 5]);

        assert_eq!(rotated, straight);
        assert_eq!(straight, rotated);
        assert_eq!(rotated, [2, 3, 4, 5]);
        assert_eq!(rotated, vec![2, 3, 4, 5]);
        assert_eq!(rotated, &[2, 3, 4, 5][..]);
        assert_ne!(rotated, [2, 3, 4]);
        assert_eq!(hash_of(&rotated), hash_of(&straight.clone().into_wrapping()));
    }

    #[test]
    fn any_clone_keeps_capacity() {
        macro_rules! test {
            ($behavior:ident) => {{
                let mut buf: RingBuffer<String, $behavior> = RingBuffer::with_capacity(5);
                buf.push_back("a".to_string());
                buf.push_front("b".to_string());
                let copy = buf.clone();
                assert_eq!(copy.capacity(), 5);
                assert_eq!(copy, buf);
                assert_eq!(copy.as_slices().1.len(), 0);
            }};
        }

        test!(Wrapping);
        test!(Growing);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
        let b: RingBuffer<_> = RingBuffer::from([1, 2, 4]);
        let c: RingBuffer<_> = RingBuffer::from([1, 2]);
        assert!(a < b);
        assert!(c < a);
        assert_eq!(a.cmp(&a.clone()), std::cmp::Ordering::Equal);
    }

    #[test]
    fn index_matches_iteration() {
        let buf: RingBuffer<_> = RingBuffer::from([1, 2, 3, 4, 5]);
        for (i, elem) in buf.iter().enumerate() {
            assert_eq!(buf[i], *elem);
        }
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the len is 3 but the index is 3")]
    fn index_out_of_bounds_panics() {
        let buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
        let _ = buf[3];
    }

    #[test]
    fn debug_lists_logical_order() {
        let mut buf: RingBuffer<_> = RingBuffer::from([1, 2, 3]);
        buf.push_back(4);
        assert_eq!(format!("{:?}", buf), "[2, 3, 4]");
    }

    #[test]
    fn drop_runs_for_every_live_element() {
        use std::rc::Rc;

        let token = Rc::new(());
        {
            let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
            for _ in 0..5 {
                buf.push_back(Rc::clone(&token));
            }
            assert_eq!(Rc::strong_count(&token), 4);
        }
        assert_eq!(Rc::strong_count(&token), 1);
    }
}
