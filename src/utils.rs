//! Modular slot arithmetic shared by the buffer and its cursors.

/// Moves `slot` forward by `addend` slots, wrapping at `capacity`.
///
/// Never crosses the block end more than once, so `addend` must not exceed
/// `capacity`.
#[inline]
pub fn advance(slot: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(addend <= capacity);
    debug_assert!(slot < capacity || capacity == 0);
    if addend < capacity - slot {
        slot + addend
    } else {
        slot + addend - capacity
    }
}

/// Moves `slot` backward by `subtrahend` slots, wrapping at `capacity`.
#[inline]
pub fn retreat(slot: usize, subtrahend: usize, capacity: usize) -> usize {
    debug_assert!(subtrahend <= capacity);
    debug_assert!(slot < capacity || capacity == 0);
    if subtrahend > slot {
        slot + capacity - subtrahend
    } else {
        slot - subtrahend
    }
}

/// Number of slots walked going forward from `from` to `to`.
#[inline]
pub fn distance(from: usize, to: usize, capacity: usize) -> usize {
    debug_assert!(from < capacity || capacity == 0);
    debug_assert!(to < capacity || capacity == 0);
    if to >= from {
        to - from
    } else {
        capacity + to - from
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_once() {
        assert_eq!(advance(0, 3, 5), 3);
        assert_eq!(advance(3, 1, 5), 4);
        assert_eq!(advance(4, 1, 5), 0);
        assert_eq!(advance(3, 4, 5), 2);
        assert_eq!(advance(2, 5, 5), 2);
    }

    #[test]
    fn retreat_wraps_once() {
        assert_eq!(retreat(3, 3, 5), 0);
        assert_eq!(retreat(0, 1, 5), 4);
        assert_eq!(retreat(1, 4, 5), 2);
        assert_eq!(retreat(2, 5, 5), 2);
    }

    #[test]
    fn distance_is_forward_walk() {
        assert_eq!(distance(1, 4, 5), 3);
        assert_eq!(distance(4, 1, 5), 2);
        assert_eq!(distance(2, 2, 5), 0);
    }
}
