//! Logical positions on a ring.
//!
//! A physical slot alone cannot tell "first element" from "one past the last
//! element" once the buffer is full (or empty): both live in the same slot.
//! `Position` carries that distinction explicitly, and `Ring` maps positions
//! to logical offsets in `[0, len]` and back.

use crate::utils::{advance, distance};

/// A cursor position inside a `RingBuffer`.
///
/// `Begin` is the first element (logical offset 0), `End` is one past the
/// last element (logical offset `len`), and `Slot` names a physical slot
/// holding any other element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// The first element.
    Begin,
    /// An element addressed by its physical slot.
    Slot(usize),
    /// One past the last element.
    End,
}

/// Geometry of a ring at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ring {
    pub begin: usize,
    pub len: usize,
    pub cap: usize,
}

impl Ring {
    #[inline]
    pub fn new(begin: usize, len: usize, cap: usize) -> Ring {
        debug_assert!(len <= cap);
        debug_assert!(begin < cap || cap == 0);
        Ring { begin, len, cap }
    }

    /// Logical offset of `pos`, counted from the first element.
    #[inline]
    pub fn linearize(&self, pos: Position) -> usize {
        match pos {
            Position::Begin => 0,
            Position::End => self.len,
            Position::Slot(slot) => distance(self.begin, slot, self.cap),
        }
    }

    /// Physical slot of logical `offset`. `offset` must be below `cap`.
    #[inline]
    pub fn physical(&self, offset: usize) -> usize {
        advance(self.begin, offset, self.cap)
    }

    /// Slot right after the last element. Equals `begin` when full.
    #[inline]
    pub fn end_slot(&self) -> usize {
        if self.cap == 0 {
            0
        } else {
            advance(self.begin, self.len, self.cap)
        }
    }

    /// Canonical position of logical `offset` in `[0, len]`.
    #[inline]
    pub fn locate(&self, offset: usize) -> Position {
        debug_assert!(offset <= self.len, "offset {} past len {}", offset, self.len);
        if offset >= self.len {
            Position::End
        } else if offset == 0 {
            Position::Begin
        } else {
            Position::Slot(self.physical(offset))
        }
    }

    /// Whether `pos` can be interpreted against this geometry at all.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        match pos {
            Position::Begin | Position::End => true,
            Position::Slot(slot) => slot < self.cap && distance(self.begin, slot, self.cap) < self.len,
        }
    }

    /// Physical slot of the live element at `pos`, if there is one.
    #[inline]
    pub fn element_slot(&self, pos: Position) -> Option<usize> {
        match pos {
            Position::End => None,
            Position::Begin if self.len == 0 => None,
            Position::Begin => Some(self.begin),
            Position::Slot(slot) if self.contains(pos) => Some(slot),
            Position::Slot(_) => None,
        }
    }

    /// Moves `pos` by `n` logical steps.
    ///
    /// Movement is cyclic over the `len + 1` positions: one step past `End`
    /// is `Begin`, one step before `Begin` is `End`.
    #[inline]
    pub fn offset_by(&self, pos: Position, n: i128) -> Position {
        let span = self.len as i128 + 1;
        let target = (self.linearize(pos) as i128 + n).rem_euclid(span);
        self.locate(target as usize)
    }

    /// Signed logical distance `a - b`.
    #[inline]
    pub fn diff(&self, a: Position, b: Position) -> isize {
        self.linearize(a) as isize - self.linearize(b) as isize
    }
}
