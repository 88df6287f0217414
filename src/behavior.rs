//! Behavior semantics for `RingBuffer`.

/// Tagging trait for providing full-buffer behaviors to `RingBuffer`.
///
/// Only `push_front` and `push_back` (and what is built on them, like
/// `Extend`) look at the behavior. Every other operation is shared.
pub trait Behavior: private::Sealed {}

/// Behavior for `RingBuffer` that specifies wrapping write semantics.
///
/// ### Pushing to back:
///
/// Pushing elements to the **back** of a buffer that **has already reached its capacity**
/// causes it to **overwrite** existing elements from the **front**.
///
/// ### Pushing to front:
///
/// Pushing elements to the **front** of a buffer that **has already reached its capacity**
/// causes it to **overwrite** existing elements from the **back**.
///
/// A buffer with zero capacity refuses every push and hands the element back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Wrapping;
impl Behavior for Wrapping {}

/// Behavior for `RingBuffer` that specifies growing write semantics.
///
/// ### Pushing to back or front:
///
/// Pushing elements to either end of a buffer that **has already reached its capacity**
/// causes it to **double its capacity** (or allocate a single slot when the
/// capacity is zero) and then insert, so nothing is ever overwritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Growing;
impl Behavior for Growing {}

mod private {
    pub trait Sealed {}

    impl Sealed for super::Wrapping {}
    impl Sealed for super::Growing {}
}
