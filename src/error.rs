//! Error types for fallible allocation and growth.

use core::alloc::Layout;
use core::fmt;

use thiserror::Error;

/// The error type for `try_reserve` and the other fallible growth paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TryReserveError {
    /// The requested capacity does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocator refused to hand out a block of the given layout.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// The layout that was requested.
        layout: Layout,
    },
}

/// Error value indicating insufficient capacity
///
/// This error only occur to `RingBuffer<_, Growing>`, when growing the
/// storage failed. The element that could not be pushed is handed back.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient capacity: {cause}")]
pub struct CapacityError<T = ()> {
    /// The element that caused the error.
    pub element: T,
    /// Why the storage could not grow.
    #[source]
    pub cause: TryReserveError,
}

impl<T> CapacityError<T> {
    /// Creates a new `CapacityError` from `element` and `cause`.
    pub const fn new(element: T, cause: TryReserveError) -> CapacityError<T> {
        CapacityError { element, cause }
    }

    /// Extracts the rejected element.
    pub fn into_element(self) -> T {
        self.element
    }

    /// Converts into a `CapacityError` that does not carry an element.
    pub fn simplify(self) -> CapacityError {
        CapacityError {
            element: (),
            cause: self.cause,
        }
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", "CapacityError", self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_messages() {
        assert_eq!(TryReserveError::CapacityOverflow.to_string(), "capacity overflow");

        let layout = Layout::array::<u64>(4).unwrap();
        let err = TryReserveError::AllocError { layout };
        assert_eq!(err.to_string(), "memory allocation of 32 bytes failed");
    }

    #[test]
    fn capacity_error_keeps_element_and_source() {
        let err = CapacityError::new(7, TryReserveError::CapacityOverflow);
        assert_eq!(err.to_string(), "insufficient capacity: capacity overflow");
        assert_eq!(format!("{:?}", err), "CapacityError: capacity overflow");
        assert!(err.source().is_some());
        assert_eq!(err.simplify().element, ());
        assert_eq!(err.into_element(), 7);
    }
}
