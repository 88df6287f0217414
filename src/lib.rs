//! A heap-backed circular buffer with random-access cursors.
//!
//! `RingBuffer` keeps its elements in one allocated block addressed modulo its
//! capacity, so the logical front and back can sit anywhere in the block.
//! Pushes and pops at both ends are `O(1)`, indexing is `O(1)` like a vector,
//! and inserting or erasing in the middle moves whichever side is shorter.
//!
//! What a push does on a full buffer is chosen by a type parameter:
//!
//! - [`Wrapping`] (the default) overwrites the element at the opposite end
//!   and hands it back, keeping the capacity fixed.
//! - [`Growing`] doubles the capacity instead (a zero-capacity buffer gets a
//!   single slot).
//!
//! # Feature Flags
//! The **ringdeque** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd. Without it the crate only needs `alloc`.
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ringdeque = "0.1"
//! ```
//!
//! For a `#![no_std]` crate with an allocator:
//!
//! ```toml
//! [dependencies]
//! ringdeque = { version = "0.1", default-features = false }
//! ```
//!
//! # Logging
//!
//! Storage relocation and growth emit [`tracing`] events under the
//! `ringdeque` target. No subscriber is installed by this crate.
//!
//! # Examples
//! ```
//! use ringdeque::RingBuffer;
//!
//! let mut buf: RingBuffer<_> = RingBuffer::with_capacity(2);
//! assert_eq!(buf.capacity(), 2);
//! assert_eq!(buf.len(), 0);
//!
//! buf.push_back(1);
//! buf.push_back(2);
//! assert_eq!(buf.push_back(3), Some(1));
//!
//! assert_eq!(buf.pop_front(), Some(2));
//! assert_eq!(buf.pop_front(), Some(3));
//! assert_eq!(buf.pop_front(), None);
//! ```
//!
//! # Growing
//! ```
//! use ringdeque::{Growing, RingBuffer};
//!
//! let mut buf: RingBuffer<_, Growing> = RingBuffer::new();
//! buf.extend(0..5);
//!
//! assert_eq!(buf.len(), 5);
//! assert!(buf.capacity() >= 5);
//! assert_eq!(format!("{:?}", buf), "[0, 1, 2, 3, 4]");
//! ```
//!
//! # Insert & Erase
//! ```
//! use ringdeque::RingBuffer;
//!
//! let mut buf: RingBuffer<_> = (1..10).collect();
//! let first = buf.handle_at(2);
//! let last = buf.handle_at(5);
//! buf.erase_range(first, last);
//! assert_eq!(buf, [1, 2, 6, 7, 8, 9]);
//!
//! let begin = buf.begin();
//! buf.insert_n(begin, 3, 4);
//! assert_eq!(buf.len(), 9);
//! assert_eq!(buf.front(), Some(&4));
//! ```
//!
//! # Cursors
//! ```
//! use ringdeque::RingBuffer;
//!
//! let mut buf: RingBuffer<_> = RingBuffer::from([5, 1, 4]);
//! buf.push_back(2);
//! buf.sort();
//!
//! let begin = buf.cbegin();
//! let end = buf.cend();
//! assert_eq!(end - begin, 3);
//! assert_eq!(buf.lower_bound(&3).offset(), 2);
//! assert_eq!(buf.binary_search(&4), Ok(2));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

mod behavior;
mod cursor;
pub mod error;
mod position;
mod ringbuffer;
mod storage;
mod utils;

pub use crate::behavior::{Behavior, Growing, Wrapping};
pub use crate::cursor::{Cursor, CursorMut, Handle};
pub use crate::error::{CapacityError, TryReserveError};
pub use crate::position::Position;
pub use crate::ringbuffer::{Drain, IntoIter, Iter, IterMut, RangeArgument, RingBuffer};
