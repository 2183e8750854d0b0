//! Byte Ring - Fixed-capacity circular byte buffer
//!
//! # Purpose
//! Decouples a byte producer (typically a UART receive interrupt or an I/O
//! callback) from the loop that processes those bytes, without any dynamic
//! memory allocation.
//!
//! # Integration Points
//! - Depends on: nothing beyond `core`
//! - Provides to: drivers and components that buffer received bytes
//! - Storage: caller-provided, either a borrowed `&mut [u8]` or an embedded
//!   `[u8; N]` array
//!
//! # Architecture
//! Occupancy is tracked by a write cursor (head), a read cursor (tail) and a
//! full flag. `head == tail` alone is ambiguous, so the flag tells a full
//! buffer apart from an empty one. No element counter is kept.
//!
//! When the buffer is saturated, `write` overwrites the oldest unread byte.
//! The newest data always wins and the producer never blocks or fails.
//!
//! All operations are O(1) (bulk helpers are O(n) in their input) and never
//! block. There is no internal locking: one context writes, one context
//! reads, and the caller serializes access when the two can interleave.
//!
//! # Testing Strategy
//! - Unit tests: state transitions, wraparound, peeks, overwrite policy
//! - Integration tests: ISR-style producer feeding a processing loop
//! - Benchmarks: criterion throughput for write/read paths
//!
//! # Example
//! ```
//! use byte_ring::RingBuffer;
//!
//! let mut storage = [0u8; 4];
//! let mut rx = RingBuffer::new(&mut storage[..]).unwrap();
//!
//! rx.extend_from_slice(b"hello");
//! assert!(rx.is_full());
//! assert_eq!(rx.overruns(), 1);
//!
//! assert_eq!(rx.peek_last(), Some(b'o'));
//! assert_eq!(rx.read(), Some(b'e'));
//! assert_eq!(rx.len(), 3);
//! ```

#![no_std]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

mod ring;

#[cfg(feature = "std")]
pub mod io;

pub use ring::{Drain, Iter, RingBuffer, RingState, StaticRing};

use static_assertions::{assert_impl_all, assert_not_impl_any};
use thiserror::Error;

/// Error types for ring buffer construction
///
/// Runtime operations never fail; only binding storage can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("Ring buffer capacity must be non-zero")]
    ZeroCapacity,

    #[error("Storage too small (capacity: {capacity}, available: {available} bytes)")]
    StorageTooSmall { capacity: usize, available: usize },
}

pub type Result<T> = core::result::Result<T, RingError>;

// Thread-safety follows the storage; the buffer itself adds no shared state.
assert_impl_all!(RingBuffer<&'static mut [u8]>: Send, Sync);
assert_impl_all!(StaticRing<64>: Send, Sync, Default);
assert_not_impl_any!(RingBuffer<&'static mut [u8]>: Clone);
