//! Ring buffer for received bytes
//!
//! Head/tail cursors plus a full flag over caller-provided storage.
//! Writes overwrite the oldest byte once the buffer is saturated.

use core::fmt;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

use crate::{Result, RingError};

/// Logical occupancy state of a ring buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingState {
    /// No unread bytes
    Empty,
    /// Some unread bytes, at least one free slot
    Partial,
    /// Every slot holds an unread byte; the next write evicts the oldest
    Full,
}

/// Ring buffer with embedded, statically allocated storage
pub type StaticRing<const N: usize> = RingBuffer<[u8; N]>;

/// Fixed-capacity byte ring buffer
///
/// # Type Parameters
/// * `S` - Backing storage. `&mut [u8]` borrows a caller-owned region for
///   the buffer's lifetime; `[u8; N]` embeds it (see [`StaticRing`]).
///
/// # Occupancy
/// `head == tail` means empty unless `full` is set. The number of unread
/// bytes is always derived from the cursors, never stored.
///
/// # Concurrency
/// No internal locking. `write` updates several fields, so a reader that
/// interleaves with it can observe a torn state. Callers sharing one buffer
/// between an interrupt handler and a loop must serialize access themselves.
pub struct RingBuffer<S> {
    storage: S,
    capacity: NonZeroUsize,
    head: usize, // Write position
    tail: usize, // Read position
    full: bool,
    overruns: usize,
}

impl<S> RingBuffer<S> {
    /// Number of byte slots
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of unread bytes
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        let capacity = self.capacity.get();
        if self.full {
            capacity
        } else if self.head >= self.tail {
            self.head - self.tail
        } else {
            (capacity - self.tail) + self.head
        }
    }

    /// Number of slots that can be written before the oldest byte is evicted
    pub fn free(&self) -> usize {
        self.capacity.get() - self.len()
    }

    /// Check if the buffer is full
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.head == self.tail && !self.full
    }

    pub fn state(&self) -> RingState {
        if self.full {
            RingState::Full
        } else if self.head == self.tail {
            RingState::Empty
        } else {
            RingState::Partial
        }
    }

    /// Bytes evicted by overwrite-on-full since construction or the last
    /// [`take_overruns`](Self::take_overruns)
    ///
    /// Saturates at `usize::MAX`. `reset` does not clear it.
    pub fn overruns(&self) -> usize {
        self.overruns
    }

    /// Return the overrun count and clear it
    pub fn take_overruns(&mut self) -> usize {
        core::mem::take(&mut self.overruns)
    }

    /// Discard all unread bytes
    ///
    /// Both cursors return to slot 0. Storage contents are left as-is.
    #[doc(alias = "clear")]
    pub fn reset(&mut self) {
        let discarded = self.len();
        self.head = 0;
        self.tail = 0;
        self.full = false;

        if discarded > 0 {
            log::debug!("ring buffer reset, discarded {} unread bytes", discarded);
        }
        self.check_invariants();
    }

    /// Release the backing storage
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Index following `index`, wrapping at capacity
    #[inline]
    fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.capacity.get() {
            0
        } else {
            next
        }
    }

    #[inline]
    fn check_invariants(&self) {
        debug_assert!(
            self.head < self.capacity.get(),
            "head {} out of range (capacity {})",
            self.head,
            self.capacity
        );
        debug_assert!(
            self.tail < self.capacity.get(),
            "tail {} out of range (capacity {})",
            self.tail,
            self.capacity
        );
        debug_assert!(
            !self.full || self.head == self.tail,
            "full flag set with head {} != tail {}",
            self.head,
            self.tail
        );
    }
}

impl<S: AsRef<[u8]>> RingBuffer<S> {
    /// The slots in use, `[0, capacity)`
    fn slots(&self) -> &[u8] {
        &self.storage.as_ref()[..self.capacity.get()]
    }

    /// Peek at the oldest unread byte (the next `read` result)
    pub fn peek(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots()[self.tail])
        }
    }

    /// Most recently written byte, without removing it
    ///
    /// Returns `None` if the buffer is empty.
    pub fn peek_last(&self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }

        let index = if self.head == 0 {
            self.capacity.get() - 1
        } else {
            self.head - 1
        };
        Some(self.slots()[index])
    }

    /// Second most recently written byte, without removing it
    ///
    /// Returns `None` if fewer than two bytes are unread. A capacity-1
    /// buffer can never hold two bytes, so it always returns `None`.
    pub fn peek_second_last(&self) -> Option<u8> {
        let capacity = self.capacity.get();
        if capacity < 2 || self.len() < 2 {
            return None;
        }

        let index = match self.head {
            0 => capacity - 2,
            1 => capacity - 1,
            head => head - 2,
        };
        Some(self.slots()[index])
    }

    /// Iterate over unread bytes, oldest first, without consuming them
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots(),
            index: self.tail,
            remaining: self.len(),
        }
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> RingBuffer<S> {
    /// Create an empty ring buffer using every slot of `storage`
    ///
    /// # Errors
    /// Returns `RingError::ZeroCapacity` if `storage` is empty
    pub fn new(storage: S) -> Result<Self> {
        let capacity = storage.as_ref().len();
        Self::with_capacity(storage, capacity)
    }

    /// Create an empty ring buffer using the first `capacity` slots of `storage`
    ///
    /// # Errors
    /// - `RingError::ZeroCapacity` if `capacity` is 0
    /// - `RingError::StorageTooSmall` if `storage` has fewer than `capacity` slots
    pub fn with_capacity(storage: S, capacity: usize) -> Result<Self> {
        let available = storage.as_ref().len();
        let capacity = NonZeroUsize::new(capacity).ok_or(RingError::ZeroCapacity)?;
        if capacity.get() > available {
            return Err(RingError::StorageTooSmall {
                capacity: capacity.get(),
                available,
            });
        }

        log::debug!("ring buffer bound to {} byte slots", capacity);

        Ok(Self {
            storage,
            capacity,
            head: 0,
            tail: 0,
            full: false,
            overruns: 0,
        })
    }

    /// Push a byte into the buffer
    ///
    /// Never fails. When the buffer is full the oldest unread byte is
    /// dropped and the read cursor moves with the write cursor.
    pub fn write(&mut self, byte: u8) {
        let was_full = self.full;
        if was_full {
            log::trace!(
                "ring buffer overrun: evicting {:#04x} at slot {}",
                self.storage.as_ref()[self.tail],
                self.tail
            );
            self.overruns = self.overruns.saturating_add(1);
        }

        self.storage.as_mut()[self.head] = byte;
        self.head = self.next_index(self.head);

        if was_full {
            self.tail = self.next_index(self.tail);
        }

        if self.head == self.tail {
            self.full = true;
        }

        self.check_invariants();
    }

    /// Pop the oldest unread byte
    ///
    /// Returns `None` if the buffer is empty; that is a normal poll
    /// outcome, not an error.
    pub fn read(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }

        let byte = self.storage.as_ref()[self.tail];
        self.tail = self.next_index(self.tail);
        self.full = false;

        self.check_invariants();
        Some(byte)
    }

    /// Write every byte of `data` in order
    ///
    /// # Returns
    /// How many previously unread bytes were evicted to make room
    pub fn extend_from_slice(&mut self, data: &[u8]) -> usize {
        let evicted = (self.len() + data.len()).saturating_sub(self.capacity.get());
        for &byte in data {
            self.write(byte);
        }
        evicted
    }

    /// Read up to `buf.len()` bytes, oldest first
    ///
    /// # Returns
    /// Number of bytes copied into `buf` (0 if the buffer is empty)
    pub fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.read() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    /// Consume unread bytes as an iterator
    ///
    /// Bytes not pulled from the iterator stay in the buffer.
    pub fn drain(&mut self) -> Drain<'_, S> {
        Drain { ring: self }
    }
}

impl<const N: usize> RingBuffer<[u8; N]> {
    const CAPACITY: NonZeroUsize = match NonZeroUsize::new(N) {
        Some(capacity) => capacity,
        None => panic!("Ring buffer capacity must be non-zero"),
    };

    /// Create a new empty ring buffer with embedded storage
    ///
    /// Usable in `static` items. `N == 0` is rejected at compile time.
    pub const fn new_static() -> Self {
        Self {
            storage: [0; N],
            capacity: Self::CAPACITY,
            head: 0,
            tail: 0,
            full: false,
            overruns: 0,
        }
    }
}

impl<const N: usize> Default for RingBuffer<[u8; N]> {
    fn default() -> Self {
        Self::new_static()
    }
}

impl<S> fmt::Debug for RingBuffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("full", &self.full)
            .field("len", &self.len())
            .finish()
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Extend<u8> for RingBuffer<S> {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            self.write(byte);
        }
    }
}

impl<'a, S: AsRef<[u8]> + AsMut<[u8]>> Extend<&'a u8> for RingBuffer<S> {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        for &byte in iter {
            self.write(byte);
        }
    }
}

impl<'a, S: AsRef<[u8]>> IntoIterator for &'a RingBuffer<S> {
    type Item = u8;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Non-consuming iterator over unread bytes, oldest first
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: &'a [u8],
    index: usize,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }

        let byte = self.slots[self.index];
        self.index += 1;
        if self.index == self.slots.len() {
            self.index = 0;
        }
        self.remaining -= 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Draining iterator returned by [`RingBuffer::drain`]
#[derive(Debug)]
pub struct Drain<'a, S> {
    ring: &'a mut RingBuffer<S>,
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Iterator for Drain<'_, S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.ring.read()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> ExactSizeIterator for Drain<'_, S> {}
impl<S: AsRef<[u8]> + AsMut<[u8]>> FusedIterator for Drain<'_, S> {}
