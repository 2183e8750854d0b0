//! `std::io` adapters
//!
//! Writing never fails: every byte is accepted and saturation evicts the
//! oldest unread bytes. Reading an empty buffer returns `Ok(0)`.

use std::io;

use crate::RingBuffer;

impl<S: AsRef<[u8]> + AsMut<[u8]>> io::Write for RingBuffer<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> io::Read for RingBuffer<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf))
    }
}
