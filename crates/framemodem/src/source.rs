//! Byte sources: the scanner's only view of its input.
//!
//! The framing grammar needs exactly two capabilities from the input: read
//! the next byte (or learn the stream is exhausted) and push the most
//! recently read byte back for the next read. One byte of look-ahead is all
//! the scanner ever uses, so [`ByteSource`] models nothing more: an
//! in-memory slice and a buffered blocking reader both fit behind it, and
//! tests can substitute either.

#[cfg(feature = "std")]
use alloc::vec::Vec;

/// A pull-based cursor over a byte stream with one byte of push-back.
///
/// Exhaustion is a state, not an error: once `next_byte` returns `None`, it
/// keeps returning `None`. I/O faults are the implementation's concern and
/// must also surface as exhaustion (see [`ReadSource::last_error`] for how
/// the blocking adapter retains the fault).
///
/// `unread_byte` may only be called with the byte most recently returned by
/// `next_byte`, and at most once between reads.
pub trait ByteSource {
    /// Reads the next byte, or `None` once the stream is exhausted.
    fn next_byte(&mut self) -> Option<u8>;

    /// Pushes the most recently read byte back onto the stream.
    fn unread_byte(&mut self, byte: u8);
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }

    fn unread_byte(&mut self, byte: u8) {
        (**self).unread_byte(byte);
    }
}

/// An in-memory [`ByteSource`] over a borrowed slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source reading `bytes` from the start.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// The bytes not yet read.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn unread_byte(&mut self, byte: u8) {
        debug_assert!(self.pos > 0, "unread before any read");
        self.pos -= 1;
        debug_assert_eq!(self.bytes[self.pos], byte, "unread of a byte not read");
    }
}

/// Default read buffer capacity for [`ReadSource`].
#[cfg(feature = "std")]
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// A buffered [`ByteSource`] over a blocking [`std::io::Read`].
///
/// Reads are batched through an internal buffer; the scanner still consumes
/// one byte at a time and never reads past what framing requires, so the
/// underlying stream can be a live, incrementally-filled connection.
///
/// I/O faults are reported to the scanner as end-of-stream; fault handling
/// belongs to the transport, not the framing layer. The fault itself is
/// retained: after a scan reports end of stream, the transport can call
/// [`last_error`](Self::last_error) to distinguish a clean close from a
/// failed read. [`std::io::ErrorKind::Interrupted`] reads are retried
/// transparently.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    pushback: Option<u8>,
    failed: bool,
    last_error: Option<std::io::Error>,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ReadSource<R> {
    /// Creates a source with the default buffer capacity.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, inner)
    }

    /// Creates a source with an explicit buffer capacity (at least one
    /// byte).
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buf: alloc::vec![0; capacity.max(1)],
            start: 0,
            end: 0,
            pushback: None,
            failed: false,
            last_error: None,
        }
    }

    /// The I/O fault that ended the stream, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&std::io::Error> {
        self.last_error.as_ref()
    }

    /// Takes the retained I/O fault, leaving `None` behind.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.last_error.take()
    }

    /// Unwraps the source, returning the underlying reader.
    ///
    /// Buffered and pushed-back bytes are discarded.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn refill(&mut self) -> bool {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => return false,
                Ok(n) => {
                    self.start = 0;
                    self.end = n;
                    return true;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.failed = true;
                    self.last_error = Some(e);
                    return false;
                }
            }
        }
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for ReadSource<R> {
    fn next_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.pushback.take() {
            return Some(byte);
        }
        if self.start == self.end && (self.failed || !self.refill()) {
            return None;
        }
        let byte = self.buf[self.start];
        self.start += 1;
        Some(byte)
    }

    fn unread_byte(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "one byte of push-back only");
        self.pushback = Some(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_source_reads_in_order() {
        let mut source = SliceSource::new(b"ab");
        assert_eq!(source.next_byte(), Some(b'a'));
        assert_eq!(source.next_byte(), Some(b'b'));
        assert_eq!(source.next_byte(), None);
        assert_eq!(source.next_byte(), None);
    }

    #[test]
    fn slice_source_unread_replays_byte() {
        let mut source = SliceSource::new(b"xy");
        let byte = source.next_byte().unwrap();
        source.unread_byte(byte);
        assert_eq!(source.next_byte(), Some(b'x'));
        assert_eq!(source.next_byte(), Some(b'y'));
        assert_eq!(source.remaining(), b"");
    }
}
