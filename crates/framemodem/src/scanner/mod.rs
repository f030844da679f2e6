//! The framing scanner: a byte-driven tokenizer for octet-counted streams.
//!
//! What it does
//! - Owns a [`ByteSource`] exclusively and exposes one advancing operation,
//!   [`Scanner::next_token`], which performs zero or more reads against the
//!   source and returns exactly one [`Token`].
//! - Tracks two pieces of state: the most recently declared message length
//!   (`msg_len`, zero when none is pending) and a `ready` flag meaning "a
//!   length and its separator have just been consumed, a payload of that
//!   length is expected next". Together they drive an implicit state
//!   machine: expect-length, expect-separator, expect-payload, and back.
//!
//! Invariants
//! - `ready` is true only between consuming the separator and consuming the
//!   declared payload. After a payload token (full, or truncated by end of
//!   stream) both `msg_len` and `ready` reset.
//! - Inside the payload window every byte belongs to the payload, digits
//!   and further spaces included; octet counting admits arbitrary content.
//! - Once the source is exhausted, every further call returns an empty
//!   end-of-stream token.
//!
//! The scanner never fails: malformed framing and stream end are token
//! variants, not errors. A caller that wants whole messages with an error
//! channel layers [`Frames`](crate::Frames) on top.

use alloc::vec::Vec;

use crate::{
    classify,
    source::{ByteSource, SliceSource},
    token::{Token, TokenKind},
};

#[cfg(feature = "std")]
use crate::source::ReadSource;

/// Payload buffers are pre-sized to the declared length, but never beyond
/// this, so a tiny stream declaring a huge length cannot demand a huge
/// allocation up front. The buffer still grows to whatever actually
/// arrives.
const MAX_PAYLOAD_PREALLOC: usize = 64 * 1024;

/// Parses an accumulated digit buffer as an unsigned decimal length.
///
/// Overflowing `u64` degrades the length to zero: the framing layer puts no
/// bound on lengths it can represent, but an unrepresentable one cannot
/// open a payload window, so the following bytes reclassify as ordinary
/// tokens instead.
pub(crate) fn parse_msg_len(digits: &[u8]) -> u64 {
    let mut len = 0u64;
    for &b in digits {
        debug_assert!(classify::is_digit(b));
        let Some(next) = len
            .checked_mul(10)
            .and_then(|shifted| shifted.checked_add(u64::from(b - b'0')))
        else {
            return 0;
        };
        len = next;
    }
    len
}

/// A streaming tokenizer over an octet-counted byte stream.
///
/// Strictly single-threaded and pull-based: each [`next_token`] call blocks
/// only as long as the underlying source blocks, and the scanner holds no
/// token history. Every returned [`Token`] owns its payload outright.
///
/// # Examples
///
/// ```rust
/// use framemodem::{Scanner, TokenKind};
///
/// let mut scanner = Scanner::from_slice(b"5 hello");
/// assert_eq!(scanner.next_token().kind(), TokenKind::MsgLen);
/// assert_eq!(scanner.next_token().kind(), TokenKind::Whitespace);
/// assert_eq!(scanner.next_token().payload(), b"hello");
/// ```
///
/// [`next_token`]: Scanner::next_token
#[derive(Debug)]
pub struct Scanner<S> {
    source: S,
    msg_len: u64,
    ready: bool,
}

impl<'a> Scanner<SliceSource<'a>> {
    /// Creates a scanner over an in-memory byte slice.
    #[must_use]
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self::new(SliceSource::new(bytes))
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Scanner<ReadSource<R>> {
    /// Creates a scanner over a blocking reader, buffered with the default
    /// capacity.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReadSource::new(reader))
    }
}

impl<S: ByteSource> Scanner<S> {
    /// Creates a scanner that takes exclusive ownership of `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            msg_len: 0,
            ready: false,
        }
    }

    /// A shared view of the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Unwraps the scanner, returning the underlying source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Returns the next token.
    ///
    /// Never fails: end of stream and malformed input are token variants.
    /// Dispatch is byte-driven. With a separator just consumed and a
    /// non-zero declared length pending, the next `msg_len` bytes are
    /// payload no matter their values; otherwise a non-zero digit opens a
    /// length field, the separator byte emits [`TokenKind::Whitespace`],
    /// and anything else emits [`TokenKind::Illegal`].
    ///
    /// A [`TokenKind::Illegal`] token leaves the declared length and the
    /// ready flag untouched: a stray byte between a length field and its
    /// separator does not forget the length, so `b"5x abcde"` scans as
    /// length, illegal `x`, separator, then the five-byte payload. Callers
    /// that treat illegal bytes as fatal simply stop calling.
    pub fn next_token(&mut self) -> Token {
        let Some(byte) = self.source.next_byte() else {
            self.ready = false;
            return Token::new(TokenKind::EndOfStream, Vec::new());
        };

        if self.ready && self.msg_len > 0 {
            self.source.unread_byte(byte);
            return self.scan_syslog_msg();
        }

        if classify::is_non_zero_digit(byte) {
            self.source.unread_byte(byte);
            self.ready = false;
            return self.scan_msg_len();
        }

        if classify::is_whitespace(byte) {
            self.ready = true;
            return Token::new(TokenKind::Whitespace, alloc::vec![byte]);
        }

        Token::new(TokenKind::Illegal, alloc::vec![byte])
    }

    /// Borrows the scanner as an iterator yielding tokens up to and
    /// including the first [`TokenKind::EndOfStream`].
    pub fn tokens(&mut self) -> Tokens<'_, S> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    /// Consumes the scanner, sequencing its tokens into whole message
    /// payloads.
    pub fn into_frames(self) -> crate::Frames<S> {
        crate::Frames::new(self)
    }

    /// Scans a length field. The byte just pushed back is a non-zero
    /// digit; every following decimal digit joins the field, and the first
    /// non-digit is pushed back for the next dispatch.
    fn scan_msg_len(&mut self) -> Token {
        let mut lit = Vec::new();
        if let Some(byte) = self.source.next_byte() {
            lit.push(byte);
        }
        loop {
            match self.source.next_byte() {
                None => break,
                Some(byte) if classify::is_digit(byte) => lit.push(byte),
                Some(byte) => {
                    self.source.unread_byte(byte);
                    break;
                }
            }
        }
        self.msg_len = parse_msg_len(&lit);
        Token::new(TokenKind::MsgLen, lit)
    }

    /// Scans exactly `msg_len` payload bytes. If the stream ends first, the
    /// partial buffer rides out on the end-of-stream token so a truncated
    /// final message is never silently dropped.
    fn scan_syslog_msg(&mut self) -> Token {
        let prealloc = usize::try_from(self.msg_len)
            .unwrap_or(usize::MAX)
            .min(MAX_PAYLOAD_PREALLOC);
        let mut payload = Vec::with_capacity(prealloc);
        for _ in 0..self.msg_len {
            let Some(byte) = self.source.next_byte() else {
                self.msg_len = 0;
                self.ready = false;
                return Token::new(TokenKind::EndOfStream, payload);
            };
            payload.push(byte);
        }
        self.msg_len = 0;
        self.ready = false;
        Token::new(TokenKind::SyslogMsg, payload)
    }
}

/// Borrowing iterator over a scanner's tokens.
///
/// Yields every token [`Scanner::next_token`] produces, ending after the
/// first [`TokenKind::EndOfStream`] (which is yielded). The scanner remains
/// usable afterwards and will keep reporting end of stream.
#[derive(Debug)]
pub struct Tokens<'a, S> {
    scanner: &'a mut Scanner<S>,
    done: bool,
}

impl<S: ByteSource> Iterator for Tokens<'_, S> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.scanner.next_token();
        if token.is_end_of_stream() {
            self.done = true;
        }
        Some(token)
    }
}

impl<S: ByteSource> core::iter::FusedIterator for Tokens<'_, S> {}
