//! Sequencing tokens into whole message payloads.
//!
//! The scanner reports what it sees; it does not insist that a length is
//! followed by a separator, or a separator by a payload. [`Frames`] layers
//! that expectation on top: it drives the token stream through the
//! `length → separator → payload` cycle and yields each complete payload,
//! turning anything else into a [`FrameError`]. Payloads stay opaque;
//! handing them to an RFC 5424 content parser is still the consumer's
//! business.

use alloc::vec::Vec;

use crate::{
    scanner::{Scanner, parse_msg_len},
    source::ByteSource,
    token::TokenKind,
};

/// A violation of the `length → separator → payload` cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The stream ended partway through a declared payload. The bytes that
    /// did arrive are carried in `partial`; they are not a complete message
    /// and must not be forwarded as one.
    #[error("stream ended after {} of {expected} declared payload bytes", .partial.len())]
    Truncated {
        /// The length the final message declared.
        expected: u64,
        /// The payload bytes collected before the stream ended.
        partial: Vec<u8>,
    },

    /// A byte that does not belong at its position in the framing cycle:
    /// a stray byte between messages, a length not followed by the
    /// separator, or a length field starting with a zero.
    #[error("unexpected byte 0x{0:02x} in framing")]
    UnexpectedByte(u8),

    /// The stream ended between a length field and its payload.
    #[error("stream ended before the declared payload")]
    UnexpectedEof,
}

/// Iterator over whole message payloads, `Item = Result<Vec<u8>,
/// FrameError>`.
///
/// A clean end of stream at a message boundary ends iteration. The first
/// error also ends it: a framing violation means the byte stream can no
/// longer be trusted to be octet-counted, and resynchronizing (or closing
/// the connection) is the transport's decision to make on a fresh scanner.
///
/// # Examples
///
/// ```rust
/// use framemodem::{FrameError, Scanner};
///
/// let mut frames = Scanner::from_slice(b"3 abc5 ab").into_frames();
/// assert_eq!(frames.next(), Some(Ok(b"abc".to_vec())));
/// assert_eq!(
///     frames.next(),
///     Some(Err(FrameError::Truncated {
///         expected: 5,
///         partial: b"ab".to_vec(),
///     }))
/// );
/// assert_eq!(frames.next(), None);
/// ```
#[derive(Debug)]
pub struct Frames<S> {
    scanner: Scanner<S>,
    done: bool,
}

impl<S: ByteSource> Frames<S> {
    /// Wraps a scanner, taking ownership of it.
    pub fn new(scanner: Scanner<S>) -> Self {
        Self {
            scanner,
            done: false,
        }
    }

    /// Unwraps the iterator, returning the scanner.
    pub fn into_scanner(self) -> Scanner<S> {
        self.scanner
    }

    fn fail(&mut self, error: FrameError) -> Option<Result<Vec<u8>, FrameError>> {
        self.done = true;
        Some(Err(error))
    }
}

impl<S: ByteSource> Iterator for Frames<S> {
    type Item = Result<Vec<u8>, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = self.scanner.next_token();
        let expected = match token.kind() {
            TokenKind::MsgLen => parse_msg_len(token.payload()),
            TokenKind::EndOfStream => {
                // A payload-carrying end of stream cannot appear at a
                // message boundary; this is the clean end.
                self.done = true;
                return None;
            }
            _ => return self.fail(FrameError::UnexpectedByte(first_byte(token.payload()))),
        };

        let separator = self.scanner.next_token();
        match separator.kind() {
            TokenKind::Whitespace => {}
            TokenKind::EndOfStream => return self.fail(FrameError::UnexpectedEof),
            _ => {
                return self.fail(FrameError::UnexpectedByte(first_byte(separator.payload())));
            }
        }

        let message = self.scanner.next_token();
        match message.kind() {
            TokenKind::SyslogMsg => Some(Ok(message.into_payload())),
            TokenKind::EndOfStream => self.fail(FrameError::Truncated {
                expected,
                partial: message.into_payload(),
            }),
            _ => self.fail(FrameError::UnexpectedByte(first_byte(message.payload()))),
        }
    }
}

impl<S: ByteSource> core::iter::FusedIterator for Frames<S> {}

fn first_byte(payload: &[u8]) -> u8 {
    payload.first().copied().unwrap_or_default()
}
