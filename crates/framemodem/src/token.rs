//! Tokens produced by the framing scanner.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

/// The classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// A decimal message length field.
    MsgLen,
    /// The single separator byte between a length and its payload.
    Whitespace,
    /// A complete message payload of exactly the declared length.
    SyslogMsg,
    /// The source is exhausted. A non-empty payload means the stream ended
    /// partway through a declared message; the bytes collected so far are
    /// carried here and must not be treated as a complete message.
    EndOfStream,
    /// A byte that fits no other classification at the current position.
    Illegal,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::MsgLen => "MSGLEN",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::SyslogMsg => "SYSLOGMSG",
            TokenKind::EndOfStream => "END_OF_STREAM",
            TokenKind::Illegal => "ILLEGAL",
        })
    }
}

/// One classified, self-contained unit of the input stream.
///
/// A token owns the raw bytes it was built from: the ASCII digits for
/// [`TokenKind::MsgLen`], the separator byte for [`TokenKind::Whitespace`],
/// up to the declared length for [`TokenKind::SyslogMsg`], the offending
/// byte for [`TokenKind::Illegal`], and an empty (or partial, see
/// [`TokenKind::EndOfStream`]) buffer at end of stream. Tokens from
/// successive scans share no storage and are safe to hold indefinitely.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    kind: TokenKind,
    payload: Vec<u8>,
}

impl Token {
    /// Builds a token from a kind and the raw bytes it covers.
    #[must_use]
    pub fn new(kind: TokenKind, payload: Vec<u8>) -> Self {
        Self { kind, payload }
    }

    /// The token's classification.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw bytes this token was built from.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes the token and returns its payload buffer.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Returns `true` if this is the terminal [`TokenKind::EndOfStream`]
    /// token.
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        self.kind == TokenKind::EndOfStream
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("payload", &BStr::new(&self.payload))
            .finish()
    }
}
