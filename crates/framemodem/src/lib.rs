//! A streaming scanner for RFC 5425 octet-counted syslog transport framing.
//!
//! Octet counting frames each syslog message on a connection as
//! `MSGLEN SP CONTENT`: a decimal length with no leading zero, a single
//! ASCII space, and then exactly `MSGLEN` raw octets of message content.
//! [`Scanner`] turns any byte source into a sequence of typed [`Token`]s
//! (`MSGLEN`, the separator, the raw payload, end-of-stream, illegal byte)
//! without buffering whole messages up front and without knowing message
//! boundaries except through the length prefix itself.
//!
//! The scanner only extracts framing: payloads are opaque byte vectors, and
//! feeding them to an RFC 5424 content parser is the consumer's business.
//! Malformed input never aborts the stream: garbled lengths and stray bytes
//! surface as [`TokenKind::Illegal`] tokens for the caller to act on.
//!
//! # Examples
//!
//! ```rust
//! use framemodem::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::from_slice(b"5 hello5 world");
//! let tokens: Vec<_> = scanner.tokens().collect();
//!
//! assert_eq!(tokens.len(), 7); // two (len, sep, msg) triples + end of stream
//! assert_eq!(tokens[2].kind(), TokenKind::SyslogMsg);
//! assert_eq!(tokens[2].payload(), b"hello");
//! ```
//!
//! Whole messages, via the sequencing iterator:
//!
//! ```rust
//! use framemodem::Scanner;
//!
//! let frames: Vec<_> = Scanner::from_slice(b"3 foo3 bar")
//!     .into_frames()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(frames, [b"foo".to_vec(), b"bar".to_vec()]);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod classify;
mod frames;
mod scanner;
mod source;
mod token;

#[cfg(test)]
mod tests;

pub use frames::{FrameError, Frames};
pub use scanner::{Scanner, Tokens};
#[cfg(feature = "std")]
pub use source::ReadSource;
pub use source::{ByteSource, SliceSource};
pub use token::{Token, TokenKind};
