//! Integration tests driving the scanner through `ReadSource` against
//! readers that fragment, get interrupted, or fail outright.

use std::io::{self, Read};

use framemodem::{ByteSource, ReadSource, Scanner, Token, TokenKind};

/// Hands out one byte per `read` call.
struct OneByteReader {
    data: Vec<u8>,
    pos: usize,
}

impl Read for OneByteReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(&byte) = self.data.get(self.pos) else {
            return Ok(0);
        };
        if buf.is_empty() {
            return Ok(0);
        }
        buf[0] = byte;
        self.pos += 1;
        Ok(1)
    }
}

/// Returns `Interrupted` before every successful read.
struct InterruptingReader {
    data: Vec<u8>,
    pos: usize,
    interrupt_next: bool,
}

impl Read for InterruptingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        }
        self.interrupt_next = true;
        let Some(&byte) = self.data.get(self.pos) else {
            return Ok(0);
        };
        if buf.is_empty() {
            return Ok(0);
        }
        buf[0] = byte;
        self.pos += 1;
        Ok(1)
    }
}

/// Delivers a prefix, then fails every read.
struct FailingReader {
    data: Vec<u8>,
    pos: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.data.len() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset"));
        }
        let n = (self.data.len() - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn expected_tokens(input: &[u8]) -> Vec<Token> {
    Scanner::from_slice(input).tokens().collect()
}

#[test]
fn one_byte_reads_scan_like_a_slice() {
    let input = b"5 hello12 abcdefghijkl2 42";
    let mut scanner = Scanner::from_reader(OneByteReader {
        data: input.to_vec(),
        pos: 0,
    });
    let tokens: Vec<Token> = scanner.tokens().collect();
    assert_eq!(tokens, expected_tokens(input));
}

#[test]
fn interrupted_reads_are_retried() {
    let input = b"5 hello";
    let mut scanner = Scanner::from_reader(InterruptingReader {
        data: input.to_vec(),
        pos: 0,
        interrupt_next: true,
    });
    let tokens: Vec<Token> = scanner.tokens().collect();
    assert_eq!(tokens, expected_tokens(input));
    assert!(scanner.source().last_error().is_none());
}

#[test]
fn io_fault_surfaces_as_end_of_stream_with_the_fault_retained() {
    let mut scanner = Scanner::from_reader(FailingReader {
        data: b"5 ab".to_vec(),
        pos: 0,
    });

    assert_eq!(scanner.next_token().kind(), TokenKind::MsgLen);
    assert_eq!(scanner.next_token().kind(), TokenKind::Whitespace);

    let truncated = scanner.next_token();
    assert_eq!(truncated.kind(), TokenKind::EndOfStream);
    assert_eq!(truncated.payload(), b"ab");

    let error = scanner.source().last_error().expect("fault retained");
    assert_eq!(error.kind(), io::ErrorKind::ConnectionReset);

    // The fault is sticky end-of-stream; the reader is not retried.
    assert_eq!(scanner.next_token().kind(), TokenKind::EndOfStream);
}

#[test]
fn take_error_clears_the_retained_fault() {
    let mut source = ReadSource::new(FailingReader {
        data: Vec::new(),
        pos: 0,
    });
    assert_eq!(source.next_byte(), None);
    assert!(source.take_error().is_some());
    assert!(source.take_error().is_none());
}

#[test]
fn tiny_buffer_capacity_still_scans_correctly() {
    let input = b"11 hello world3 foo";
    let mut scanner = Scanner::new(ReadSource::with_capacity(
        1,
        io::Cursor::new(input.to_vec()),
    ));
    let tokens: Vec<Token> = scanner.tokens().collect();
    assert_eq!(tokens, expected_tokens(input));
}
