#![no_main]
use std::io::{self, Read};

use framemodem::{Scanner, Token, TokenKind};
use libfuzzer_sys::fuzz_target;

const HEADER: usize = 8; // fragmentation seed

/// Hands the same bytes out in pseudo-random fragments of one to eight
/// bytes so length fields and payloads straddle read boundaries.
struct FragmentingReader {
    data: Vec<u8>,
    pos: usize,
    state: u64,
}

impl Read for FragmentingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.data.len() || buf.is_empty() {
            return Ok(0);
        }
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let remaining = self.data.len() - self.pos;
        let n = (1 + (self.state >> 33) as usize % 8)
            .min(remaining)
            .min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn check_token_shape(tokens: &[Token], input_len: usize) {
    // Every call consumes at least one byte until the stream is exhausted,
    // and the iterator ends on exactly one end-of-stream token.
    assert!(tokens.len() <= input_len + 1);
    let (last, rest) = tokens.split_last().expect("at least end-of-stream");
    assert_eq!(last.kind(), TokenKind::EndOfStream);

    for token in rest {
        match token.kind() {
            TokenKind::MsgLen => {
                let digits = token.payload();
                assert!(!digits.is_empty());
                assert!(matches!(digits[0], b'1'..=b'9'));
                assert!(digits.iter().all(u8::is_ascii_digit));
            }
            TokenKind::Whitespace => assert_eq!(token.payload(), b" "),
            TokenKind::Illegal => assert_eq!(token.payload().len(), 1),
            TokenKind::SyslogMsg => {}
            TokenKind::EndOfStream => panic!("end of stream before the last token"),
        }
    }
}

fn scan(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let seed = u64::from_le_bytes(data[..HEADER].try_into().unwrap());
    let data = &data[HEADER..];

    let from_slice: Vec<Token> = Scanner::from_slice(data).tokens().collect();
    check_token_shape(&from_slice, data.len());

    // Fragmentation must be invisible: a chunked blocking reader yields the
    // same token sequence as the whole slice.
    let mut scanner = Scanner::from_reader(FragmentingReader {
        data: data.to_vec(),
        pos: 0,
        state: seed | 1,
    });
    let from_reader: Vec<Token> = scanner.tokens().collect();
    assert_eq!(from_slice, from_reader);

    // Exhaustion is idempotent.
    let token = scanner.next_token();
    assert_eq!(token.kind(), TokenKind::EndOfStream);
    assert!(token.payload().is_empty());
}

fuzz_target!(|data: &[u8]| scan(data));
