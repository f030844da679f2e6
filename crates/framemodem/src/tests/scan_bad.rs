use alloc::vec::Vec;

use rstest::rstest;

use crate::{FrameError, Scanner};

#[rstest]
#[case::ends_inside_payload(b"5 abc".as_slice(), FrameError::Truncated { expected: 5, partial: b"abc".to_vec() })]
#[case::ends_at_separator(b"5 ", FrameError::Truncated { expected: 5, partial: Vec::new() })]
#[case::ends_after_length(b"5", FrameError::UnexpectedEof)]
#[case::leading_zero(b"05 hello", FrameError::UnexpectedByte(b'0'))]
#[case::stray_byte(b"!", FrameError::UnexpectedByte(b'!'))]
#[case::length_not_followed_by_separator(b"5x abcde", FrameError::UnexpectedByte(b'x'))]
#[case::unrepresentable_length(b"18446744073709551616 x", FrameError::UnexpectedByte(b'x'))]
fn first_framing_error(#[case] input: &[u8], #[case] expected: FrameError) {
    let error = Scanner::from_slice(input)
        .into_frames()
        .find_map(Result::err);
    assert_eq!(error, Some(expected));
}

#[test]
fn frames_fuses_after_the_first_error() {
    let mut frames = Scanner::from_slice(b"3 abc!4 good").into_frames();
    assert_eq!(frames.next(), Some(Ok(b"abc".to_vec())));
    assert_eq!(frames.next(), Some(Err(FrameError::UnexpectedByte(b'!'))));
    assert_eq!(frames.next(), None);
    assert_eq!(frames.next(), None);
}

#[test]
fn truncation_error_carries_the_partial_payload() {
    let mut frames = Scanner::from_slice(b"3 ok8 partial").into_frames();
    assert_eq!(frames.next(), Some(Ok(b"ok".to_vec())));
    assert_eq!(
        frames.next(),
        Some(Err(FrameError::Truncated {
            expected: 8,
            partial: b"partial".to_vec(),
        }))
    );
    assert_eq!(frames.next(), None);
}

#[test]
fn frame_errors_display() {
    use alloc::string::ToString;

    assert_eq!(
        FrameError::Truncated {
            expected: 8,
            partial: b"partial".to_vec(),
        }
        .to_string(),
        "stream ended after 7 of 8 declared payload bytes"
    );
    assert_eq!(
        FrameError::UnexpectedByte(b'!').to_string(),
        "unexpected byte 0x21 in framing"
    );
    assert_eq!(
        FrameError::UnexpectedEof.to_string(),
        "stream ended before the declared payload"
    );
}
