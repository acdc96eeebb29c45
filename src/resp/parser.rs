use std::io;

use bytes::Bytes;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tracing::trace;

use super::{
    frame::RESPFrame,
    token::{RESPToken, CRLF},
};

/// Largest bulk payload the store will ever send (proto-max-bulk-len)
pub const MAX_BULK_LEN: i64 = 512 * 1024 * 1024;

/// Longest header or simple line accepted before giving up on finding its LF
pub const MAX_LINE_LEN: u64 = 64 * 1024;

const MAX_PREALLOCATED_CHILDREN: usize = 1024;
const BULK_CHUNK: usize = 64 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum RESPParserError {
    #[error("bad integer {0:?}")]
    BadIntParse(String),
    #[error("read failed: {0}")]
    BadRead(#[from] io::Error),
    #[error("invalid token tag {0:#04x}")]
    InvalidToken(u8),
    #[error("line not terminated by CRLF")]
    MissingTerminator,
    #[error("bulk string of {0} bytes not followed by CRLF")]
    LengthMismatch(usize),
    #[error("invalid length {0}")]
    InvalidLength(i64),
    #[error("line longer than {0} bytes")]
    LineTooLong(u64),
    #[error("stream ended inside a frame")]
    Truncated,
    #[error("stream ended before a reply")]
    EndOfStream,
}

pub struct RESPParser;

impl RESPParser {
    /**
     * Reads exactly one complete frame (nested arrays included) and leaves the
     * reader positioned at the first byte of the next frame.
     */
    pub async fn parse<R: AsyncBufRead + Unpin>(
        reader: &mut R
    ) -> Result<RESPFrame, RESPParserError> {
        // Arrays still waiting for children: (children left, children so far)
        let mut open_arrays: Vec<(usize, Vec<RESPFrame>)> = vec![];
        let mut line = Vec::new();

        loop {
            let at_frame_start = open_arrays.is_empty();
            let token = RESPParser::read_token(reader, &mut line, at_frame_start).await?;

            let mut frame = match token {
                RESPToken::ArraySize(size) if size > 0 => {
                    open_arrays.push((size, Vec::with_capacity(size.min(MAX_PREALLOCATED_CHILDREN))));
                    continue;
                }
                token => RESPFrame::from(token),
            };

            // Fold completed frames into their parents
            loop {
                match open_arrays.pop() {
                    None => return Ok(frame),
                    Some((remaining, mut children)) => {
                        children.push(frame);
                        if remaining > 1 {
                            open_arrays.push((remaining - 1, children));
                            break;
                        }
                        frame = RESPFrame::Array(children);
                    }
                }
            }
        }
    }

    async fn read_token<R: AsyncBufRead + Unpin>(
        reader: &mut R,
        line: &mut Vec<u8>,
        at_frame_start: bool,
    ) -> Result<RESPToken, RESPParserError> {
        RESPParser::read_line(reader, line, at_frame_start).await?;

        let (&tag, body) = line.split_first().ok_or(RESPParserError::InvalidToken(b'\r'))?;
        let token = match tag {
            b'+' => RESPToken::SimpleString(String::from_utf8_lossy(body).into_owned()),
            b'-' => RESPToken::Error(String::from_utf8_lossy(body).into_owned()),
            b':' => RESPToken::Integer(RESPParser::parse_int(body)?),
            b'$' => match RESPParser::parse_int(body)? {
                -1 => RESPToken::Null,
                size if (0..=MAX_BULK_LEN).contains(&size) => {
                    RESPToken::BulkString(RESPParser::read_bulk(reader, size as usize).await?)
                }
                size => return Err(RESPParserError::InvalidLength(size)),
            },
            b'*' => match RESPParser::parse_int(body)? {
                -1 => RESPToken::NullArray,
                size if size >= 0 => RESPToken::ArraySize(size as usize),
                size => return Err(RESPParserError::InvalidLength(size)),
            },
            other => return Err(RESPParserError::InvalidToken(other)),
        };

        trace!(?token, "read token");
        Ok(token)
    }

    /**
     * Reads one CRLF terminated line, leaving it in `line` without the terminator
     */
    async fn read_line<R: AsyncBufRead + Unpin>(
        reader: &mut R,
        line: &mut Vec<u8>,
        at_frame_start: bool,
    ) -> Result<(), RESPParserError> {
        line.clear();
        let read = (&mut *reader).take(MAX_LINE_LEN).read_until(b'\n', line).await?;

        if read == 0 {
            return Err(if at_frame_start {
                RESPParserError::EndOfStream
            } else {
                RESPParserError::Truncated
            });
        }
        if !line.ends_with(b"\n") {
            return Err(if read as u64 == MAX_LINE_LEN {
                RESPParserError::LineTooLong(MAX_LINE_LEN)
            } else {
                RESPParserError::Truncated
            });
        }
        if !line.ends_with(CRLF) {
            return Err(RESPParserError::MissingTerminator);
        }

        line.truncate(line.len() - CRLF.len());
        Ok(())
    }

    async fn read_bulk<R: AsyncBufRead + Unpin>(
        reader: &mut R,
        size: usize,
    ) -> Result<Bytes, RESPParserError> {
        let expected = size + CRLF.len();
        // Grows with the payload actually received, not the declared length
        let mut data = Vec::with_capacity(expected.min(BULK_CHUNK));
        (&mut *reader).take(expected as u64).read_to_end(&mut data).await?;

        if data.len() < expected {
            return Err(RESPParserError::Truncated);
        }
        if !data.ends_with(CRLF) {
            return Err(RESPParserError::LengthMismatch(size));
        }
        data.truncate(size);
        Ok(Bytes::from(data))
    }

    fn parse_int(digits: &[u8]) -> Result<i64, RESPParserError> {
        std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| RESPParserError::BadIntParse(String::from_utf8_lossy(digits).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::{RESPParser, RESPParserError};
    use crate::resp::frame::RESPFrame;
    use rstest::rstest;

    fn parse_all(mut input: &[u8]) -> (Result<RESPFrame, RESPParserError>, Vec<u8>) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = runtime.block_on(RESPParser::parse(&mut input));
        (result, input.to_vec())
    }

    fn parse(input: &[u8]) -> Result<RESPFrame, RESPParserError> {
        parse_all(input).0
    }

    #[rstest]
    #[case(RESPFrame::Simple("OK".to_owned()))]
    #[case(RESPFrame::Error("ERR unknown command".to_owned()))]
    #[case(RESPFrame::Integer(-42))]
    #[case(RESPFrame::Integer(i64::MAX))]
    #[case(RESPFrame::bulk("hello"))]
    #[case(RESPFrame::bulk(""))]
    #[case(RESPFrame::bulk(&b"line\r\nbreak\x00"[..]))]
    #[case(RESPFrame::Null)]
    #[case(RESPFrame::Array(vec![]))]
    #[case(RESPFrame::NullArray)]
    #[case(RESPFrame::Array(vec![RESPFrame::bulk("a"), RESPFrame::Integer(1), RESPFrame::Null]))]
    #[case(RESPFrame::Array(vec![
        RESPFrame::Array(vec![
            RESPFrame::bulk("1526919030474-55"),
            RESPFrame::Array(vec![RESPFrame::bulk("f"), RESPFrame::bulk("v")]),
        ]),
        RESPFrame::Array(vec![]),
        RESPFrame::NullArray,
        RESPFrame::Array(vec![RESPFrame::Array(vec![RESPFrame::Simple("deep".to_owned())])]),
    ]))]
    fn should_round_trip_every_reply_kind(#[case] frame: RESPFrame) {
        assert_eq!(frame, parse(&frame.to_bytes()).unwrap())
    }

    #[test]
    fn should_consume_exactly_one_frame() {
        let (frame, rest) = parse_all(b"*2\r\n$1\r\na\r\n:5\r\n+NEXT\r\n");

        assert_eq!(
            RESPFrame::Array(vec![RESPFrame::bulk("a"), RESPFrame::Integer(5)]),
            frame.unwrap()
        );
        assert_eq!(b"+NEXT\r\n".to_vec(), rest);
    }

    #[rstest]
    #[case(&b"!oops\r\n"[..])]
    #[case(&b"\r\n"[..])]
    fn should_reject_unknown_tag(#[case] input: &[u8]) {
        assert!(matches!(parse(input), Err(RESPParserError::InvalidToken(_))))
    }

    #[rstest]
    #[case(&b":12a\r\n"[..])]
    #[case(&b"$x\r\n"[..])]
    #[case(&b"*\r\n"[..])]
    fn should_reject_bad_lengths_and_integers(#[case] input: &[u8]) {
        assert!(matches!(parse(input), Err(RESPParserError::BadIntParse(_))))
    }

    #[rstest]
    #[case(&b"$-2\r\n"[..])]
    #[case(&b"*-5\r\n"[..])]
    #[case(&b"$999999999999\r\n"[..])]
    fn should_reject_out_of_range_lengths(#[case] input: &[u8]) {
        assert!(matches!(parse(input), Err(RESPParserError::InvalidLength(_))))
    }

    #[test]
    fn should_reject_bulk_longer_than_declared() {
        assert!(matches!(
            parse(b"$2\r\nabc\r\n"),
            Err(RESPParserError::LengthMismatch(2))
        ))
    }

    #[test]
    fn should_reject_bare_line_feed() {
        assert!(matches!(parse(b"+OK\n"), Err(RESPParserError::MissingTerminator)))
    }

    #[rstest]
    #[case(&b"$5\r\nab"[..])]
    #[case(&b"*3\r\n:1\r\n"[..])]
    #[case(&b"+OK"[..])]
    fn should_report_truncated_frames(#[case] input: &[u8]) {
        assert!(matches!(parse(input), Err(RESPParserError::Truncated)))
    }

    #[test]
    fn should_stop_reading_unterminated_long_lines() {
        let mut input = b"+".to_vec();
        input.resize(super::MAX_LINE_LEN as usize * 2, b'a');

        assert!(matches!(parse(&input), Err(RESPParserError::LineTooLong(_))))
    }

    #[test]
    fn should_not_trust_declared_bulk_length() {
        // Declares the largest allowed payload but sends two bytes
        assert!(matches!(parse(b"$536870912\r\nab"), Err(RESPParserError::Truncated)))
    }

    #[test]
    fn should_read_bulk_larger_than_one_chunk() {
        let payload = vec![b'x'; 200 * 1024];
        let frame = RESPFrame::bulk(payload.clone());

        assert_eq!(frame, parse(&frame.to_bytes()).unwrap())
    }

    #[test]
    fn should_report_end_of_stream_between_frames() {
        assert!(matches!(parse(b""), Err(RESPParserError::EndOfStream)))
    }
}
