use bytes::{BufMut, Bytes, BytesMut};

pub const CRLF: &[u8] = b"\r\n";

/**
 * A single line-level element of the wire format.
 * Arrays are flattened to their header; children follow as further tokens.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum RESPToken {
    SimpleString(String),       // "+<STRING>\r\n"
    Error(String),              // "-<STRING>\r\n"
    Integer(i64),               // ":<INT>\r\n"
    BulkString(Bytes),          // "$<SIZE>\r\n<BYTES>\r\n"
    Null,                       // "$-1\r\n"
    ArraySize(usize),           // "*<SIZE>\r\n"
    NullArray,                  // "*-1\r\n"
}

impl RESPToken {
    /**
     * Appends the token's wire bytes. Bulk payloads are length prefixed and copied as-is.
     */
    pub fn write_to(&self, buf: &mut BytesMut) {
        match self {
            RESPToken::SimpleString(s) => Self::write_line(buf, b'+', s.as_bytes()),
            RESPToken::Error(s) => Self::write_line(buf, b'-', s.as_bytes()),
            RESPToken::Integer(n) => Self::write_line(buf, b':', n.to_string().as_bytes()),
            RESPToken::BulkString(data) => {
                Self::write_line(buf, b'$', data.len().to_string().as_bytes());
                buf.reserve(data.len() + CRLF.len());
                buf.put_slice(data);
                buf.put_slice(CRLF);
            }
            RESPToken::Null => buf.put_slice(b"$-1\r\n"),
            RESPToken::ArraySize(size) => Self::write_line(buf, b'*', size.to_string().as_bytes()),
            RESPToken::NullArray => buf.put_slice(b"*-1\r\n"),
        }
    }

    fn write_line(buf: &mut BytesMut, tag: u8, body: &[u8]) {
        buf.reserve(1 + body.len() + CRLF.len());
        buf.put_u8(tag);
        buf.put_slice(body);
        buf.put_slice(CRLF);
    }
}

#[cfg(test)]
mod tests {
    use super::RESPToken;
    use bytes::{Bytes, BytesMut};
    use rstest::rstest;

    fn serialise(token: RESPToken) -> Vec<u8> {
        let mut buf = BytesMut::new();
        token.write_to(&mut buf);
        buf.to_vec()
    }

    #[rstest]
    #[case("PONG", "+PONG\r\n")]
    #[case("", "+\r\n")]
    #[case(" ", "+ \r\n")]
    #[case("Hello world", "+Hello world\r\n")]
    fn should_serialise_simple_string(#[case] simple: String, #[case] expected: &str) {
        assert_eq!(expected.as_bytes(), serialise(RESPToken::SimpleString(simple)))
    }

    #[rstest]
    #[case("ERR", "-ERR\r\n")]
    #[case("WRONGTYPE Operation against a key", "-WRONGTYPE Operation against a key\r\n")]
    #[case("", "-\r\n")]
    fn should_serialise_error(#[case] error: String, #[case] expected: &str) {
        assert_eq!(expected.as_bytes(), serialise(RESPToken::Error(error)))
    }

    #[rstest]
    #[case(0, ":0\r\n")]
    #[case(-10, ":-10\r\n")]
    #[case(23, ":23\r\n")]
    fn should_serialise_int(#[case] int: i64, #[case] expected: &str) {
        assert_eq!(expected.as_bytes(), serialise(RESPToken::Integer(int)))
    }

    #[rstest]
    #[case(&b""[..], &b"$0\r\n\r\n"[..])]
    #[case(&b"GET"[..], &b"$3\r\nGET\r\n"[..])]
    #[case(&b"a\r\nb"[..], &b"$4\r\na\r\nb\r\n"[..])]
    #[case(&[0u8, 255][..], &b"$2\r\n\x00\xff\r\n"[..])]
    fn should_serialise_bulk_string_binary_safe(#[case] data: &[u8], #[case] expected: &[u8]) {
        assert_eq!(
            expected,
            serialise(RESPToken::BulkString(Bytes::copy_from_slice(data)))
        )
    }

    #[test]
    fn should_serialise_nulls() {
        assert_eq!(b"$-1\r\n".to_vec(), serialise(RESPToken::Null));
        assert_eq!(b"*-1\r\n".to_vec(), serialise(RESPToken::NullArray));
    }

    #[rstest]
    #[case(0, "*0\r\n")]
    #[case(1, "*1\r\n")]
    #[case(5, "*5\r\n")]
    fn should_serialise_array(#[case] size: usize, #[case] expected: &str) {
        assert_eq!(expected.as_bytes(), serialise(RESPToken::ArraySize(size)))
    }
}
