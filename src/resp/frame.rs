use bytes::{Bytes, BytesMut};

use super::token::RESPToken;

/**
 * One complete decoded reply. Arrays nest arbitrarily.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum RESPFrame {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Bytes),
    Null,
    Array(Vec<RESPFrame>),
    NullArray,
}

impl RESPFrame {
    pub fn bulk(data: impl Into<Bytes>) -> Self {
        RESPFrame::Bulk(data.into())
    }

    /**
     * Short name of the frame's kind, used in shape errors
     */
    pub fn kind(&self) -> &'static str {
        match self {
            RESPFrame::Simple(_) => "simple string",
            RESPFrame::Error(_) => "error",
            RESPFrame::Integer(_) => "integer",
            RESPFrame::Bulk(_) => "bulk string",
            RESPFrame::Null => "null",
            RESPFrame::Array(_) => "array",
            RESPFrame::NullArray => "null array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RESPFrame::Null | RESPFrame::NullArray)
    }

    /**
     * Serialises the frame and all of its children
     */
    pub fn write_to(&self, buf: &mut BytesMut) {
        match self {
            RESPFrame::Array(children) => {
                RESPToken::ArraySize(children.len()).write_to(buf);
                for child in children {
                    child.write_to(buf)
                }
            }
            RESPFrame::Simple(s) => RESPToken::SimpleString(s.to_owned()).write_to(buf),
            RESPFrame::Error(s) => RESPToken::Error(s.to_owned()).write_to(buf),
            RESPFrame::Integer(n) => RESPToken::Integer(*n).write_to(buf),
            RESPFrame::Bulk(data) => RESPToken::BulkString(data.clone()).write_to(buf),
            RESPFrame::Null => RESPToken::Null.write_to(buf),
            RESPFrame::NullArray => RESPToken::NullArray.write_to(buf),
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write_to(&mut buf);
        buf.freeze()
    }
}

impl From<RESPToken> for RESPFrame {
    /**
     * Scalar tokens only; array headers are assembled by the parser
     */
    fn from(token: RESPToken) -> RESPFrame {
        match token {
            RESPToken::SimpleString(s) => RESPFrame::Simple(s),
            RESPToken::Error(s) => RESPFrame::Error(s),
            RESPToken::Integer(i) => RESPFrame::Integer(i),
            RESPToken::BulkString(s) => RESPFrame::Bulk(s),
            RESPToken::Null => RESPFrame::Null,
            RESPToken::NullArray => RESPFrame::NullArray,
            RESPToken::ArraySize(_) => RESPFrame::Array(Vec::new()),
        }
    }
}
