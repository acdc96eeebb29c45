use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    error::{Error, Result},
    resp::command::{Command, ToArg},
};

/// One end of a score range (`ZRANGEBYSCORE`, `ZCOUNT`, …).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreBound {
    /// `5`
    Inclusive(f64),
    /// `(5`
    Exclusive(f64),
    /// `-inf`
    NegInfinity,
    /// `+inf`
    PosInfinity,
}

impl ToArg for ScoreBound {
    fn to_arg(&self) -> Bytes {
        match self {
            ScoreBound::Inclusive(score) => score.to_arg(),
            ScoreBound::Exclusive(score) => Bytes::from(format!("({}", score)),
            ScoreBound::NegInfinity => Bytes::from_static(b"-inf"),
            ScoreBound::PosInfinity => Bytes::from_static(b"+inf"),
        }
    }
}

/// Anything that can stand for a score bound: a number, a [`ScoreBound`], or
/// the textual forms `"1.5"`, `"(1.5"`, `"-inf"`, `"+inf"`.
pub trait IntoScoreBound {
    fn into_score_bound(self, command: &'static str) -> Result<ScoreBound>;
}

impl IntoScoreBound for ScoreBound {
    fn into_score_bound(self, command: &'static str) -> Result<ScoreBound> {
        match self {
            ScoreBound::Inclusive(score) | ScoreBound::Exclusive(score) => {
                check_score(command, score)?;
            }
            ScoreBound::NegInfinity | ScoreBound::PosInfinity => {}
        }
        Ok(self)
    }
}

impl IntoScoreBound for f64 {
    fn into_score_bound(self, command: &'static str) -> Result<ScoreBound> {
        ScoreBound::Inclusive(self).into_score_bound(command)
    }
}

impl IntoScoreBound for i64 {
    fn into_score_bound(self, _command: &'static str) -> Result<ScoreBound> {
        Ok(ScoreBound::Inclusive(self as f64))
    }
}

impl IntoScoreBound for &str {
    fn into_score_bound(self, command: &'static str) -> Result<ScoreBound> {
        let invalid = || Error::argument(command, format!("invalid score bound {:?}", self));
        let parse = |text: &str| text.parse::<f64>().map_err(|_| invalid());

        let bound = match self {
            "-inf" => ScoreBound::NegInfinity,
            "+inf" | "inf" => ScoreBound::PosInfinity,
            _ => match self.strip_prefix('(') {
                Some(score) => ScoreBound::Exclusive(parse(score)?),
                None => ScoreBound::Inclusive(parse(self)?),
            },
        };
        bound.into_score_bound(command)
    }
}

impl IntoScoreBound for String {
    fn into_score_bound(self, command: &'static str) -> Result<ScoreBound> {
        self.as_str().into_score_bound(command)
    }
}

/// One end of a lexicographic member range (`ZRANGEBYLEX`, `ZLEXCOUNT`, …).
#[derive(Debug, Clone, PartialEq)]
pub enum LexBound {
    /// `[member`
    Inclusive(Bytes),
    /// `(member`
    Exclusive(Bytes),
    /// `-`
    Min,
    /// `+`
    Max,
}

impl LexBound {
    /**
     * Reads the wire form. Anything other than `-`, `+` or a `[`/`(` prefixed
     * member is rejected rather than guessed at.
     */
    pub fn parse(command: &'static str, bound: &[u8]) -> Result<Self> {
        match bound {
            b"-" => Ok(LexBound::Min),
            b"+" => Ok(LexBound::Max),
            [b'[', member @ ..] => Ok(LexBound::Inclusive(Bytes::copy_from_slice(member))),
            [b'(', member @ ..] => Ok(LexBound::Exclusive(Bytes::copy_from_slice(member))),
            _ => Err(Error::argument(
                command,
                format!(
                    "lex bound {:?} must start with '[' or '(' or be '-' or '+'",
                    String::from_utf8_lossy(bound)
                ),
            )),
        }
    }
}

impl ToArg for LexBound {
    fn to_arg(&self) -> Bytes {
        let prefixed = |prefix: u8, member: &Bytes| {
            let mut token = BytesMut::with_capacity(member.len() + 1);
            token.put_u8(prefix);
            token.put_slice(member);
            token.freeze()
        };

        match self {
            LexBound::Inclusive(member) => prefixed(b'[', member),
            LexBound::Exclusive(member) => prefixed(b'(', member),
            LexBound::Min => Bytes::from_static(b"-"),
            LexBound::Max => Bytes::from_static(b"+"),
        }
    }
}

/// A [`LexBound`] or its wire form as text/bytes.
pub trait IntoLexBound {
    fn into_lex_bound(self, command: &'static str) -> Result<LexBound>;
}

impl IntoLexBound for LexBound {
    fn into_lex_bound(self, _command: &'static str) -> Result<LexBound> {
        Ok(self)
    }
}

impl IntoLexBound for &str {
    fn into_lex_bound(self, command: &'static str) -> Result<LexBound> {
        LexBound::parse(command, self.as_bytes())
    }
}

impl IntoLexBound for String {
    fn into_lex_bound(self, command: &'static str) -> Result<LexBound> {
        LexBound::parse(command, self.as_bytes())
    }
}

impl IntoLexBound for &[u8] {
    fn into_lex_bound(self, command: &'static str) -> Result<LexBound> {
        LexBound::parse(command, self)
    }
}

impl IntoLexBound for Bytes {
    fn into_lex_bound(self, command: &'static str) -> Result<LexBound> {
        LexBound::parse(command, &self)
    }
}

/// `LIMIT offset count` pagination for range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: i64,
    /// A negative count returns everything from `offset` on.
    pub count: i64,
}

impl Limit {
    pub const fn new(offset: i64, count: i64) -> Self {
        Self { offset, count }
    }

    pub(crate) fn append_to(limit: Option<Limit>, command: &mut Command) {
        if let Some(Limit { offset, count }) = limit {
            command.push("LIMIT");
            command.push(offset);
            command.push(count);
        }
    }
}

pub(crate) fn check_score(command: &'static str, score: f64) -> Result<()> {
    if score.is_nan() {
        return Err(Error::argument(command, "score is NaN"));
    }
    Ok(())
}
