//! Reply shapes: how a decoded [`RESPFrame`] turns into a command's result.
//!
//! Every shape is a small value describing what the reply must look like.
//! Shapes compose, so a scan page of score/member pairs is
//! `Page(ScoreMembers)` and a batch lookup with positional nulls is
//! `List(Nullable(Bulk))`. A frame that doesn't fit fails with
//! [`Error::DecodeShape`]; nothing is defaulted.

mod collection;
mod geo;
mod stream;

pub use collection::{List, Map, Page, Pair, Pairs, ScoreMembers, Set};
pub use geo::{Coordinate, GeoResults};
pub use stream::{Consumers, Entries, EntryId, Groups, Info, PendingEntries};

use bytes::Bytes;

use crate::{
    error::{Error, Result},
    resp::frame::RESPFrame,
};

pub trait Shape {
    type Output;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output>;
}

/// Any status reply, content ignored (`+OK`).
#[derive(Debug, Clone, Copy)]
pub struct Unit;

impl Shape for Unit {
    type Output = ();

    fn map(&self, frame: RESPFrame) -> Result<()> {
        match frame {
            RESPFrame::Simple(_) => Ok(()),
            other => Err(unexpected("status", &other)),
        }
    }
}

/// Status reply text (`TYPE`, `PING`).
#[derive(Debug, Clone, Copy)]
pub struct Status;

impl Shape for Status {
    type Output = String;

    fn map(&self, frame: RESPFrame) -> Result<String> {
        match frame {
            RESPFrame::Simple(s) => Ok(s),
            other => Err(unexpected("status", &other)),
        }
    }
}

/// Status when a conditional write happened, null when it was skipped.
#[derive(Debug, Clone, Copy)]
pub struct Written;

impl Shape for Written {
    type Output = bool;

    fn map(&self, frame: RESPFrame) -> Result<bool> {
        match frame {
            RESPFrame::Simple(_) => Ok(true),
            RESPFrame::Null => Ok(false),
            other => Err(unexpected("status or null", &other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Int;

impl Shape for Int {
    type Output = i64;

    fn map(&self, frame: RESPFrame) -> Result<i64> {
        match frame {
            RESPFrame::Integer(n) => Ok(n),
            other => Err(unexpected("integer", &other)),
        }
    }
}

/// Integer reply restricted to 0 and 1.
#[derive(Debug, Clone, Copy)]
pub struct Flag;

impl Shape for Flag {
    type Output = bool;

    fn map(&self, frame: RESPFrame) -> Result<bool> {
        match frame {
            RESPFrame::Integer(0) => Ok(false),
            RESPFrame::Integer(1) => Ok(true),
            RESPFrame::Integer(n) => Err(Error::shape("integer 0 or 1", format!("integer {}", n))),
            other => Err(unexpected("integer 0 or 1", &other)),
        }
    }
}

/// Bulk string that must be present.
#[derive(Debug, Clone, Copy)]
pub struct Bulk;

impl Shape for Bulk {
    type Output = Bytes;

    fn map(&self, frame: RESPFrame) -> Result<Bytes> {
        match frame {
            RESPFrame::Bulk(data) => Ok(data),
            other => Err(unexpected("bulk string", &other)),
        }
    }
}

/// UTF-8 text carried as a bulk or status string.
#[derive(Debug, Clone, Copy)]
pub struct Text;

impl Shape for Text {
    type Output = String;

    fn map(&self, frame: RESPFrame) -> Result<String> {
        match frame {
            RESPFrame::Simple(s) => Ok(s),
            RESPFrame::Bulk(data) => String::from_utf8(data.to_vec())
                .map_err(|_| Error::shape("utf-8 text", "non utf-8 bulk string")),
            other => Err(unexpected("text", &other)),
        }
    }
}

/// Decimal float carried as a bulk string (`"3.5"`, `"inf"`, `"-inf"`).
#[derive(Debug, Clone, Copy)]
pub struct Float;

impl Shape for Float {
    type Output = f64;

    fn map(&self, frame: RESPFrame) -> Result<f64> {
        match frame {
            RESPFrame::Bulk(data) => parse_float(&data),
            other => Err(unexpected("float bulk string", &other)),
        }
    }
}

/// Null bulk or null array maps to `None`, anything else to the inner shape.
#[derive(Debug, Clone, Copy)]
pub struct Nullable<S>(pub S);

impl<S: Shape> Shape for Nullable<S> {
    type Output = Option<S::Output>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        if frame.is_null() {
            return Ok(None);
        }
        self.0.map(frame).map(Some)
    }
}

pub(crate) fn parse_float(data: &[u8]) -> Result<f64> {
    std::str::from_utf8(data)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|f| !f.is_nan())
        .ok_or_else(|| Error::shape("float", format!("{:?}", String::from_utf8_lossy(data))))
}

pub(crate) fn unexpected(expected: &'static str, frame: &RESPFrame) -> Error {
    Error::shape(expected, frame.kind())
}

pub(crate) fn array(expected: &'static str, frame: RESPFrame) -> Result<Vec<RESPFrame>> {
    match frame {
        RESPFrame::Array(items) => Ok(items),
        other => Err(unexpected(expected, &other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RESPFrame::Integer(0), false)]
    #[case(RESPFrame::Integer(1), true)]
    fn flag_maps_zero_and_one(#[case] frame: RESPFrame, #[case] expected: bool) {
        assert_eq!(expected, Flag.map(frame).unwrap())
    }

    #[rstest]
    #[case(RESPFrame::Integer(2))]
    #[case(RESPFrame::Integer(-1))]
    #[case(RESPFrame::bulk("1"))]
    fn flag_rejects_anything_else(#[case] frame: RESPFrame) {
        assert!(matches!(Flag.map(frame), Err(Error::DecodeShape { .. })))
    }

    #[test]
    fn absent_bulk_is_distinct_from_empty() {
        assert_eq!(None, Nullable(Bulk).map(RESPFrame::Null).unwrap());
        assert_eq!(Some(Bytes::new()), Nullable(Bulk).map(RESPFrame::bulk("")).unwrap());
        assert!(matches!(Bulk.map(RESPFrame::Null), Err(Error::DecodeShape { .. })));
    }

    #[rstest]
    #[case("3.0", 3.0)]
    #[case("-0.5", -0.5)]
    #[case("inf", f64::INFINITY)]
    #[case("-inf", f64::NEG_INFINITY)]
    #[case("1e3", 1000.0)]
    fn float_parses_decimal_bulk(#[case] text: &'static str, #[case] expected: f64) {
        assert_eq!(expected, Float.map(RESPFrame::bulk(text)).unwrap())
    }

    #[rstest]
    #[case(RESPFrame::bulk("abc"))]
    #[case(RESPFrame::bulk("nan"))]
    #[case(RESPFrame::Integer(3))]
    fn float_rejects_non_decimal(#[case] frame: RESPFrame) {
        assert!(matches!(Float.map(frame), Err(Error::DecodeShape { .. })))
    }

    #[test]
    fn written_distinguishes_skipped_write() {
        assert!(Written.map(RESPFrame::Simple("OK".to_owned())).unwrap());
        assert!(!Written.map(RESPFrame::Null).unwrap());
    }

    #[test]
    fn status_shapes_reject_bulk() {
        assert!(matches!(Unit.map(RESPFrame::bulk("OK")), Err(Error::DecodeShape { .. })));
        assert_eq!("string", Status.map(RESPFrame::Simple("string".to_owned())).unwrap());
    }
}
