//! Typed results produced by the reply shapes.

use std::{cmp::Ordering, fmt, str::FromStr};

use bytes::Bytes;

use crate::error::Error;

/// Cursor that starts a scan and, when returned by the store, ends it.
pub const SCAN_START: &str = "0";

/// A sorted set member with its score.
///
/// Ordered by score, then member bytes, the way the store orders ties.
#[derive(Debug, Clone)]
pub struct ScoreMember {
    pub member: Bytes,
    pub score: f64,
}

impl ScoreMember {
    pub fn new(member: impl Into<Bytes>, score: f64) -> Self {
        Self { member: member.into(), score }
    }
}

impl PartialEq for ScoreMember {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoreMember {}

impl PartialOrd for ScoreMember {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoreMember {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.member.cmp(&other.member))
    }
}

/// One page of a cursor based scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult<T> {
    /// Cursor to pass to the next call of the same scan.
    pub cursor: String,
    pub items: Vec<T>,
}

impl<T> ScanResult<T> {
    /// True once the store hands back the start cursor: the iteration is over.
    pub fn is_complete(&self) -> bool {
        self.cursor == SCAN_START
    }
}

/// `<milliseconds>-<sequence>` identifier of a stream entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamEntryId {
    pub millis: u64,
    pub sequence: u64,
}

impl StreamEntryId {
    pub const fn new(millis: u64, sequence: u64) -> Self {
        Self { millis, sequence }
    }
}

impl fmt::Display for StreamEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.millis, self.sequence)
    }
}

impl FromStr for StreamEntryId {
    type Err = Error;

    /// Both parts must be plain decimal digits; nothing is truncated or defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::Protocol(format!("invalid stream entry id {:?}", s));
        let (millis, sequence) = s.split_once('-').ok_or_else(invalid)?;

        Ok(Self {
            millis: parse_decimal(millis).ok_or_else(invalid)?,
            sequence: parse_decimal(sequence).ok_or_else(invalid)?,
        })
    }
}

fn parse_decimal(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamEntry {
    pub id: StreamEntryId,
    pub fields: Vec<(Bytes, Bytes)>,
}

/// One row of the extended `XPENDING` form.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamPendingEntry {
    pub id: StreamEntryId,
    pub consumer: String,
    pub idle_millis: i64,
    pub delivered: i64,
}

/// `XINFO STREAM`
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub length: i64,
    pub radix_tree_keys: i64,
    pub radix_tree_nodes: i64,
    pub groups: i64,
    pub last_generated_id: StreamEntryId,
    pub first_entry: Option<StreamEntry>,
    pub last_entry: Option<StreamEntry>,
}

/// One element of `XINFO GROUPS`
#[derive(Debug, Clone, PartialEq)]
pub struct StreamGroupInfo {
    pub name: String,
    pub consumers: i64,
    pub pending: i64,
    pub last_delivered_id: StreamEntryId,
}

/// One element of `XINFO CONSUMERS`
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConsumerInfo {
    pub name: String,
    pub pending: i64,
    pub idle_millis: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoCoordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

/// One member matched by a radius query. Optional parts are only filled
/// when the matching `WITH*` flag was sent.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRadiusResult {
    pub member: Bytes,
    pub distance: Option<f64>,
    pub geohash: Option<i64>,
    pub coordinate: Option<GeoCoordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn should_parse_stream_entry_id() {
        assert_eq!(
            StreamEntryId::new(1526919030474, 55),
            "1526919030474-55".parse().unwrap()
        );
        assert_eq!("1526919030474-55", StreamEntryId::new(1526919030474, 55).to_string());
    }

    #[rstest]
    #[case("1526919030474-5x")]
    #[case("1526919030474-")]
    #[case("-55")]
    #[case("1526919030474")]
    #[case("1526919030474-+5")]
    #[case("1-2-3")]
    #[case("18446744073709551616-0")]
    fn should_reject_malformed_stream_entry_id(#[case] id: &str) {
        assert!(matches!(id.parse::<StreamEntryId>(), Err(Error::Protocol(_))))
    }

    #[test]
    fn should_order_score_members_by_score_then_member() {
        let mut members = vec![
            ScoreMember::new("b", 2.0),
            ScoreMember::new("c", 1.0),
            ScoreMember::new("a", 2.0),
        ];
        members.sort();

        assert_eq!(
            vec![
                ScoreMember::new("c", 1.0),
                ScoreMember::new("a", 2.0),
                ScoreMember::new("b", 2.0),
            ],
            members
        );
    }

    #[test]
    fn scan_is_complete_only_on_start_cursor() {
        let page = |cursor: &str| ScanResult::<()> { cursor: cursor.to_owned(), items: vec![] };

        assert!(!page("17").is_complete());
        assert!(!page("00").is_complete());
        assert!(page("0").is_complete());
    }
}
