use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

use crate::{
    error::{Error, Result},
    resp::frame::RESPFrame,
    types::{ScanResult, ScoreMember},
};

use super::{array, parse_float, unexpected, Bulk, Shape};

/// Array whose elements all follow the inner shape, in wire order.
#[derive(Debug, Clone, Copy)]
pub struct List<S>(pub S);

impl<S: Shape> Shape for List<S> {
    type Output = Vec<S::Output>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        array("array", frame)?
            .into_iter()
            .map(|item| self.0.map(item))
            .collect()
    }
}

/// Array read as an unordered set of the inner shape.
#[derive(Debug, Clone, Copy)]
pub struct Set<S>(pub S);

impl<S> Shape for Set<S>
where
    S: Shape,
    S::Output: Eq + Hash,
{
    type Output = HashSet<S::Output>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        array("array", frame)?
            .into_iter()
            .map(|item| self.0.map(item))
            .collect()
    }
}

/// Exactly two elements (`BLPOP`'s key and value).
#[derive(Debug, Clone, Copy)]
pub struct Pair<A, B>(pub A, pub B);

impl<A: Shape, B: Shape> Shape for Pair<A, B> {
    type Output = (A::Output, B::Output);

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        let items = array("two element array", frame)?;
        let [first, second] = <[RESPFrame; 2]>::try_from(items)
            .map_err(|items| Error::shape("two element array", format!("array of {}", items.len())))?;

        Ok((self.0.map(first)?, self.1.map(second)?))
    }
}

/// Flat array of alternating keys and values, wire order kept.
#[derive(Debug, Clone, Copy)]
pub struct Pairs<K, V>(pub K, pub V);

impl<K: Shape, V: Shape> Shape for Pairs<K, V> {
    type Output = Vec<(K::Output, V::Output)>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        let items = array("flat key/value array", frame)?;
        if items.len() % 2 != 0 {
            return Err(Error::shape(
                "even length key/value array",
                format!("array of {}", items.len()),
            ));
        }

        let mut pairs = Vec::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            pairs.push((self.0.map(key)?, self.1.map(value)?));
        }
        Ok(pairs)
    }
}

/// Flat key/value array collected into a map; a repeated key keeps its last value.
#[derive(Debug, Clone, Copy)]
pub struct Map<K, V>(pub K, pub V);

impl<K, V> Shape for Map<K, V>
where
    K: Shape + Copy,
    V: Shape + Copy,
    K::Output: Eq + Hash,
{
    type Output = HashMap<K::Output, V::Output>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        Ok(Pairs(self.0, self.1).map(frame)?.into_iter().collect())
    }
}

/// Flat `member, score, member, score…` array as returned with `WITHSCORES`.
#[derive(Debug, Clone, Copy)]
pub struct ScoreMembers;

impl Shape for ScoreMembers {
    type Output = Vec<ScoreMember>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        Pairs(Bulk, Bulk)
            .map(frame)?
            .into_iter()
            .map(|(member, score)| Ok(ScoreMember { score: parse_float(&score)?, member }))
            .collect()
    }
}

/// `[cursor, elements]` scan page; the elements follow the inner shape.
#[derive(Debug, Clone, Copy)]
pub struct Page<S>(pub S);

impl<S, T> Shape for Page<S>
where
    S: Shape<Output = Vec<T>>,
{
    type Output = ScanResult<T>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        let items = array("scan page", frame)?;
        let [cursor, elements] = <[RESPFrame; 2]>::try_from(items)
            .map_err(|items| Error::shape("[cursor, elements]", format!("array of {}", items.len())))?;

        let cursor = match cursor {
            RESPFrame::Bulk(data) => String::from_utf8(data.to_vec())
                .map_err(|_| Error::shape("scan cursor", "non utf-8 cursor"))?,
            other => return Err(unexpected("scan cursor", &other)),
        };

        Ok(ScanResult { cursor, items: self.0.map(elements)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::{Float, Nullable};
    use bytes::Bytes;

    fn bulks(items: &[&'static str]) -> RESPFrame {
        RESPFrame::Array(items.iter().map(|item| RESPFrame::bulk(*item)).collect())
    }

    #[test]
    fn list_preserves_positional_nulls_only_when_nullable() {
        let reply = RESPFrame::Array(vec![RESPFrame::bulk("a"), RESPFrame::Null, RESPFrame::bulk("c")]);

        assert_eq!(
            vec![Some(Bytes::from("a")), None, Some(Bytes::from("c"))],
            List(Nullable(Bulk)).map(reply.clone()).unwrap()
        );
        assert!(matches!(List(Bulk).map(reply), Err(Error::DecodeShape { .. })));
    }

    #[test]
    fn list_rejects_null_array() {
        assert!(matches!(List(Bulk).map(RESPFrame::NullArray), Err(Error::DecodeShape { .. })));
        assert_eq!(None, Nullable(List(Bulk)).map(RESPFrame::NullArray).unwrap());
    }

    #[test]
    fn set_collects_members() {
        let members = Set(Bulk).map(bulks(&["a", "b", "a"])).unwrap();

        assert_eq!(2, members.len());
        assert!(members.contains(&Bytes::from("b")));
    }

    #[test]
    fn map_keeps_last_duplicate_field() {
        let fields = Map(Bulk, Bulk).map(bulks(&["f", "1", "g", "2", "f", "3"])).unwrap();

        assert_eq!(2, fields.len());
        assert_eq!(Some(&Bytes::from("3")), fields.get(&Bytes::from("f")));
    }

    #[test]
    fn pairs_reject_odd_arrays() {
        assert!(matches!(
            Pairs(Bulk, Bulk).map(bulks(&["f", "1", "g"])),
            Err(Error::DecodeShape { .. })
        ));
    }

    #[test]
    fn score_members_keep_wire_order() {
        let reply = bulks(&["high", "9.5", "low", "-1", "inf", "inf"]);

        assert_eq!(
            vec![
                ScoreMember::new("high", 9.5),
                ScoreMember::new("low", -1.0),
                ScoreMember::new("inf", f64::INFINITY),
            ],
            ScoreMembers.map(reply).unwrap()
        );
    }

    #[test]
    fn score_members_reject_bad_score() {
        assert!(matches!(
            ScoreMembers.map(bulks(&["m", "one"])),
            Err(Error::DecodeShape { .. })
        ));
    }

    #[test]
    fn page_maps_cursor_and_inner_shape() {
        let reply = RESPFrame::Array(vec![RESPFrame::bulk("42"), bulks(&["m", "1.5"])]);

        let page = Page(ScoreMembers).map(reply).unwrap();
        assert_eq!("42", page.cursor);
        assert!(!page.is_complete());
        assert_eq!(vec![ScoreMember::new("m", 1.5)], page.items);
    }

    #[test]
    fn page_rejects_wrong_arity() {
        let reply = RESPFrame::Array(vec![RESPFrame::bulk("0")]);
        assert!(matches!(Page(List(Bulk)).map(reply), Err(Error::DecodeShape { .. })));
    }

    #[test]
    fn pair_requires_two_elements() {
        assert_eq!(
            (Bytes::from("k"), 2.0),
            Pair(Bulk, Float).map(bulks(&["k", "2"])).unwrap()
        );
        assert!(matches!(Pair(Bulk, Bulk).map(bulks(&["k"])), Err(Error::DecodeShape { .. })));
    }
}
