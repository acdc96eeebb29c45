//! Typed command parameters and the tokens they turn into.
//!
//! Each option value documents its wire effect and only appends tokens for
//! what the caller actually set, so leaving an option out changes the shape
//! of the request instead of sending a default.

mod geo;
mod list;
mod range;
mod scan;
mod sorted_set;
mod stream;
mod string;

pub use geo::{GeoRadiusParams, GeoUnit};
pub use list::{LPosParams, ListPosition};
pub use range::{IntoLexBound, IntoScoreBound, LexBound, Limit, ScoreBound};
pub use scan::ScanParams;
pub use sorted_set::{ZAddCompareFlag, ZAddExistFlag, ZAddParams, ZIncrByParams};
pub use stream::{StreamId, StreamTrim, XClaimParams};
pub use string::{
    BitFieldOffset, BitFieldOp, BitFieldOverflow, BitFieldType, BitPosParams, SetCommandExistFlag,
    SetCommandTTLFlag, SetParams,
};

pub(crate) use range::check_score;

use std::{collections::HashSet, hash::Hash};

use bytes::Bytes;

use crate::{
    error::{Error, Result},
    resp::command::{Command, ToArg},
};

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    ASC,
    DESC,
}

impl ToArg for SortOrder {
    fn to_arg(&self) -> Bytes {
        Bytes::from_static(match self {
            SortOrder::ASC => b"ASC",
            SortOrder::DESC => b"DESC",
        })
    }
}

/**
 * SORT modifiers, sent as `BY`, `LIMIT`, `GET…`, `ASC|DESC`, `ALPHA`.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortParams {
    by: Option<Bytes>,
    limit: Option<Limit>,
    get: Vec<Bytes>,
    order: Option<SortOrder>,
    alpha: bool,
}

impl SortParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// `BY pattern`; `nosort` skips sorting entirely
    pub fn by(mut self, pattern: impl ToArg) -> Self {
        self.by = Some(pattern.to_arg());
        self
    }

    pub fn limit(mut self, offset: i64, count: i64) -> Self {
        self.limit = Some(Limit::new(offset, count));
        self
    }

    /// `GET pattern`, repeatable; `#` fetches the element itself
    pub fn get(mut self, pattern: impl ToArg) -> Self {
        self.get.push(pattern.to_arg());
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Compare elements as strings rather than numbers
    pub fn alpha(mut self) -> Self {
        self.alpha = true;
        self
    }

    pub(crate) fn append_to(&self, command: &mut Command) {
        command.option("BY", self.by.as_ref());
        Limit::append_to(self.limit, command);
        for pattern in &self.get {
            command.push("GET");
            command.push(pattern);
        }
        if let Some(order) = self.order {
            command.push(order);
        }
        command.flag(self.alpha, "ALPHA");
    }
}

/**
 * Variadic lists the store requires at least one element of
 */
pub(crate) fn require_non_empty<T>(command: &'static str, what: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::argument(command, format!("at least one {} is required", what)));
    }
    Ok(())
}

/**
 * Batches that stand for a mapping (member → score, field → value) must not repeat a key
 */
pub(crate) fn require_unique<K: Hash + Eq>(
    command: &'static str,
    keys: impl IntoIterator<Item = K>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(Error::argument(command, "duplicate key in batch"));
        }
    }
    Ok(())
}
