use bytes::Bytes;

use crate::{
    error::{Error, Result},
    reply::GeoResults,
    resp::command::{Command, ToArg},
};

use super::SortOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeoUnit {
    #[default]
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl ToArg for GeoUnit {
    fn to_arg(&self) -> Bytes {
        Bytes::from_static(match self {
            GeoUnit::Meters => b"m",
            GeoUnit::Kilometers => b"km",
            GeoUnit::Miles => b"mi",
            GeoUnit::Feet => b"ft",
        })
    }
}

/**
 * GEORADIUS / GEORADIUSBYMEMBER modifiers.
 *
 * The `with_*` flags change the shape of every result element, so the same
 * value decides both what is sent and how the reply is read.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoRadiusParams {
    with_coordinate: bool,
    with_distance: bool,
    with_hash: bool,
    count: Option<(u64, bool)>,
    order: Option<SortOrder>,
}

impl GeoRadiusParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// `WITHCOORD`
    pub fn with_coordinate(mut self) -> Self {
        self.with_coordinate = true;
        self
    }

    /// `WITHDIST`, in the query's unit
    pub fn with_distance(mut self) -> Self {
        self.with_distance = true;
        self
    }

    /// `WITHHASH`, the raw 52 bit geohash score
    pub fn with_hash(mut self) -> Self {
        self.with_hash = true;
        self
    }

    /// `COUNT n`
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some((count, false));
        self
    }

    /// `COUNT n ANY`: stop at the first `n` matches instead of the closest `n`
    pub fn count_any(mut self, count: u64) -> Self {
        self.count = Some((count, true));
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub(crate) fn shape(&self) -> GeoResults {
        GeoResults {
            with_distance: self.with_distance,
            with_hash: self.with_hash,
            with_coordinate: self.with_coordinate,
        }
    }

    pub(crate) fn append_to(&self, command: &mut Command) -> Result<()> {
        command.flag(self.with_coordinate, "WITHCOORD");
        command.flag(self.with_distance, "WITHDIST");
        command.flag(self.with_hash, "WITHHASH");

        if let Some((count, any)) = self.count {
            if count == 0 {
                return Err(Error::argument(command.name(), "COUNT must be positive"));
            }
            command.push("COUNT");
            command.push(count);
            command.flag(any, "ANY");
        }
        if let Some(order) = self.order {
            command.push(order);
        }
        Ok(())
    }
}
