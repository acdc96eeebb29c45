use crate::{
    error::{Error, Result},
    resp::frame::RESPFrame,
    types::{GeoCoordinate, GeoRadiusResult},
};

use super::{array, Bulk, Float, Int, Shape};

/// `[longitude, latitude]` as two decimal bulk strings.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate;

impl Shape for Coordinate {
    type Output = GeoCoordinate;

    fn map(&self, frame: RESPFrame) -> Result<GeoCoordinate> {
        let items = array("coordinate pair", frame)?;
        let [longitude, latitude] = <[RESPFrame; 2]>::try_from(items)
            .map_err(|items| Error::shape("[longitude, latitude]", format!("array of {}", items.len())))?;

        Ok(GeoCoordinate {
            longitude: Float.map(longitude)?,
            latitude: Float.map(latitude)?,
        })
    }
}

/**
 * Radius query results. The flags are the ones that were sent with the
 * request; the store answers positionally as
 * `member, [distance], [hash], [coordinate]`, and with no flag at all each
 * result is the bare member.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoResults {
    pub with_distance: bool,
    pub with_hash: bool,
    pub with_coordinate: bool,
}

impl GeoResults {
    fn width(&self) -> usize {
        1 + [self.with_distance, self.with_hash, self.with_coordinate]
            .iter()
            .filter(|flag| **flag)
            .count()
    }

    fn result(&self, frame: RESPFrame) -> Result<GeoRadiusResult> {
        if self.width() == 1 {
            return Ok(GeoRadiusResult {
                member: Bulk.map(frame)?,
                distance: None,
                geohash: None,
                coordinate: None,
            });
        }

        let items = array("geo result", frame)?;
        if items.len() != self.width() {
            return Err(Error::shape(
                "geo result matching requested flags",
                format!("array of {}", items.len()),
            ));
        }

        let mut items = items.into_iter();
        let mut next = || items.next().ok_or_else(|| Error::shape("geo result field", "end of array"));

        let member = Bulk.map(next()?)?;
        let distance = if self.with_distance { Some(Float.map(next()?)?) } else { None };
        let geohash = if self.with_hash { Some(Int.map(next()?)?) } else { None };
        let coordinate = if self.with_coordinate { Some(Coordinate.map(next()?)?) } else { None };

        Ok(GeoRadiusResult { member, distance, geohash, coordinate })
    }
}

impl Shape for GeoResults {
    type Output = Vec<GeoRadiusResult>;

    fn map(&self, frame: RESPFrame) -> Result<Self::Output> {
        array("geo results", frame)?
            .into_iter()
            .map(|item| self.result(item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn plain_results_are_bare_members() {
        let reply = RESPFrame::Array(vec![RESPFrame::bulk("Palermo"), RESPFrame::bulk("Catania")]);
        let results = GeoResults::default().map(reply).unwrap();

        assert_eq!(Bytes::from("Catania"), results[1].member);
        assert_eq!(None, results[1].distance);
    }

    #[test]
    fn distance_only_reads_member_and_distance() {
        let shape = GeoResults { with_distance: true, ..Default::default() };
        let reply = RESPFrame::Array(vec![RESPFrame::Array(vec![
            RESPFrame::bulk("Palermo"),
            RESPFrame::bulk("190.4424"),
        ])]);

        assert_eq!(
            vec![GeoRadiusResult {
                member: Bytes::from("Palermo"),
                distance: Some(190.4424),
                geohash: None,
                coordinate: None,
            }],
            shape.map(reply).unwrap()
        );
    }

    #[test]
    fn distance_only_rejects_extra_fields() {
        let shape = GeoResults { with_distance: true, ..Default::default() };
        let reply = RESPFrame::Array(vec![RESPFrame::Array(vec![
            RESPFrame::bulk("Palermo"),
            RESPFrame::bulk("190.4424"),
            RESPFrame::Integer(3479099956230698),
        ])]);

        assert!(matches!(shape.map(reply), Err(Error::DecodeShape { .. })));
    }

    #[test]
    fn all_flags_map_in_fixed_order() {
        let shape = GeoResults { with_distance: true, with_hash: true, with_coordinate: true };
        let reply = RESPFrame::Array(vec![RESPFrame::Array(vec![
            RESPFrame::bulk("Catania"),
            RESPFrame::bulk("56.4413"),
            RESPFrame::Integer(3479447370796909),
            RESPFrame::Array(vec![
                RESPFrame::bulk("15.08726745843887329"),
                RESPFrame::bulk("37.50266842333162032"),
            ]),
        ])]);

        let result = &shape.map(reply).unwrap()[0];
        assert_eq!(Some(56.4413), result.distance);
        assert_eq!(Some(3479447370796909), result.geohash);
        assert_eq!(
            Some(GeoCoordinate::new(15.08726745843887329, 37.50266842333162032)),
            result.coordinate
        );
    }

    #[test]
    fn coordinate_only_skips_distance_and_hash() {
        let shape = GeoResults { with_coordinate: true, ..Default::default() };
        let reply = RESPFrame::Array(vec![RESPFrame::Array(vec![
            RESPFrame::bulk("Catania"),
            RESPFrame::Array(vec![RESPFrame::bulk("15"), RESPFrame::bulk("37.5")]),
        ])]);

        let result = &shape.map(reply).unwrap()[0];
        assert_eq!(None, result.distance);
        assert_eq!(Some(GeoCoordinate::new(15.0, 37.5)), result.coordinate);
    }
}
