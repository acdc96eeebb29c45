use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{
        CommandDescriptor, GEOADD, GEODIST, GEOHASH, GEOPOS, GEORADIUS, GEORADIUSBYMEMBER,
        GEORADIUSBYMEMBER_RO, GEORADIUS_RO,
    },
    error::{Error, Result},
    params::{require_non_empty, require_unique, GeoRadiusParams, GeoUnit},
    reply::GeoResults,
    resp::command::{Command, ToArg},
    types::{GeoCoordinate, GeoRadiusResult},
};

use super::Client;

fn push_coordinate(command: &mut Command, coordinate: GeoCoordinate) -> Result<()> {
    if coordinate.longitude.is_nan() || coordinate.latitude.is_nan() {
        return Err(Error::argument(command.name(), "coordinate is NaN"));
    }
    command.push(coordinate.longitude);
    command.push(coordinate.latitude);
    Ok(())
}

fn push_radius(command: &mut Command, radius: f64, unit: GeoUnit) -> Result<()> {
    if !(radius >= 0.0 && radius.is_finite()) {
        return Err(Error::argument(command.name(), "radius must be a finite, non-negative number"));
    }
    command.push(radius);
    command.push(unit);
    Ok(())
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Number of members added, updated positions not counted
    pub async fn geoadd(&mut self, key: impl ToArg, coordinate: GeoCoordinate, member: impl ToArg) -> Result<i64> {
        let mut command = GEOADD.command().arg(key);
        push_coordinate(&mut command, coordinate)?;
        command.push(member);
        self.run(&GEOADD, command).await
    }

    /// `longitude latitude member` triples in slice order; members must be unique
    pub async fn geoadd_multiple<M: ToArg>(
        &mut self,
        key: impl ToArg,
        members: &[(M, GeoCoordinate)],
    ) -> Result<i64> {
        require_non_empty(GEOADD.name, "member", members)?;
        require_unique(GEOADD.name, members.iter().map(|(member, _)| member.to_arg()))?;

        let mut command = GEOADD.command().arg(key);
        for (member, coordinate) in members {
            push_coordinate(&mut command, *coordinate)?;
            command.push(member);
        }
        self.run(&GEOADD, command).await
    }

    /// Distance in `unit` (meters when `None`), `None` when either member is missing
    pub async fn geodist(
        &mut self,
        key: impl ToArg,
        member1: impl ToArg,
        member2: impl ToArg,
        unit: Option<GeoUnit>,
    ) -> Result<Option<f64>> {
        let mut command = GEODIST.command().arg(key).arg(member1).arg(member2);
        if let Some(unit) = unit {
            command.push(unit);
        }
        self.run(&GEODIST, command).await
    }

    /// 11 character geohash per member, `None` where it is missing
    pub async fn geohash<M: ToArg>(&mut self, key: impl ToArg, members: &[M]) -> Result<Vec<Option<String>>> {
        require_non_empty(GEOHASH.name, "member", members)?;
        let mut command = GEOHASH.command().arg(key);
        command.extend(members);
        self.run(&GEOHASH, command).await
    }

    pub async fn geopos<M: ToArg>(&mut self, key: impl ToArg, members: &[M]) -> Result<Vec<Option<GeoCoordinate>>> {
        require_non_empty(GEOPOS.name, "member", members)?;
        let mut command = GEOPOS.command().arg(key);
        command.extend(members);
        self.run(&GEOPOS, command).await
    }

    async fn radius_query(
        &mut self,
        descriptor: &CommandDescriptor<GeoResults>,
        mut command: Command,
        radius: f64,
        unit: GeoUnit,
        params: &GeoRadiusParams,
    ) -> Result<Vec<GeoRadiusResult>> {
        push_radius(&mut command, radius, unit)?;
        params.append_to(&mut command)?;
        self.run_as(descriptor, command, &params.shape()).await
    }

    /**
     * Members within `radius` of `center`. The `with_*` flags in `params`
     * decide which optional parts each result carries.
     */
    pub async fn georadius(
        &mut self,
        key: impl ToArg,
        center: GeoCoordinate,
        radius: f64,
        unit: GeoUnit,
        params: &GeoRadiusParams,
    ) -> Result<Vec<GeoRadiusResult>> {
        let mut command = GEORADIUS.command().arg(key);
        push_coordinate(&mut command, center)?;
        self.radius_query(&GEORADIUS, command, radius, unit, params).await
    }

    /// `georadius` that may run on a replica
    pub async fn georadius_ro(
        &mut self,
        key: impl ToArg,
        center: GeoCoordinate,
        radius: f64,
        unit: GeoUnit,
        params: &GeoRadiusParams,
    ) -> Result<Vec<GeoRadiusResult>> {
        let mut command = GEORADIUS_RO.command().arg(key);
        push_coordinate(&mut command, center)?;
        self.radius_query(&GEORADIUS_RO, command, radius, unit, params).await
    }

    /// Members within `radius` of an existing member, that member included
    pub async fn georadius_by_member(
        &mut self,
        key: impl ToArg,
        member: impl ToArg,
        radius: f64,
        unit: GeoUnit,
        params: &GeoRadiusParams,
    ) -> Result<Vec<GeoRadiusResult>> {
        let command = GEORADIUSBYMEMBER.command().arg(key).arg(member);
        self.radius_query(&GEORADIUSBYMEMBER, command, radius, unit, params).await
    }

    pub async fn georadius_by_member_ro(
        &mut self,
        key: impl ToArg,
        member: impl ToArg,
        radius: f64,
        unit: GeoUnit,
        params: &GeoRadiusParams,
    ) -> Result<Vec<GeoRadiusResult>> {
        let command = GEORADIUSBYMEMBER_RO.command().arg(key).arg(member);
        self.radius_query(&GEORADIUSBYMEMBER_RO, command, radius, unit, params).await
    }
}
