use std::collections::{HashMap, HashSet};

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{
        HDEL, HEXISTS, HGET, HGETALL, HINCRBY, HINCRBYFLOAT, HKEYS, HLEN, HMGET, HMSET, HSCAN, HSET,
        HSETNX, HSTRLEN, HVALS,
    },
    error::{Error, Result},
    params::{require_non_empty, require_unique, ScanParams},
    resp::command::{Command, ToArg},
    types::ScanResult,
};

use super::Client;

/// `field value…` in the caller's order, each field at most once
fn push_field_values<F: ToArg, V: ToArg>(command: &mut Command, fields: &[(F, V)]) -> Result<()> {
    require_non_empty(command.name(), "field", fields)?;
    require_unique(command.name(), fields.iter().map(|(field, _)| field.to_arg()))?;
    for (field, value) in fields {
        command.push(field);
        command.push(value);
    }
    Ok(())
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Number of fields that were newly created
    pub async fn hset(&mut self, key: impl ToArg, field: impl ToArg, value: impl ToArg) -> Result<i64> {
        self.run(&HSET, HSET.command().arg(key).arg(field).arg(value)).await
    }

    pub async fn hset_multiple<F: ToArg, V: ToArg>(&mut self, key: impl ToArg, fields: &[(F, V)]) -> Result<i64> {
        let mut command = HSET.command().arg(key);
        push_field_values(&mut command, fields)?;
        self.run(&HSET, command).await
    }

    pub async fn hsetnx(&mut self, key: impl ToArg, field: impl ToArg, value: impl ToArg) -> Result<bool> {
        self.run(&HSETNX, HSETNX.command().arg(key).arg(field).arg(value)).await
    }

    pub async fn hmset<F: ToArg, V: ToArg>(&mut self, key: impl ToArg, fields: &[(F, V)]) -> Result<()> {
        let mut command = HMSET.command().arg(key);
        push_field_values(&mut command, fields)?;
        self.run(&HMSET, command).await
    }

    pub async fn hget(&mut self, key: impl ToArg, field: impl ToArg) -> Result<Option<Bytes>> {
        self.run(&HGET, HGET.command().arg(key).arg(field)).await
    }

    /// One slot per requested field, `None` where it is missing
    pub async fn hmget<F: ToArg>(&mut self, key: impl ToArg, fields: &[F]) -> Result<Vec<Option<Bytes>>> {
        require_non_empty(HMGET.name, "field", fields)?;
        let mut command = HMGET.command().arg(key);
        command.extend(fields);
        self.run(&HMGET, command).await
    }

    pub async fn hincr_by(&mut self, key: impl ToArg, field: impl ToArg, increment: i64) -> Result<i64> {
        self.run(&HINCRBY, HINCRBY.command().arg(key).arg(field).arg(increment)).await
    }

    pub async fn hincr_by_float(&mut self, key: impl ToArg, field: impl ToArg, increment: f64) -> Result<f64> {
        if !increment.is_finite() {
            return Err(Error::argument(HINCRBYFLOAT.name, "increment must be finite"));
        }
        let command = HINCRBYFLOAT.command().arg(key).arg(field).arg(increment);
        self.run(&HINCRBYFLOAT, command).await
    }

    pub async fn hexists(&mut self, key: impl ToArg, field: impl ToArg) -> Result<bool> {
        self.run(&HEXISTS, HEXISTS.command().arg(key).arg(field)).await
    }

    pub async fn hdel<F: ToArg>(&mut self, key: impl ToArg, fields: &[F]) -> Result<i64> {
        require_non_empty(HDEL.name, "field", fields)?;
        let mut command = HDEL.command().arg(key);
        command.extend(fields);
        self.run(&HDEL, command).await
    }

    pub async fn hlen(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&HLEN, HLEN.command().arg(key)).await
    }

    pub async fn hstrlen(&mut self, key: impl ToArg, field: impl ToArg) -> Result<i64> {
        self.run(&HSTRLEN, HSTRLEN.command().arg(key).arg(field)).await
    }

    pub async fn hkeys(&mut self, key: impl ToArg) -> Result<HashSet<Bytes>> {
        self.run(&HKEYS, HKEYS.command().arg(key)).await
    }

    pub async fn hvals(&mut self, key: impl ToArg) -> Result<Vec<Bytes>> {
        self.run(&HVALS, HVALS.command().arg(key)).await
    }

    pub async fn hgetall(&mut self, key: impl ToArg) -> Result<HashMap<Bytes, Bytes>> {
        self.run(&HGETALL, HGETALL.command().arg(key)).await
    }

    /// One page of field/value pairs, wire order kept
    pub async fn hscan(
        &mut self,
        key: impl ToArg,
        cursor: &str,
        params: &ScanParams,
    ) -> Result<ScanResult<(Bytes, Bytes)>> {
        let mut command = HSCAN.command().arg(key).arg(cursor);
        params.append_to(&mut command)?;
        self.run(&HSCAN, command).await
    }
}
