use std::collections::HashSet;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{SADD, SCARD, SISMEMBER, SMEMBERS, SMISMEMBER, SPOP, SRANDMEMBER, SREM, SSCAN},
    error::{Error, Result},
    params::{require_non_empty, ScanParams},
    reply::{Bulk, List, Set},
    resp::command::ToArg,
    types::ScanResult,
};

use super::Client;

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Number of members that weren't already present
    pub async fn sadd<M: ToArg>(&mut self, key: impl ToArg, members: &[M]) -> Result<i64> {
        require_non_empty(SADD.name, "member", members)?;
        let mut command = SADD.command().arg(key);
        command.extend(members);
        self.run(&SADD, command).await
    }

    pub async fn srem<M: ToArg>(&mut self, key: impl ToArg, members: &[M]) -> Result<i64> {
        require_non_empty(SREM.name, "member", members)?;
        let mut command = SREM.command().arg(key);
        command.extend(members);
        self.run(&SREM, command).await
    }

    pub async fn smembers(&mut self, key: impl ToArg) -> Result<HashSet<Bytes>> {
        self.run(&SMEMBERS, SMEMBERS.command().arg(key)).await
    }

    pub async fn spop(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        self.run(&SPOP, SPOP.command().arg(key)).await
    }

    pub async fn spop_count(&mut self, key: impl ToArg, count: u64) -> Result<HashSet<Bytes>> {
        if count == 0 {
            return Err(Error::argument(SPOP.name, "count must be positive"));
        }
        self.run_as(&SPOP, SPOP.command().arg(key).arg(count), &Set(Bulk)).await
    }

    pub async fn scard(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&SCARD, SCARD.command().arg(key)).await
    }

    pub async fn sismember(&mut self, key: impl ToArg, member: impl ToArg) -> Result<bool> {
        self.run(&SISMEMBER, SISMEMBER.command().arg(key).arg(member)).await
    }

    /// Membership of each member, in the order asked
    pub async fn smismember<M: ToArg>(&mut self, key: impl ToArg, members: &[M]) -> Result<Vec<bool>> {
        require_non_empty(SMISMEMBER.name, "member", members)?;
        let mut command = SMISMEMBER.command().arg(key);
        command.extend(members);
        self.run(&SMISMEMBER, command).await
    }

    pub async fn srandmember(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        self.run(&SRANDMEMBER, SRANDMEMBER.command().arg(key)).await
    }

    /**
     * Up to `count` distinct members. A negative count allows repeats and
     * always returns `|count|` members of a non-empty set.
     */
    pub async fn srandmember_count(&mut self, key: impl ToArg, count: i64) -> Result<Vec<Bytes>> {
        let command = SRANDMEMBER.command().arg(key).arg(count);
        self.run_as(&SRANDMEMBER, command, &List(Bulk)).await
    }

    pub async fn sscan(&mut self, key: impl ToArg, cursor: &str, params: &ScanParams) -> Result<ScanResult<Bytes>> {
        let mut command = SSCAN.command().arg(key).arg(cursor);
        params.append_to(&mut command)?;
        self.run(&SSCAN, command).await
    }
}
