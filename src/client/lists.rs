use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{
        CommandDescriptor, BLPOP, BRPOP, LINDEX, LINSERT, LLEN, LPOP, LPOS, LPUSH, LPUSHX, LRANGE,
        LREM, LSET, LTRIM, RPOP, RPUSH, RPUSHX,
    },
    error::Result,
    params::{require_non_empty, LPosParams, ListPosition},
    reply::{Bulk, Int, List, Nullable, Pair},
    resp::command::ToArg,
};

use super::Client;

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    async fn push<V: ToArg>(&mut self, descriptor: &CommandDescriptor<Int>, key: impl ToArg, values: &[V]) -> Result<i64> {
        require_non_empty(descriptor.name, "element", values)?;
        let mut command = descriptor.command().arg(key);
        command.extend(values);
        self.run(descriptor, command).await
    }

    /// Length of the list after the push
    pub async fn rpush<V: ToArg>(&mut self, key: impl ToArg, values: &[V]) -> Result<i64> {
        self.push(&RPUSH, key, values).await
    }

    pub async fn lpush<V: ToArg>(&mut self, key: impl ToArg, values: &[V]) -> Result<i64> {
        self.push(&LPUSH, key, values).await
    }

    /// Pushes only onto an existing list; 0 when the key is missing
    pub async fn rpushx<V: ToArg>(&mut self, key: impl ToArg, values: &[V]) -> Result<i64> {
        self.push(&RPUSHX, key, values).await
    }

    pub async fn lpushx<V: ToArg>(&mut self, key: impl ToArg, values: &[V]) -> Result<i64> {
        self.push(&LPUSHX, key, values).await
    }

    pub async fn llen(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&LLEN, LLEN.command().arg(key)).await
    }

    /// Inclusive index range; negative indexes count from the tail
    pub async fn lrange(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        self.run(&LRANGE, LRANGE.command().arg(key).arg(start).arg(stop)).await
    }

    pub async fn ltrim(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<()> {
        self.run(&LTRIM, LTRIM.command().arg(key).arg(start).arg(stop)).await
    }

    pub async fn lindex(&mut self, key: impl ToArg, index: i64) -> Result<Option<Bytes>> {
        self.run(&LINDEX, LINDEX.command().arg(key).arg(index)).await
    }

    pub async fn lset(&mut self, key: impl ToArg, index: i64, value: impl ToArg) -> Result<()> {
        self.run(&LSET, LSET.command().arg(key).arg(index).arg(value)).await
    }

    /**
     * Removes up to `count` occurrences of `value`: from the head when
     * positive, from the tail when negative, all of them when 0.
     */
    pub async fn lrem(&mut self, key: impl ToArg, count: i64, value: impl ToArg) -> Result<i64> {
        self.run(&LREM, LREM.command().arg(key).arg(count).arg(value)).await
    }

    pub async fn lpop(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        self.run(&LPOP, LPOP.command().arg(key)).await
    }

    pub async fn rpop(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        self.run(&RPOP, RPOP.command().arg(key)).await
    }

    pub async fn lpos(&mut self, key: impl ToArg, element: impl ToArg, params: &LPosParams) -> Result<Option<i64>> {
        let mut command = LPOS.command().arg(key).arg(element);
        params.append_to(&mut command)?;
        self.run(&LPOS, command).await
    }

    /// Indexes of up to `count` matches, every match when `count` is 0
    pub async fn lpos_count(
        &mut self,
        key: impl ToArg,
        element: impl ToArg,
        params: &LPosParams,
        count: u64,
    ) -> Result<Vec<i64>> {
        let mut command = LPOS.command().arg(key).arg(element);
        params.append_to(&mut command)?;
        command.push("COUNT");
        command.push(count);
        self.run_as(&LPOS, command, &List(Int)).await
    }

    /// Length of the list after the insert, -1 when the pivot wasn't found
    pub async fn linsert(
        &mut self,
        key: impl ToArg,
        position: ListPosition,
        pivot: impl ToArg,
        value: impl ToArg,
    ) -> Result<i64> {
        let command = LINSERT.command().arg(key).arg(position).arg(pivot).arg(value);
        self.run(&LINSERT, command).await
    }

    async fn blocking_pop<K: ToArg>(
        &mut self,
        descriptor: &CommandDescriptor<Nullable<Pair<Bulk, Bulk>>>,
        keys: &[K],
        timeout: Duration,
    ) -> Result<Option<(Bytes, Bytes)>> {
        require_non_empty(descriptor.name, "key", keys)?;
        let mut command = descriptor.command();
        command.extend(keys);
        command.push(timeout.as_secs_f64());
        self.run(descriptor, command).await
    }

    /**
     * Pops from the first non-empty list, waiting up to `timeout` (zero
     * waits forever). Returns the key popped from with the element.
     *
     * The client's response timeout still applies and has to be longer than
     * `timeout`.
     */
    pub async fn blpop<K: ToArg>(&mut self, keys: &[K], timeout: Duration) -> Result<Option<(Bytes, Bytes)>> {
        self.blocking_pop(&BLPOP, keys, timeout).await
    }

    pub async fn brpop<K: ToArg>(&mut self, keys: &[K], timeout: Duration) -> Result<Option<(Bytes, Bytes)>> {
        self.blocking_pop(&BRPOP, keys, timeout).await
    }
}
