use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{
        CommandDescriptor, XACK, XADD, XCLAIM, XDEL, XGROUP_CREATE, XGROUP_DELCONSUMER,
        XGROUP_DESTROY, XGROUP_SETID, XINFO_CONSUMERS, XINFO_GROUPS, XINFO_STREAM, XLEN, XPENDING,
        XRANGE, XREVRANGE, XTRIM,
    },
    error::Result,
    params::{require_non_empty, StreamId, StreamTrim, XClaimParams},
    reply::{Entries, EntryId, List},
    resp::command::{Command, ToArg},
    types::{
        StreamConsumerInfo, StreamEntry, StreamEntryId, StreamGroupInfo, StreamInfo,
        StreamPendingEntry,
    },
};

use super::Client;

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /**
     * Appends an entry and returns its id. `StreamId::Auto` lets the store
     * pick one; `trim` caps the stream length in the same call.
     */
    pub async fn xadd<F: ToArg, V: ToArg>(
        &mut self,
        key: impl ToArg,
        id: StreamId,
        fields: &[(F, V)],
        trim: Option<StreamTrim>,
    ) -> Result<StreamEntryId> {
        require_non_empty(XADD.name, "field", fields)?;

        let mut command = XADD.command().arg(key);
        if let Some(trim) = trim {
            trim.append_to(&mut command);
        }
        command.push(id);
        for (field, value) in fields {
            command.push(field);
            command.push(value);
        }
        self.run(&XADD, command).await
    }

    pub async fn xlen(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&XLEN, XLEN.command().arg(key)).await
    }

    async fn range(
        &mut self,
        descriptor: &CommandDescriptor<Entries>,
        key: impl ToArg,
        from: StreamId,
        to: StreamId,
        count: Option<u64>,
    ) -> Result<Vec<StreamEntry>> {
        let mut command = descriptor.command().arg(key).arg(from).arg(to);
        command.option("COUNT", count);
        self.run(descriptor, command).await
    }

    /// Entries with `start <= id <= end`, oldest first
    pub async fn xrange(
        &mut self,
        key: impl ToArg,
        start: StreamId,
        end: StreamId,
        count: Option<u64>,
    ) -> Result<Vec<StreamEntry>> {
        self.range(&XRANGE, key, start, end, count).await
    }

    /// Newest first; the bounds come `end` first
    pub async fn xrevrange(
        &mut self,
        key: impl ToArg,
        end: StreamId,
        start: StreamId,
        count: Option<u64>,
    ) -> Result<Vec<StreamEntry>> {
        self.range(&XREVRANGE, key, end, start, count).await
    }

    /// Number of pending entries acknowledged
    pub async fn xack(&mut self, key: impl ToArg, group: impl ToArg, ids: &[StreamEntryId]) -> Result<i64> {
        require_non_empty(XACK.name, "id", ids)?;
        let mut command = XACK.command().arg(key).arg(group);
        command.extend(ids);
        self.run(&XACK, command).await
    }

    pub async fn xdel(&mut self, key: impl ToArg, ids: &[StreamEntryId]) -> Result<i64> {
        require_non_empty(XDEL.name, "id", ids)?;
        let mut command = XDEL.command().arg(key);
        command.extend(ids);
        self.run(&XDEL, command).await
    }

    /// Number of entries evicted
    pub async fn xtrim(&mut self, key: impl ToArg, trim: StreamTrim) -> Result<i64> {
        let mut command = XTRIM.command().arg(key);
        trim.append_to(&mut command);
        self.run(&XTRIM, command).await
    }

    /**
     * Creates a consumer group that delivers entries after `id`
     * (`StreamId::Last` for new entries only). `make_stream` creates an
     * empty stream when the key is missing.
     */
    pub async fn xgroup_create(
        &mut self,
        key: impl ToArg,
        group: impl ToArg,
        id: StreamId,
        make_stream: bool,
    ) -> Result<()> {
        let mut command = XGROUP_CREATE.command().arg(key).arg(group).arg(id);
        command.flag(make_stream, "MKSTREAM");
        self.run(&XGROUP_CREATE, command).await
    }

    pub async fn xgroup_setid(&mut self, key: impl ToArg, group: impl ToArg, id: StreamId) -> Result<()> {
        let command = XGROUP_SETID.command().arg(key).arg(group).arg(id);
        self.run(&XGROUP_SETID, command).await
    }

    pub async fn xgroup_destroy(&mut self, key: impl ToArg, group: impl ToArg) -> Result<bool> {
        self.run(&XGROUP_DESTROY, XGROUP_DESTROY.command().arg(key).arg(group)).await
    }

    /// Pending entries the consumer still owned
    pub async fn xgroup_delconsumer(
        &mut self,
        key: impl ToArg,
        group: impl ToArg,
        consumer: impl ToArg,
    ) -> Result<i64> {
        let command = XGROUP_DELCONSUMER.command().arg(key).arg(group).arg(consumer);
        self.run(&XGROUP_DELCONSUMER, command).await
    }

    /**
     * Extended XPENDING: up to `count` pending entries between `start` and
     * `end`, optionally only those owned by `consumer`.
     */
    pub async fn xpending(
        &mut self,
        key: impl ToArg,
        group: impl ToArg,
        start: StreamId,
        end: StreamId,
        count: u64,
        consumer: Option<&str>,
    ) -> Result<Vec<StreamPendingEntry>> {
        let mut command = XPENDING.command().arg(key).arg(group).arg(start).arg(end).arg(count);
        if let Some(consumer) = consumer {
            command.push(consumer);
        }
        self.run(&XPENDING, command).await
    }

    fn claim_command(
        key: impl ToArg,
        group: impl ToArg,
        consumer: impl ToArg,
        min_idle_millis: u64,
        ids: &[StreamEntryId],
        params: &XClaimParams,
    ) -> Result<Command> {
        require_non_empty(XCLAIM.name, "id", ids)?;
        let mut command = XCLAIM.command().arg(key).arg(group).arg(consumer).arg(min_idle_millis);
        command.extend(ids);
        params.append_to(&mut command);
        Ok(command)
    }

    /**
     * Moves pending entries idle for at least `min_idle_millis` to
     * `consumer`. Entries deleted from the stream meanwhile are left out.
     */
    pub async fn xclaim(
        &mut self,
        key: impl ToArg,
        group: impl ToArg,
        consumer: impl ToArg,
        min_idle_millis: u64,
        ids: &[StreamEntryId],
        params: &XClaimParams,
    ) -> Result<Vec<StreamEntry>> {
        let command = Self::claim_command(key, group, consumer, min_idle_millis, ids, params)?;
        self.run(&XCLAIM, command).await
    }

    /// `xclaim` with `JUSTID`: the delivery counter is left alone and only ids come back
    pub async fn xclaim_just_id(
        &mut self,
        key: impl ToArg,
        group: impl ToArg,
        consumer: impl ToArg,
        min_idle_millis: u64,
        ids: &[StreamEntryId],
        params: &XClaimParams,
    ) -> Result<Vec<StreamEntryId>> {
        let mut command = Self::claim_command(key, group, consumer, min_idle_millis, ids, params)?;
        command.push("JUSTID");
        self.run_as(&XCLAIM, command, &List(EntryId)).await
    }

    pub async fn xinfo_stream(&mut self, key: impl ToArg) -> Result<StreamInfo> {
        self.run(&XINFO_STREAM, XINFO_STREAM.command().arg(key)).await
    }

    pub async fn xinfo_groups(&mut self, key: impl ToArg) -> Result<Vec<StreamGroupInfo>> {
        self.run(&XINFO_GROUPS, XINFO_GROUPS.command().arg(key)).await
    }

    pub async fn xinfo_consumers(&mut self, key: impl ToArg, group: impl ToArg) -> Result<Vec<StreamConsumerInfo>> {
        self.run(&XINFO_CONSUMERS, XINFO_CONSUMERS.command().arg(key).arg(group)).await
    }
}
