use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{
        CommandDescriptor, ZADD, ZCARD, ZCOUNT, ZINCRBY, ZLEXCOUNT, ZMSCORE, ZPOPMAX, ZPOPMIN, ZRANGE,
        ZRANGEBYLEX, ZRANGEBYSCORE, ZRANK, ZREM, ZREMRANGEBYLEX, ZREMRANGEBYRANK, ZREMRANGEBYSCORE,
        ZREVRANGE, ZREVRANGEBYLEX, ZREVRANGEBYSCORE, ZREVRANK, ZSCAN, ZSCORE,
    },
    error::{Error, Result},
    params::{
        check_score, require_non_empty, require_unique, IntoLexBound, IntoScoreBound, Limit,
        ScanParams, ZAddParams, ZIncrByParams,
    },
    reply::{Bulk, Float, List, Nullable, ScoreMembers, Shape},
    resp::command::{Command, ToArg},
    types::{ScanResult, ScoreMember},
};

use super::Client;

/// `min max` (or `max min` for the reversed commands) after the key
fn score_range(
    name: &'static str,
    command: &mut Command,
    from: impl IntoScoreBound,
    to: impl IntoScoreBound,
) -> Result<()> {
    command.push(from.into_score_bound(name)?);
    command.push(to.into_score_bound(name)?);
    Ok(())
}

fn lex_range(
    name: &'static str,
    command: &mut Command,
    from: impl IntoLexBound,
    to: impl IntoLexBound,
) -> Result<()> {
    command.push(from.into_lex_bound(name)?);
    command.push(to.into_lex_bound(name)?);
    Ok(())
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    pub async fn zadd(
        &mut self,
        key: impl ToArg,
        score: f64,
        member: impl ToArg,
        params: &ZAddParams,
    ) -> Result<i64> {
        check_score(ZADD.name, score)?;
        let mut command = ZADD.command().arg(key);
        params.append_to(&mut command);
        command.push(score);
        command.push(member);
        self.run(&ZADD, command).await
    }

    /**
     * Adds or updates every member, sent as `score member` pairs in slice
     * order. Members must be unique within the batch.
     */
    pub async fn zadd_multiple(
        &mut self,
        key: impl ToArg,
        members: &[ScoreMember],
        params: &ZAddParams,
    ) -> Result<i64> {
        require_non_empty(ZADD.name, "member", members)?;
        require_unique(ZADD.name, members.iter().map(|entry| &entry.member))?;
        for entry in members {
            check_score(ZADD.name, entry.score)?;
        }

        let mut command = ZADD.command().arg(key);
        params.append_to(&mut command);
        for entry in members {
            command.push(entry.score);
            command.push(&entry.member);
        }
        self.run(&ZADD, command).await
    }

    /// New score of the member
    pub async fn zincr_by(&mut self, key: impl ToArg, increment: f64, member: impl ToArg) -> Result<f64> {
        check_score(ZINCRBY.name, increment)?;
        self.run(&ZINCRBY, ZINCRBY.command().arg(key).arg(increment).arg(member)).await
    }

    /// `zincr_by` under an existence condition; `None` when the store skipped it
    pub async fn zadd_incr(
        &mut self,
        key: impl ToArg,
        increment: f64,
        member: impl ToArg,
        params: &ZIncrByParams,
    ) -> Result<Option<f64>> {
        check_score(ZADD.name, increment)?;
        let mut command = ZADD.command().arg(key);
        params.append_to(&mut command);
        command.push(increment);
        command.push(member);
        self.run_as(&ZADD, command, &Nullable(Float)).await
    }

    pub async fn zrem<M: ToArg>(&mut self, key: impl ToArg, members: &[M]) -> Result<i64> {
        require_non_empty(ZREM.name, "member", members)?;
        let mut command = ZREM.command().arg(key);
        command.extend(members);
        self.run(&ZREM, command).await
    }

    pub async fn zrank(&mut self, key: impl ToArg, member: impl ToArg) -> Result<Option<i64>> {
        self.run(&ZRANK, ZRANK.command().arg(key).arg(member)).await
    }

    pub async fn zrevrank(&mut self, key: impl ToArg, member: impl ToArg) -> Result<Option<i64>> {
        self.run(&ZREVRANK, ZREVRANK.command().arg(key).arg(member)).await
    }

    pub async fn zrange(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        self.run(&ZRANGE, ZRANGE.command().arg(key).arg(start).arg(stop)).await
    }

    pub async fn zrange_with_scores(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<Vec<ScoreMember>> {
        let command = ZRANGE.command().arg(key).arg(start).arg(stop).arg("WITHSCORES");
        self.run_as(&ZRANGE, command, &ScoreMembers).await
    }

    pub async fn zrevrange(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        self.run(&ZREVRANGE, ZREVRANGE.command().arg(key).arg(start).arg(stop)).await
    }

    pub async fn zrevrange_with_scores(
        &mut self,
        key: impl ToArg,
        start: i64,
        stop: i64,
    ) -> Result<Vec<ScoreMember>> {
        let command = ZREVRANGE.command().arg(key).arg(start).arg(stop).arg("WITHSCORES");
        self.run_as(&ZREVRANGE, command, &ScoreMembers).await
    }

    pub async fn zcard(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&ZCARD, ZCARD.command().arg(key)).await
    }

    pub async fn zscore(&mut self, key: impl ToArg, member: impl ToArg) -> Result<Option<f64>> {
        self.run(&ZSCORE, ZSCORE.command().arg(key).arg(member)).await
    }

    /// One slot per member, `None` where it isn't in the set
    pub async fn zmscore<M: ToArg>(&mut self, key: impl ToArg, members: &[M]) -> Result<Vec<Option<f64>>> {
        require_non_empty(ZMSCORE.name, "member", members)?;
        let mut command = ZMSCORE.command().arg(key);
        command.extend(members);
        self.run(&ZMSCORE, command).await
    }

    async fn pop_one(
        &mut self,
        descriptor: &CommandDescriptor<ScoreMembers>,
        key: impl ToArg,
    ) -> Result<Option<ScoreMember>> {
        let mut popped = self.run(descriptor, descriptor.command().arg(key)).await?;
        if popped.len() > 1 {
            return Err(Error::shape("at most one member", format!("{} members", popped.len())));
        }
        Ok(popped.pop())
    }

    async fn pop_count(
        &mut self,
        descriptor: &CommandDescriptor<ScoreMembers>,
        key: impl ToArg,
        count: u64,
    ) -> Result<Vec<ScoreMember>> {
        if count == 0 {
            return Err(Error::argument(descriptor.name, "count must be positive"));
        }
        self.run(descriptor, descriptor.command().arg(key).arg(count)).await
    }

    pub async fn zpopmax(&mut self, key: impl ToArg) -> Result<Option<ScoreMember>> {
        self.pop_one(&ZPOPMAX, key).await
    }

    /// Highest scored members first
    pub async fn zpopmax_count(&mut self, key: impl ToArg, count: u64) -> Result<Vec<ScoreMember>> {
        self.pop_count(&ZPOPMAX, key, count).await
    }

    pub async fn zpopmin(&mut self, key: impl ToArg) -> Result<Option<ScoreMember>> {
        self.pop_one(&ZPOPMIN, key).await
    }

    pub async fn zpopmin_count(&mut self, key: impl ToArg, count: u64) -> Result<Vec<ScoreMember>> {
        self.pop_count(&ZPOPMIN, key, count).await
    }

    pub async fn zcount(&mut self, key: impl ToArg, min: impl IntoScoreBound, max: impl IntoScoreBound) -> Result<i64> {
        let mut command = ZCOUNT.command().arg(key);
        score_range(ZCOUNT.name, &mut command, min, max)?;
        self.run(&ZCOUNT, command).await
    }

    pub async fn zlexcount(&mut self, key: impl ToArg, min: impl IntoLexBound, max: impl IntoLexBound) -> Result<i64> {
        let mut command = ZLEXCOUNT.command().arg(key);
        lex_range(ZLEXCOUNT.name, &mut command, min, max)?;
        self.run(&ZLEXCOUNT, command).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn by_score<R: Shape>(
        &mut self,
        descriptor: &CommandDescriptor<List<Bulk>>,
        key: impl ToArg,
        from: impl IntoScoreBound,
        to: impl IntoScoreBound,
        with_scores: bool,
        limit: Option<Limit>,
        shape: &R,
    ) -> Result<R::Output> {
        let mut command = descriptor.command().arg(key);
        score_range(descriptor.name, &mut command, from, to)?;
        command.flag(with_scores, "WITHSCORES");
        Limit::append_to(limit, &mut command);
        self.run_as(descriptor, command, shape).await
    }

    /// Members with `min <= score <= max` (bounds may be exclusive or infinite)
    pub async fn zrange_by_score(
        &mut self,
        key: impl ToArg,
        min: impl IntoScoreBound,
        max: impl IntoScoreBound,
        limit: Option<Limit>,
    ) -> Result<Vec<Bytes>> {
        self.by_score(&ZRANGEBYSCORE, key, min, max, false, limit, &List(Bulk)).await
    }

    pub async fn zrange_by_score_with_scores(
        &mut self,
        key: impl ToArg,
        min: impl IntoScoreBound,
        max: impl IntoScoreBound,
        limit: Option<Limit>,
    ) -> Result<Vec<ScoreMember>> {
        self.by_score(&ZRANGEBYSCORE, key, min, max, true, limit, &ScoreMembers).await
    }

    /// Same range, highest score first; note the bounds come `max` first
    pub async fn zrevrange_by_score(
        &mut self,
        key: impl ToArg,
        max: impl IntoScoreBound,
        min: impl IntoScoreBound,
        limit: Option<Limit>,
    ) -> Result<Vec<Bytes>> {
        self.by_score(&ZREVRANGEBYSCORE, key, max, min, false, limit, &List(Bulk)).await
    }

    pub async fn zrevrange_by_score_with_scores(
        &mut self,
        key: impl ToArg,
        max: impl IntoScoreBound,
        min: impl IntoScoreBound,
        limit: Option<Limit>,
    ) -> Result<Vec<ScoreMember>> {
        self.by_score(&ZREVRANGEBYSCORE, key, max, min, true, limit, &ScoreMembers).await
    }

    async fn by_lex(
        &mut self,
        descriptor: &CommandDescriptor<List<Bulk>>,
        key: impl ToArg,
        from: impl IntoLexBound,
        to: impl IntoLexBound,
        limit: Option<Limit>,
    ) -> Result<Vec<Bytes>> {
        let mut command = descriptor.command().arg(key);
        lex_range(descriptor.name, &mut command, from, to)?;
        Limit::append_to(limit, &mut command);
        self.run(descriptor, command).await
    }

    /**
     * Members between two lexical bounds, for sets where every member has
     * the same score. Bounds are `[member`, `(member`, `-` or `+`.
     */
    pub async fn zrange_by_lex(
        &mut self,
        key: impl ToArg,
        min: impl IntoLexBound,
        max: impl IntoLexBound,
        limit: Option<Limit>,
    ) -> Result<Vec<Bytes>> {
        self.by_lex(&ZRANGEBYLEX, key, min, max, limit).await
    }

    pub async fn zrevrange_by_lex(
        &mut self,
        key: impl ToArg,
        max: impl IntoLexBound,
        min: impl IntoLexBound,
        limit: Option<Limit>,
    ) -> Result<Vec<Bytes>> {
        self.by_lex(&ZREVRANGEBYLEX, key, max, min, limit).await
    }

    pub async fn zremrange_by_rank(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<i64> {
        let command = ZREMRANGEBYRANK.command().arg(key).arg(start).arg(stop);
        self.run(&ZREMRANGEBYRANK, command).await
    }

    pub async fn zremrange_by_score(
        &mut self,
        key: impl ToArg,
        min: impl IntoScoreBound,
        max: impl IntoScoreBound,
    ) -> Result<i64> {
        let mut command = ZREMRANGEBYSCORE.command().arg(key);
        score_range(ZREMRANGEBYSCORE.name, &mut command, min, max)?;
        self.run(&ZREMRANGEBYSCORE, command).await
    }

    pub async fn zremrange_by_lex(
        &mut self,
        key: impl ToArg,
        min: impl IntoLexBound,
        max: impl IntoLexBound,
    ) -> Result<i64> {
        let mut command = ZREMRANGEBYLEX.command().arg(key);
        lex_range(ZREMRANGEBYLEX.name, &mut command, min, max)?;
        self.run(&ZREMRANGEBYLEX, command).await
    }

    pub async fn zscan(
        &mut self,
        key: impl ToArg,
        cursor: &str,
        params: &ScanParams,
    ) -> Result<ScanResult<ScoreMember>> {
        let mut command = ZSCAN.command().arg(key).arg(cursor);
        params.append_to(&mut command)?;
        self.run(&ZSCAN, command).await
    }
}
