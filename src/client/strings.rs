use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{
        APPEND, DECR, DECRBY, GET, GETRANGE, GETSET, INCR, INCRBY, INCRBYFLOAT, MGET, PSETEX, SET,
        SETEX, SETNX, SETRANGE, STRLEN, SUBSTR,
    },
    error::{Error, Result},
    params::{require_non_empty, SetParams},
    reply::Unit,
    resp::command::ToArg,
};

use super::Client;

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    pub async fn set(&mut self, key: impl ToArg, value: impl ToArg) -> Result<()> {
        self.run_as(&SET, SET.command().arg(key).arg(value), &Unit).await
    }

    /**
     * SET with an existence condition and/or expiry. Returns false when the
     * condition made the store skip the write.
     */
    pub async fn set_with(&mut self, key: impl ToArg, value: impl ToArg, params: &SetParams) -> Result<bool> {
        let mut command = SET.command().arg(key).arg(value);
        params.append_to(&mut command)?;
        self.run(&SET, command).await
    }

    pub async fn get(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        self.run(&GET, GET.command().arg(key)).await
    }

    pub async fn getset(&mut self, key: impl ToArg, value: impl ToArg) -> Result<Option<Bytes>> {
        self.run(&GETSET, GETSET.command().arg(key).arg(value)).await
    }

    /// One slot per key, `None` where the key is missing or not a string
    pub async fn mget<K: ToArg>(&mut self, keys: &[K]) -> Result<Vec<Option<Bytes>>> {
        require_non_empty(MGET.name, "key", keys)?;
        let mut command = MGET.command();
        command.extend(keys);
        self.run(&MGET, command).await
    }

    pub async fn setnx(&mut self, key: impl ToArg, value: impl ToArg) -> Result<bool> {
        self.run(&SETNX, SETNX.command().arg(key).arg(value)).await
    }

    pub async fn setex(&mut self, key: impl ToArg, seconds: u64, value: impl ToArg) -> Result<()> {
        if seconds == 0 {
            return Err(Error::argument(SETEX.name, "expiry must be positive"));
        }
        self.run(&SETEX, SETEX.command().arg(key).arg(seconds).arg(value)).await
    }

    pub async fn psetex(&mut self, key: impl ToArg, millis: u64, value: impl ToArg) -> Result<()> {
        if millis == 0 {
            return Err(Error::argument(PSETEX.name, "expiry must be positive"));
        }
        self.run(&PSETEX, PSETEX.command().arg(key).arg(millis).arg(value)).await
    }

    pub async fn incr(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&INCR, INCR.command().arg(key)).await
    }

    pub async fn decr(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&DECR, DECR.command().arg(key)).await
    }

    pub async fn incr_by(&mut self, key: impl ToArg, increment: i64) -> Result<i64> {
        self.run(&INCRBY, INCRBY.command().arg(key).arg(increment)).await
    }

    pub async fn decr_by(&mut self, key: impl ToArg, decrement: i64) -> Result<i64> {
        self.run(&DECRBY, DECRBY.command().arg(key).arg(decrement)).await
    }

    pub async fn incr_by_float(&mut self, key: impl ToArg, increment: f64) -> Result<f64> {
        if !increment.is_finite() {
            return Err(Error::argument(INCRBYFLOAT.name, "increment must be finite"));
        }
        self.run(&INCRBYFLOAT, INCRBYFLOAT.command().arg(key).arg(increment)).await
    }

    /// Length of the string after the append
    pub async fn append(&mut self, key: impl ToArg, value: impl ToArg) -> Result<i64> {
        self.run(&APPEND, APPEND.command().arg(key).arg(value)).await
    }

    pub async fn strlen(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&STRLEN, STRLEN.command().arg(key)).await
    }

    pub async fn setrange(&mut self, key: impl ToArg, offset: u64, value: impl ToArg) -> Result<i64> {
        self.run(&SETRANGE, SETRANGE.command().arg(key).arg(offset).arg(value)).await
    }

    /// Inclusive byte range; negative offsets count from the end
    pub async fn getrange(&mut self, key: impl ToArg, start: i64, end: i64) -> Result<Bytes> {
        self.run(&GETRANGE, GETRANGE.command().arg(key).arg(start).arg(end)).await
    }

    pub async fn substr(&mut self, key: impl ToArg, start: i64, end: i64) -> Result<Bytes> {
        self.run(&SUBSTR, SUBSTR.command().arg(key).arg(start).arg(end)).await
    }
}
