use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{BITCOUNT, BITFIELD, BITFIELD_RO, BITPOS, GETBIT, SETBIT},
    error::{Error, Result},
    params::{BitFieldOp, BitPosParams},
    resp::command::ToArg,
};

use super::Client;

fn bit(value: bool) -> u32 {
    u32::from(value)
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Returns the bit's previous value
    pub async fn setbit(&mut self, key: impl ToArg, offset: u64, value: bool) -> Result<bool> {
        self.run(&SETBIT, SETBIT.command().arg(key).arg(offset).arg(bit(value))).await
    }

    pub async fn getbit(&mut self, key: impl ToArg, offset: u64) -> Result<bool> {
        self.run(&GETBIT, GETBIT.command().arg(key).arg(offset)).await
    }

    pub async fn bitcount(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&BITCOUNT, BITCOUNT.command().arg(key)).await
    }

    /// Set bits within an inclusive byte range
    pub async fn bitcount_range(&mut self, key: impl ToArg, start: i64, end: i64) -> Result<i64> {
        self.run(&BITCOUNT, BITCOUNT.command().arg(key).arg(start).arg(end)).await
    }

    /// Position of the first bit equal to `value`, -1 when there is none
    pub async fn bitpos(&mut self, key: impl ToArg, value: bool, params: &BitPosParams) -> Result<i64> {
        let mut command = BITPOS.command().arg(key).arg(bit(value));
        params.append_to(&mut command);
        self.run(&BITPOS, command).await
    }

    /**
     * Runs the sub-operations in order. One reply slot per GET/SET/INCRBY;
     * `None` where `OVERFLOW FAIL` suppressed an update.
     */
    pub async fn bitfield(&mut self, key: impl ToArg, ops: &[BitFieldOp]) -> Result<Vec<Option<i64>>> {
        let mut command = BITFIELD.command().arg(key);
        for op in ops {
            op.append_to(&mut command)?;
        }
        self.run(&BITFIELD, command).await
    }

    pub async fn bitfield_ro(&mut self, key: impl ToArg, ops: &[BitFieldOp]) -> Result<Vec<Option<i64>>> {
        if !ops.iter().all(BitFieldOp::is_read_only) {
            return Err(Error::argument(BITFIELD_RO.name, "only GET operations are allowed"));
        }
        let mut command = BITFIELD_RO.command().arg(key);
        for op in ops {
            op.append_to(&mut command)?;
        }
        self.run(&BITFIELD_RO, command).await
    }
}
