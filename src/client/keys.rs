use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{
        DEL, DUMP, ECHO, EXISTS, EXPIRE, EXPIREAT, MOVE, PERSIST, PEXPIRE, PEXPIREAT, PING, PTTL,
        RESTORE, SCAN, SORT, TOUCH, TTL, TYPE, UNLINK,
    },
    error::Result,
    params::{require_non_empty, ScanParams, SortParams},
    resp::command::ToArg,
    types::ScanResult,
};

use super::Client;

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    pub async fn exists(&mut self, key: impl ToArg) -> Result<bool> {
        self.run(&EXISTS, EXISTS.command().arg(key)).await
    }

    /// Drops the expiry; false when the key had none or doesn't exist
    pub async fn persist(&mut self, key: impl ToArg) -> Result<bool> {
        self.run(&PERSIST, PERSIST.command().arg(key)).await
    }

    /// Type name of the stored value, `none` for a missing key
    pub async fn key_type(&mut self, key: impl ToArg) -> Result<String> {
        self.run(&TYPE, TYPE.command().arg(key)).await
    }

    pub async fn dump(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        self.run(&DUMP, DUMP.command().arg(key)).await
    }

    /**
     * Recreates a key from a `dump` payload. `ttl_millis` of 0 means no expiry.
     */
    pub async fn restore(&mut self, key: impl ToArg, ttl_millis: u64, payload: impl ToArg) -> Result<()> {
        let command = RESTORE.command().arg(key).arg(ttl_millis).arg(payload);
        self.run(&RESTORE, command).await
    }

    /// `restore` overwriting an existing key
    pub async fn restore_replace(
        &mut self,
        key: impl ToArg,
        ttl_millis: u64,
        payload: impl ToArg,
    ) -> Result<()> {
        let command = RESTORE.command().arg(key).arg(ttl_millis).arg(payload).arg("REPLACE");
        self.run(&RESTORE, command).await
    }

    pub async fn expire(&mut self, key: impl ToArg, seconds: i64) -> Result<bool> {
        self.run(&EXPIRE, EXPIRE.command().arg(key).arg(seconds)).await
    }

    pub async fn pexpire(&mut self, key: impl ToArg, millis: i64) -> Result<bool> {
        self.run(&PEXPIRE, PEXPIRE.command().arg(key).arg(millis)).await
    }

    /// A timestamp in the past deletes the key.
    pub async fn expire_at(&mut self, key: impl ToArg, unix_seconds: i64) -> Result<bool> {
        self.run(&EXPIREAT, EXPIREAT.command().arg(key).arg(unix_seconds)).await
    }

    pub async fn pexpire_at(&mut self, key: impl ToArg, unix_millis: i64) -> Result<bool> {
        self.run(&PEXPIREAT, PEXPIREAT.command().arg(key).arg(unix_millis)).await
    }

    /// Seconds left; -1 without expiry, -2 for a missing key
    pub async fn ttl(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&TTL, TTL.command().arg(key)).await
    }

    pub async fn pttl(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&PTTL, PTTL.command().arg(key)).await
    }

    pub async fn touch<K: ToArg>(&mut self, keys: &[K]) -> Result<i64> {
        require_non_empty(TOUCH.name, "key", keys)?;
        let mut command = TOUCH.command();
        command.extend(keys);
        self.run(&TOUCH, command).await
    }

    pub async fn del<K: ToArg>(&mut self, keys: &[K]) -> Result<i64> {
        require_non_empty(DEL.name, "key", keys)?;
        let mut command = DEL.command();
        command.extend(keys);
        self.run(&DEL, command).await
    }

    /// `del` with the memory reclaimed in the background
    pub async fn unlink<K: ToArg>(&mut self, keys: &[K]) -> Result<i64> {
        require_non_empty(UNLINK.name, "key", keys)?;
        let mut command = UNLINK.command();
        command.extend(keys);
        self.run(&UNLINK, command).await
    }

    pub async fn move_key(&mut self, key: impl ToArg, db: u32) -> Result<bool> {
        self.run(&MOVE, MOVE.command().arg(key).arg(db)).await
    }

    pub async fn echo(&mut self, message: impl ToArg) -> Result<Bytes> {
        self.run(&ECHO, ECHO.command().arg(message)).await
    }

    pub async fn ping(&mut self) -> Result<String> {
        self.run(&PING, PING.command()).await
    }

    /**
     * Sorted copy of a list, set or sorted set. Elements fetched through a
     * `GET` pattern that matches no key come back as `None`.
     */
    pub async fn sort(&mut self, key: impl ToArg, params: &SortParams) -> Result<Vec<Option<Bytes>>> {
        let mut command = SORT.command().arg(key);
        params.append_to(&mut command);
        self.run(&SORT, command).await
    }

    /**
     * One page of the keyspace. Start from [`SCAN_START`](crate::types::SCAN_START)
     * and feed back the returned cursor until the page reports completion.
     */
    pub async fn scan(&mut self, cursor: &str, params: &ScanParams) -> Result<ScanResult<Bytes>> {
        let mut command = SCAN.command().arg(cursor);
        params.append_to(&mut command)?;
        self.run(&SCAN, command).await
    }
}
