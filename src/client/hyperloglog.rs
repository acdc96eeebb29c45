use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    descriptor::{PFADD, PFCOUNT},
    error::Result,
    resp::command::ToArg,
};

use super::Client;

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// True when the estimate changed. With no elements it only creates the key.
    pub async fn pfadd<E: ToArg>(&mut self, key: impl ToArg, elements: &[E]) -> Result<bool> {
        let mut command = PFADD.command().arg(key);
        command.extend(elements);
        self.run(&PFADD, command).await
    }

    pub async fn pfcount(&mut self, key: impl ToArg) -> Result<i64> {
        self.run(&PFCOUNT, PFCOUNT.command().arg(key)).await
    }
}
