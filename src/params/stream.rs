use bytes::Bytes;

use crate::{
    resp::command::{Command, ToArg},
    types::StreamEntryId,
};

/// An id as written in a request, including the special forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamId {
    /// `*`: let the store generate the id (XADD)
    Auto,
    /// `-`: smallest id in the stream (XRANGE)
    Min,
    /// `+`: greatest id in the stream (XRANGE)
    Max,
    /// `$`: the last id at the time of the call (XGROUP)
    Last,
    Exact(StreamEntryId),
}

impl From<StreamEntryId> for StreamId {
    fn from(id: StreamEntryId) -> Self {
        StreamId::Exact(id)
    }
}

impl ToArg for StreamId {
    fn to_arg(&self) -> Bytes {
        match self {
            StreamId::Auto => Bytes::from_static(b"*"),
            StreamId::Min => Bytes::from_static(b"-"),
            StreamId::Max => Bytes::from_static(b"+"),
            StreamId::Last => Bytes::from_static(b"$"),
            StreamId::Exact(id) => id.to_arg(),
        }
    }
}

impl ToArg for StreamEntryId {
    fn to_arg(&self) -> Bytes {
        Bytes::from(self.to_string())
    }
}

/**
 * `MAXLEN [~] n`. Approximate trimming lets the store trim whole nodes only,
 * leaving a few more entries than `max_len`.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamTrim {
    pub max_len: u64,
    pub approximate: bool,
}

impl StreamTrim {
    pub const fn exact(max_len: u64) -> Self {
        Self { max_len, approximate: false }
    }

    pub const fn approximate(max_len: u64) -> Self {
        Self { max_len, approximate: true }
    }

    pub(crate) fn append_to(&self, command: &mut Command) {
        command.push("MAXLEN");
        command.flag(self.approximate, "~");
        command.push(self.max_len);
    }
}

/**
 * XCLAIM modifiers: `IDLE ms` / `TIME unix-ms` reset the idle time,
 * `RETRYCOUNT n` overrides the delivery counter, `FORCE` creates missing
 * pending entries.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XClaimParams {
    pub idle: Option<u64>,
    pub time: Option<u64>,
    pub retry_count: Option<u64>,
    pub force: bool,
}

impl XClaimParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn idle(mut self, millis: u64) -> Self {
        self.idle = Some(millis);
        self
    }

    pub fn time(mut self, unix_millis: u64) -> Self {
        self.time = Some(unix_millis);
        self
    }

    pub fn retry_count(mut self, count: u64) -> Self {
        self.retry_count = Some(count);
        self
    }

    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub(crate) fn append_to(&self, command: &mut Command) {
        command.option("IDLE", self.idle);
        command.option("TIME", self.time);
        command.option("RETRYCOUNT", self.retry_count);
        command.flag(self.force, "FORCE");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(command: &Command) -> Vec<String> {
        command.args().iter().map(|arg| String::from_utf8_lossy(arg).into_owned()).collect()
    }

    #[test]
    fn special_ids_encode_as_markers() {
        let command = Command::new("XRANGE")
            .arg(StreamId::Min)
            .arg(StreamId::Max)
            .arg(StreamId::Auto)
            .arg(StreamId::Last)
            .arg(StreamId::from(StreamEntryId::new(1526919030474, 55)));

        assert_eq!(vec!["-", "+", "*", "$", "1526919030474-55"], args(&command));
    }

    #[test]
    fn trim_marks_approximation() {
        let mut command = Command::new("XTRIM").arg("s");
        StreamTrim::approximate(1000).append_to(&mut command);
        assert_eq!(vec!["s", "MAXLEN", "~", "1000"], args(&command));

        let mut command = Command::new("XTRIM").arg("s");
        StreamTrim::exact(10).append_to(&mut command);
        assert_eq!(vec!["s", "MAXLEN", "10"], args(&command));
    }

    #[test]
    fn claim_params_only_send_supplied_options() {
        let mut command = Command::new("XCLAIM");
        XClaimParams::new().append_to(&mut command);
        assert!(command.args().is_empty());

        XClaimParams::new().force().retry_count(3).idle(500).append_to(&mut command);
        assert_eq!(vec!["IDLE", "500", "RETRYCOUNT", "3", "FORCE"], args(&command));
    }
}
