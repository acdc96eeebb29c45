use bytes::Bytes;

use crate::{
    error::{Error, Result},
    resp::command::{Command, ToArg},
};

/// Where LINSERT puts the new element relative to the pivot.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPosition {
    BEFORE,
    AFTER,
}

impl ToArg for ListPosition {
    fn to_arg(&self) -> Bytes {
        Bytes::from_static(match self {
            ListPosition::BEFORE => b"BEFORE",
            ListPosition::AFTER => b"AFTER",
        })
    }
}

/**
 * LPOS modifiers: `RANK` picks the nth match (negative counts from the tail),
 * `MAXLEN` caps how many elements are compared.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LPosParams {
    pub rank: Option<i64>,
    pub max_len: Option<u64>,
}

impl LPosParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn max_len(mut self, max_len: u64) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub(crate) fn append_to(&self, command: &mut Command) -> Result<()> {
        if self.rank == Some(0) {
            return Err(Error::argument(command.name(), "RANK can't be zero"));
        }
        command.option("RANK", self.rank);
        command.option("MAXLEN", self.max_len);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lpos_params_append_rank_then_maxlen() {
        let mut command = Command::new("LPOS").arg("l").arg("x");
        LPosParams::new().max_len(100).rank(-2).append_to(&mut command).unwrap();

        let args: Vec<String> = command.args().iter().map(|a| String::from_utf8_lossy(a).into_owned()).collect();
        assert_eq!(vec!["l", "x", "RANK", "-2", "MAXLEN", "100"], args);
    }

    #[test]
    fn lpos_rejects_zero_rank() {
        let mut command = Command::new("LPOS").arg("l").arg("x");
        let result = LPosParams::new().rank(0).append_to(&mut command);

        assert!(matches!(result, Err(Error::Argument { command: "LPOS", .. })));
    }
}
