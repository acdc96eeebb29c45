use bytes::Bytes;

use crate::{
    error::{Error, Result},
    resp::command::{Command, ToArg},
};

/**
 * Optional `SCAN` family modifiers, sent as `MATCH`, `COUNT`, `TYPE` in that order.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanParams {
    pattern: Option<Bytes>,
    count: Option<u64>,
    key_type: Option<String>,
}

impl ScanParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// `MATCH pattern`: glob filter applied by the store after fetching a page.
    pub fn pattern(mut self, pattern: impl ToArg) -> Self {
        self.pattern = Some(pattern.to_arg());
        self
    }

    /// `COUNT n`: how much work the store does per call, not an exact page size.
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// `TYPE name`: keyspace `SCAN` only.
    pub fn key_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = Some(key_type.into());
        self
    }

    pub(crate) fn append_to(&self, command: &mut Command) -> Result<()> {
        if self.key_type.is_some() && command.name() != "SCAN" {
            return Err(Error::argument(command.name(), "TYPE filter is only accepted by SCAN"));
        }
        if self.count == Some(0) {
            return Err(Error::argument(command.name(), "COUNT must be positive"));
        }

        command.option("MATCH", self.pattern.as_ref());
        command.option("COUNT", self.count);
        command.option("TYPE", self.key_type.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(command: &Command) -> Vec<String> {
        command.args().iter().map(|arg| String::from_utf8_lossy(arg).into_owned()).collect()
    }

    #[test]
    fn modifiers_follow_fixed_order() {
        let mut command = Command::new("SCAN").arg("0");
        ScanParams::new()
            .key_type("zset")
            .count(50)
            .pattern("user:*")
            .append_to(&mut command)
            .unwrap();

        assert_eq!(
            vec!["0", "MATCH", "user:*", "COUNT", "50", "TYPE", "zset"],
            args(&command)
        );
    }

    #[test]
    fn absent_modifiers_add_nothing() {
        let mut command = Command::new("HSCAN").arg("h").arg("0");
        ScanParams::new().append_to(&mut command).unwrap();

        assert_eq!(2, command.args().len());
    }

    #[test]
    fn type_filter_is_rejected_outside_keyspace_scan() {
        let mut command = Command::new("SSCAN").arg("s").arg("0");
        let result = ScanParams::new().key_type("string").append_to(&mut command);

        assert!(matches!(result, Err(Error::Argument { command: "SSCAN", .. })));
    }
}
