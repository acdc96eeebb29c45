use crate::resp::command::Command;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZAddExistFlag {
    /// Only add new members
    NX,
    /// Only update existing members
    XX,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZAddCompareFlag {
    /// Only update when the new score is greater
    GT,
    /// Only update when the new score is lower
    LT,
}

/**
 * ZADD modifiers. With `changed` set the reply counts updated members too,
 * not just added ones.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZAddParams {
    pub exist_flag: Option<ZAddExistFlag>,
    pub compare_flag: Option<ZAddCompareFlag>,
    pub changed: bool,
}

impl ZAddParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nx(mut self) -> Self {
        self.exist_flag = Some(ZAddExistFlag::NX);
        self
    }

    pub fn xx(mut self) -> Self {
        self.exist_flag = Some(ZAddExistFlag::XX);
        self
    }

    pub fn gt(mut self) -> Self {
        self.compare_flag = Some(ZAddCompareFlag::GT);
        self
    }

    pub fn lt(mut self) -> Self {
        self.compare_flag = Some(ZAddCompareFlag::LT);
        self
    }

    pub fn ch(mut self) -> Self {
        self.changed = true;
        self
    }

    pub(crate) fn append_to(&self, command: &mut Command) {
        append_exist_flag(self.exist_flag, command);
        match self.compare_flag {
            Some(ZAddCompareFlag::GT) => command.push("GT"),
            Some(ZAddCompareFlag::LT) => command.push("LT"),
            None => {}
        }
        command.flag(self.changed, "CH");
    }
}

/**
 * Conditional increment, sent as `ZADD key [NX|XX] INCR increment member`.
 * The store answers null when the condition skipped the update.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZIncrByParams {
    pub exist_flag: Option<ZAddExistFlag>,
}

impl ZIncrByParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nx(mut self) -> Self {
        self.exist_flag = Some(ZAddExistFlag::NX);
        self
    }

    pub fn xx(mut self) -> Self {
        self.exist_flag = Some(ZAddExistFlag::XX);
        self
    }

    pub(crate) fn append_to(&self, command: &mut Command) {
        append_exist_flag(self.exist_flag, command);
        command.push("INCR");
    }
}

fn append_exist_flag(flag: Option<ZAddExistFlag>, command: &mut Command) {
    match flag {
        Some(ZAddExistFlag::NX) => command.push("NX"),
        Some(ZAddExistFlag::XX) => command.push("XX"),
        None => {}
    }
}
