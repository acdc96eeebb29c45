use crate::{
    error::{Error, Result},
    resp::command::Command,
};

/**
 * Existence condition for SET
 */
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetCommandExistFlag {
    NX,
    XX,
}

/**
 * Expiry for SET, in the units the option name says
 */
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetCommandTTLFlag {
    EX(u64),
    PX(u64),
    EXAT(u64),
    PXAT(u64),
    KEEPTTL,
}

/**
 * SET modifiers. A SET sent with an exist flag may be skipped by the store.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetParams {
    pub exist_flag: Option<SetCommandExistFlag>,
    pub ttl_flag: Option<SetCommandTTLFlag>,
}

impl SetParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nx(mut self) -> Self {
        self.exist_flag = Some(SetCommandExistFlag::NX);
        self
    }

    pub fn xx(mut self) -> Self {
        self.exist_flag = Some(SetCommandExistFlag::XX);
        self
    }

    pub fn ttl(mut self, ttl: SetCommandTTLFlag) -> Self {
        self.ttl_flag = Some(ttl);
        self
    }

    pub(crate) fn append_to(&self, command: &mut Command) -> Result<()> {
        match self.exist_flag {
            Some(SetCommandExistFlag::NX) => command.push("NX"),
            Some(SetCommandExistFlag::XX) => command.push("XX"),
            None => {}
        }

        let (option, value) = match self.ttl_flag {
            Some(SetCommandTTLFlag::EX(seconds)) => ("EX", seconds),
            Some(SetCommandTTLFlag::PX(millis)) => ("PX", millis),
            Some(SetCommandTTLFlag::EXAT(seconds)) => ("EXAT", seconds),
            Some(SetCommandTTLFlag::PXAT(millis)) => ("PXAT", millis),
            Some(SetCommandTTLFlag::KEEPTTL) => {
                command.push("KEEPTTL");
                return Ok(());
            }
            None => return Ok(()),
        };

        if value == 0 {
            return Err(Error::argument(command.name(), format!("{} must be positive", option)));
        }
        command.push(option);
        command.push(value);
        Ok(())
    }
}

/**
 * Byte range for BITPOS; an end is only sent together with a start
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitPosParams {
    range: Option<(i64, Option<i64>)>,
}

impl BitPosParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(start: i64) -> Self {
        Self { range: Some((start, None)) }
    }

    pub fn range(start: i64, end: i64) -> Self {
        Self { range: Some((start, Some(end))) }
    }

    pub(crate) fn append_to(&self, command: &mut Command) {
        if let Some((start, end)) = self.range {
            command.push(start);
            if let Some(end) = end {
                command.push(end);
            }
        }
    }
}

/// Integer type of a BITFIELD slot, `i<bits>` or `u<bits>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitFieldType {
    signed: bool,
    bits: u8,
}

impl BitFieldType {
    pub const fn signed(bits: u8) -> Self {
        Self { signed: true, bits }
    }

    pub const fn unsigned(bits: u8) -> Self {
        Self { signed: false, bits }
    }

    fn token(&self, command: &'static str) -> Result<String> {
        let max_bits = if self.signed { 64 } else { 63 };
        if self.bits == 0 || self.bits > max_bits {
            return Err(Error::argument(
                command,
                format!("bitfield width must be 1..={} bits, got {}", max_bits, self.bits),
            ));
        }
        Ok(format!("{}{}", if self.signed { 'i' } else { 'u' }, self.bits))
    }
}

/// Slot offset: in bits, or `#n` as a multiple of the type width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitFieldOffset {
    Bits(u64),
    Slot(u64),
}

impl BitFieldOffset {
    fn token(&self) -> String {
        match self {
            BitFieldOffset::Bits(bits) => bits.to_string(),
            BitFieldOffset::Slot(slot) => format!("#{}", slot),
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitFieldOverflow {
    WRAP,
    SAT,
    FAIL,
}

/// One BITFIELD sub-operation. Each GET/SET/INCRBY yields one reply element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitFieldOp {
    Get { field: BitFieldType, offset: BitFieldOffset },
    Set { field: BitFieldType, offset: BitFieldOffset, value: i64 },
    IncrBy { field: BitFieldType, offset: BitFieldOffset, increment: i64 },
    Overflow(BitFieldOverflow),
}

impl BitFieldOp {
    pub fn is_read_only(&self) -> bool {
        matches!(self, BitFieldOp::Get { .. })
    }

    pub(crate) fn append_to(&self, command: &mut Command) -> Result<()> {
        match self {
            BitFieldOp::Get { field, offset } => {
                command.push("GET");
                command.push(field.token(command.name())?);
                command.push(offset.token());
            }
            BitFieldOp::Set { field, offset, value } => {
                command.push("SET");
                command.push(field.token(command.name())?);
                command.push(offset.token());
                command.push(*value);
            }
            BitFieldOp::IncrBy { field, offset, increment } => {
                command.push("INCRBY");
                command.push(field.token(command.name())?);
                command.push(offset.token());
                command.push(*increment);
            }
            BitFieldOp::Overflow(overflow) => {
                command.push("OVERFLOW");
                command.push(match overflow {
                    BitFieldOverflow::WRAP => "WRAP",
                    BitFieldOverflow::SAT => "SAT",
                    BitFieldOverflow::FAIL => "FAIL",
                });
            }
        }
        Ok(())
    }
}
