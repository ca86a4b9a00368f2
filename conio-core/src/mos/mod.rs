//! Acorn MOS call boundary.
//!
//! This module describes the fixed OS entry points the console runtime
//! reaches through, and the register file they pass values in.

pub mod vdu;

pub use vdu::{VduCommand, VduDecoder};

/// MOS entry points used by the console runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum OsCall {
    /// &FFE0: Read character (blocking), result in A
    Rdch = 0xFFE0,
    /// &FFE7: Write newline (LF, CR)
    Newl = 0xFFE7,
    /// &FFED: Write CR, LF
    Crlf = 0xFFED,
    /// &FFEE: Write character held in A
    Wrch = 0xFFEE,
}

impl OsCall {
    /// Entry point address of this call.
    pub fn vector(self) -> u16 {
        self as u16
    }

    /// Conventional MOS name, used in trace output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rdch => "OSRDCH",
            Self::Newl => "OSNEWL",
            Self::Crlf => "OSCRLF",
            Self::Wrch => "OSWRCH",
        }
    }
}

impl TryFrom<u16> for OsCall {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0xFFE0 => Ok(Self::Rdch),
            0xFFE7 => Ok(Self::Newl),
            0xFFED => Ok(Self::Crlf),
            0xFFEE => Ok(Self::Wrch),
            _ => Err(value),
        }
    }
}

/// Entry point addresses.
pub mod vector {
    /// OSRDCH
    pub const OSRDCH: u16 = 0xFFE0;
    /// OSNEWL
    pub const OSNEWL: u16 = 0xFFE7;
    /// OSCRLF
    pub const OSCRLF: u16 = 0xFFED;
    /// OSWRCH
    pub const OSWRCH: u16 = 0xFFEE;
}

/// Key code OSRDCH returns alongside carry when Escape is pending.
pub const ESCAPE: u8 = 0x1B;

/// 6502 registers as seen across an OS call.
///
/// Values travel in and out of the MOS through these registers only. An
/// input call leaves its result in `a`; anything that wraps it has to copy
/// `a` out before the register file is reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Carry flag. Set by OSRDCH on an Escape condition.
    pub carry: bool,
}

impl Registers {
    /// Register file with A preloaded, as for an OSWRCH call.
    pub fn with_a(a: u8) -> Self {
        Self {
            a,
            ..Self::default()
        }
    }

    /// Byte the last call returned in A.
    pub fn result(&self) -> u8 {
        self.a
    }

    /// Whether the last OSRDCH reported an Escape condition.
    pub fn escape(&self) -> bool {
        self.carry && self.a == ESCAPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_lookup() {
        assert_eq!(OsCall::try_from(0xFFEE_u16), Ok(OsCall::Wrch));
        assert_eq!(OsCall::try_from(vector::OSRDCH), Ok(OsCall::Rdch));
        assert_eq!(OsCall::try_from(0xFFF4_u16), Err(0xFFF4));
    }

    #[test]
    fn test_vector_round_trip() {
        for call in [OsCall::Rdch, OsCall::Newl, OsCall::Crlf, OsCall::Wrch] {
            assert_eq!(OsCall::try_from(call.vector()), Ok(call));
        }
    }

    #[test]
    fn test_escape_needs_carry() {
        let mut regs = Registers::with_a(ESCAPE);
        assert!(!regs.escape());
        regs.carry = true;
        assert!(regs.escape());
    }
}
