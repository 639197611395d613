//! # Condition Field
//!
//! Every ARM opcode carries a 4-bit condition in bits 31-28. Thumb only has
//! one in the conditional branch (bits 11-8) and in `IT`.
//!
//! ```text
//! ┌───────┬────────┬─────────────────────┐
//! │ Code  │ Suffix │     Meaning         │
//! ├───────┼────────┼─────────────────────┤
//! │ 0000  │   EQ   │ Equal               │
//! │ 0001  │   NE   │ Not equal           │
//! │ 0010  │   CS   │ Carry set           │
//! │ 0011  │   CC   │ Carry clear         │
//! │ 0100  │   MI   │ Minus / negative    │
//! │ 0101  │   PL   │ Plus / non-negative │
//! │ 0110  │   VS   │ Overflow set        │
//! │ 0111  │   VC   │ Overflow clear      │
//! │ 1000  │   HI   │ Higher (unsigned)   │
//! │ 1001  │   LS   │ Lower/same (unsig)  │
//! │ 1010  │   GE   │ ≥ (signed)          │
//! │ 1011  │   LT   │ < (signed)          │
//! │ 1100  │   GT   │ > (signed)          │
//! │ 1101  │   LE   │ ≤ (signed)          │
//! │ 1110  │        │ Always              │
//! │ 1111  │   NV   │ Never / extension   │
//! └───────┴────────┴─────────────────────┘
//! ```
//!
//! `1111` is "never" on old cores. From `ARMv5` on it selects the
//! unconditional extension space instead, where coprocessor instructions
//! print a literal `2` in place of the suffix (`MCR2`, `LDC2`, ...).

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;

/// Mnemonic suffix for each condition code, indexed by the raw field.
pub static CONDITION_SUFFIXES: [&str; 16] = [
    "EQ", "NE", "CS", "CC", "MI", "PL", "VS", "VC", "HI", "LS", "GE", "LT", "GT", "LE", "", "NV",
];

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum Condition {
    EQ = 0x0,
    NE = 0x1,
    CS = 0x2,
    CC = 0x3,
    MI = 0x4,
    PL = 0x5,
    VS = 0x6,
    VC = 0x7,
    HI = 0x8,
    LS = 0x9,
    GE = 0xA,
    LT = 0xB,
    GT = 0xC,
    LE = 0xD,
    AL = 0xE,
    NV = 0xF,
}

impl Condition {
    /// Condition of a 32-bit ARM opcode (bits 31-28).
    #[must_use]
    pub fn of_arm(op_code: u32) -> Self {
        Self::from(op_code.get_bits(28..=31) as u8)
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        CONDITION_SUFFIXES[self as usize]
    }

    /// Suffix used by coprocessor instructions, which read `1111` as the
    /// extension space rather than "never".
    #[must_use]
    pub fn coprocessor_suffix(self) -> &'static str {
        match self {
            Self::NV => "2",
            _ => CONDITION_SUFFIXES[self as usize],
        }
    }
}

impl From<u8> for Condition {
    fn from(item: u8) -> Self {
        match item & 0xF {
            0x0 => Self::EQ,
            0x1 => Self::NE,
            0x2 => Self::CS,
            0x3 => Self::CC,
            0x4 => Self::MI,
            0x5 => Self::PL,
            0x6 => Self::VS,
            0x7 => Self::VC,
            0x8 => Self::HI,
            0x9 => Self::LS,
            0xA => Self::GE,
            0xB => Self::LT,
            0xC => Self::GT,
            0xD => Self::LE,
            0xE => Self::AL,
            _ => Self::NV,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn suffix_matches_table_for_every_field_value() {
        for field in 0..16_u8 {
            let condition = Condition::from(field);
            assert_eq!(condition as u8, field);
            assert_eq!(condition.suffix(), CONDITION_SUFFIXES[field as usize]);
            assert_eq!(condition.to_string(), CONDITION_SUFFIXES[field as usize]);
        }

        assert_eq!(Condition::from(14).suffix(), "");
        assert_eq!(Condition::from(15).suffix(), "NV");
        assert_eq!(Condition::from(0).suffix(), "EQ");
    }

    #[test]
    fn condition_of_arm_opcode() {
        assert_eq!(Condition::of_arm(0xE1A0_0000), Condition::AL);
        assert_eq!(Condition::of_arm(0x0A00_0000), Condition::EQ);
        assert_eq!(Condition::of_arm(0xF000_0000), Condition::NV);
    }

    #[test]
    fn coprocessor_suffix() {
        assert_eq!(Condition::NV.coprocessor_suffix(), "2");
        assert_eq!(Condition::AL.coprocessor_suffix(), "");
        assert_eq!(Condition::NE.coprocessor_suffix(), "NE");
    }
}
