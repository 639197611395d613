//! # Media Instructions
//!
//! `ARMv6` SIMD and DSP additions living in the `011` space with bit 4 set.
//! Groups are tried in this order, first match wins:
//!
//! ```text
//! ┌──────────────────────────┬────────────┬─────────────────────────────────┐
//! │ Group                    │   Mask     │  Value                          │
//! ├──────────────────────────┼────────────┼─────────────────────────────────┤
//! │ parallel add/subtract    │ 0x01800000 │ 0x00000000                      │
//! │ halfword pack            │ 0x01F00020 │ 0x00800000                      │
//! │ word saturate            │ 0x01A00020 │ 0x00A00000                      │
//! │ extend (and add)         │ 0x018000F0 │ 0x00800070                      │
//! │ dual multiply            │ 0x01F00080 │ 0x01000000                      │
//! │ dual multiply long       │ 0x01F00000 │ 0x01400000                      │
//! │ most significant mult.   │ 0x01F00000 │ 0x01500000                      │
//! │ SAT16, REV, SEL, USAD8   │ 0x01F000F0 │ exact match                     │
//! └──────────────────────────┴────────────┴─────────────────────────────────┘
//! ```

use crate::bitwise::Bits;
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};

pub fn decode(op_code: u32, _address: u32) -> Decoded {
    if op_code & 0x0180_0000 == 0 {
        return parallel_add_subtract(op_code);
    }
    if op_code & 0x01F0_0020 == 0x0080_0000 {
        return pack_halfword(op_code);
    }
    if op_code & 0x01A0_0020 == 0x00A0_0000 {
        return saturate_word(op_code);
    }
    if op_code & 0x0180_00F0 == 0x0080_0070 {
        return extend(op_code);
    }
    if op_code & 0x01F0_0080 == 0x0100_0000 {
        return dual_multiply(op_code);
    }
    if op_code & 0x01F0_0000 == 0x0140_0000 {
        return dual_multiply_long(op_code);
    }
    if op_code & 0x01F0_0000 == 0x0150_0000 {
        return most_significant_multiply(op_code);
    }

    remaining(op_code)
}

fn undefined(op_code: u32) -> Decoded {
    tracing::debug!("media {op_code:#010x}: reserved encoding");
    Decoded::new(InstructionKind::Undefined, "UNDEFINED".to_owned())
}

fn unsigned_prefix(op_code: u32) -> char {
    if op_code.get_bit(22) { 'U' } else { 'S' }
}

fn parallel_add_subtract(op_code: u32) -> Decoded {
    let prefix = match op_code.get_bits(20..=22) {
        1 => "S",
        2 => "Q",
        3 => "SH",
        5 => "U",
        6 => "UQ",
        7 => "UH",
        _ => return undefined(op_code),
    };

    let (kind, operation) = match op_code.get_bits(5..=7) {
        0 => (InstructionKind::Add, "ADD16"),
        1 => (InstructionKind::Add, "ADDSUBX"),
        2 => (InstructionKind::Sub, "SUBADDX"),
        3 => (InstructionKind::Sub, "SUB16"),
        4 => (InstructionKind::Add, "ADD8"),
        7 => (InstructionKind::Sub, "SUB8"),
        _ => return undefined(op_code),
    };

    let condition = Condition::of_arm(op_code);
    let rd = op_code.get_bits(12..=15);
    let rn = op_code.get_bits(16..=19);
    let rm = op_code.get_bits(0..=3);

    Decoded::new(
        kind,
        format!("{prefix}{operation}{condition} r{rd}, r{rn}, r{rm}"),
    )
}

/// `PKHBT` shifts Rm left, `PKHTB` shifts it arithmetically right where an
/// amount of 0 means 32.
fn pack_halfword(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let mut amount = op_code.get_bits(7..=11);
    let (variant, shift) = if op_code.get_bit(6) {
        if amount == 0 {
            amount = 32;
        }
        ("TB", "ASR")
    } else {
        ("BT", "LSL")
    };
    let rd = op_code.get_bits(12..=15);
    let rn = op_code.get_bits(16..=19);
    let rm = op_code.get_bits(0..=3);

    Decoded::new(
        InstructionKind::Pack,
        format!("PKH{variant}{condition} r{rd}, r{rn}, r{rm}, {shift} #{amount}"),
    )
}

fn saturate_word(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let mut amount = op_code.get_bits(7..=11);
    let shift = if op_code.get_bit(6) {
        if amount == 0 {
            amount = 32;
        }
        "ASR"
    } else {
        "LSL"
    };
    let rd = op_code.get_bits(12..=15);
    let saturate_to = op_code.get_bits(16..=20);
    let rm = op_code.get_bits(0..=3);

    Decoded::new(
        InstructionKind::Saturate,
        format!(
            "{}SAT{condition} r{rd}, #{saturate_to}, r{rm}, {shift} #{amount}",
            unsigned_prefix(op_code)
        ),
    )
}

/// `xXTB16`/`xXTB`/`xXTH`, and the accumulating `xXTAx` forms when Rn is not
/// the PC.
fn extend(op_code: u32) -> Decoded {
    let width = match op_code.get_bits(20..=21) {
        0b00 => "B16",
        0b01 => return undefined(op_code),
        0b10 => "B",
        _ => "H",
    };
    let rotation = match op_code.get_bits(10..=11) {
        0 => "",
        1 => ", ROR #8",
        2 => ", ROR #16",
        _ => ", ROR #24",
    };

    let condition = Condition::of_arm(op_code);
    let sign = unsigned_prefix(op_code);
    let rd = op_code.get_bits(12..=15);
    let rn = op_code.get_bits(16..=19);
    let rm = op_code.get_bits(0..=3);

    if rn == 0xF {
        Decoded::new(
            InstructionKind::Mov,
            format!("{sign}XT{width}{condition} r{rd}, r{rm}{rotation}"),
        )
    } else {
        Decoded::new(
            InstructionKind::Add,
            format!("{sign}XTA{width}{condition} r{rd}, r{rn}, r{rm}{rotation}"),
        )
    }
}

fn dual_multiply(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let operation = if op_code.get_bit(6) { 'S' } else { 'A' };
    let exchange = if op_code.get_bit(5) { "X" } else { "" };
    let rd = op_code.get_bits(16..=19);
    let rn = op_code.get_bits(12..=15);
    let rs = op_code.get_bits(8..=11);
    let rm = op_code.get_bits(0..=3);

    let body = if rn == 0xF {
        format!("SMU{operation}D{exchange}{condition} r{rd}, r{rm}, r{rs}")
    } else {
        format!("SML{operation}D{exchange}{condition} r{rd}, r{rm}, r{rs}, r{rn}")
    };

    Decoded::new(InstructionKind::DualMultiply, body)
}

fn dual_multiply_long(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let operation = if op_code.get_bit(6) { 'S' } else { 'A' };
    let exchange = if op_code.get_bit(5) { "X" } else { "" };
    let rd_lo = op_code.get_bits(12..=15);
    let rd_hi = op_code.get_bits(16..=19);
    let rs = op_code.get_bits(8..=11);
    let rm = op_code.get_bits(0..=3);

    Decoded::new(
        InstructionKind::DualMultiply,
        format!("SML{operation}LD{exchange}{condition} r{rd_lo}, r{rd_hi}, r{rm}, r{rs}"),
    )
}

/// `SMMLA`, `SMMLS` and `SMMUL`. Bits 7:6 must be `00` (accumulate or
/// multiply) or `11` (subtract, which needs an accumulator).
fn most_significant_multiply(op_code: u32) -> Decoded {
    let rn = op_code.get_bits(12..=15);
    let valid = match op_code.get_bits(6..=7) {
        0b00 => true,
        0b11 => rn != 0xF,
        _ => false,
    };
    if !valid {
        return undefined(op_code);
    }

    let condition = Condition::of_arm(op_code);
    let operation = if op_code.get_bit(6) { 'S' } else { 'A' };
    let round = if op_code.get_bit(5) { "R" } else { "" };
    let rd = op_code.get_bits(16..=19);
    let rs = op_code.get_bits(8..=11);
    let rm = op_code.get_bits(0..=3);

    let body = if rn == 0xF {
        format!("SMMUL{round}{condition} r{rd}, r{rm}, r{rs}")
    } else {
        format!("SMML{operation}{round}{condition} r{rd}, r{rm}, r{rs}, r{rn}")
    };

    Decoded::new(InstructionKind::MostSignificantMultiply, body)
}

fn remaining(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let rd = op_code.get_bits(12..=15);
    let rn = op_code.get_bits(16..=19);
    let rs = op_code.get_bits(8..=11);
    let rm = op_code.get_bits(0..=3);

    let (kind, mnemonic) = match op_code & 0x01F0_00F0 {
        0x00A0_0030 | 0x00E0_0030 => {
            return Decoded::new(
                InstructionKind::Saturate,
                format!(
                    "{}SAT16{condition} r{rd}, #{rn}, r{rm}",
                    unsigned_prefix(op_code)
                ),
            );
        }
        0x0080_00B0 => {
            return Decoded::new(
                InstructionKind::Sel,
                format!("SEL{condition} r{rd}, r{rn}, r{rm}"),
            );
        }
        // Here bits 19-16 are the destination and 15-12 the accumulator.
        0x0180_0010 if rd == 0xF => {
            return Decoded::new(
                InstructionKind::Usad8,
                format!("USAD8{condition} r{rn}, r{rm}, r{rs}"),
            );
        }
        0x0180_0010 => {
            return Decoded::new(
                InstructionKind::Usad8,
                format!("USADA8{condition} r{rn}, r{rm}, r{rs}, r{rd}"),
            );
        }
        0x00B0_0030 => (InstructionKind::Rev, "REV"),
        0x00B0_00B0 => (InstructionKind::Rev16, "REV16"),
        0x00F0_00B0 => (InstructionKind::Revsh, "REVSH"),
        _ => return undefined(op_code),
    };

    Decoded::new(kind, format!("{mnemonic}{condition} r{rd}, r{rm}"))
}
