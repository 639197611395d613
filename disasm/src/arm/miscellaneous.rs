//! # Miscellaneous Instructions
//!
//! The hole in the data-processing space left by `TST`/`TEQ`/`CMP`/`CMN`
//! without the S bit (`cond 0001 0xx0 .... .... .... xxx0 ....`).
//!
//! ```text
//! bits 7-4 │ op (22-21) │ instruction
//! ─────────┼────────────┼──────────────────────────
//!   0000   │    any     │ MRS / MSR (register)
//!   0001   │     01     │ BX
//!   0001   │     11     │ CLZ
//!   0010   │     01     │ BXJ
//!   0011   │     01     │ BLX (register)
//!   0101   │    any     │ QADD / QSUB / QDADD / QDSUB
//!   0111   │     01     │ BKPT
//!   1yx0   │    any     │ SMLA<x><y> / SMLAW<y> / SMULW<y> / SMLAL<x><y> / SMUL<x><y>
//! ```
//!
//! Checks run in table order and the last one that matches decodes the
//! instruction. No two rows overlap, so at most one ever does.

use crate::bitwise::{Bits, ror};
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};
use crate::operand::{BranchTarget, Info};

static CHECKS: [(u32, u32, fn(u32) -> Decoded); 8] = [
    (0x0000_00F0, 0x0000_0000, status_register),
    (0x0060_00F0, 0x0020_0010, branch_exchange),
    (0x0060_00F0, 0x0020_0020, branch_exchange_jazelle),
    (0x0060_00F0, 0x0060_0010, count_leading_zeros),
    (0x0060_00F0, 0x0020_0030, branch_link_exchange),
    (0x0000_00F0, 0x0000_0050, saturating_add_subtract),
    (0x0000_00F0, 0x0000_0070, breakpoint),
    (0x0000_0090, 0x0000_0080, signed_multiply),
];

pub fn decode(op_code: u32, _address: u32) -> Decoded {
    CHECKS
        .iter()
        .rev()
        .find(|(mask, value, _)| op_code & mask == *value)
        .map_or_else(
            || {
                tracing::debug!("misc group: no pattern for {op_code:#010x}");
                Decoded::undefined()
            },
            |(_, _, handler)| handler(op_code),
        )
}

/// `MRS`, `MSR` (register) and, through the main table, `MSR` (immediate).
pub fn status_register_transfer(op_code: u32, _address: u32) -> Decoded {
    status_register(op_code)
}

fn status_register(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let psr = if op_code.get_bit(22) { "SPSR" } else { "CPSR" };

    if !op_code.get_bit(21) {
        let rd = op_code.get_bits(12..=15);
        return Decoded::new(InstructionKind::Mrs, format!("MRS{condition} r{rd}, {psr}"));
    }

    let fields: String = [(16, 'c'), (17, 'x'), (18, 's'), (19, 'f')]
        .into_iter()
        .filter(|(bit, _)| op_code.get_bit(*bit))
        .map(|(_, field)| field)
        .collect();

    let source = if op_code.get_bit(25) {
        let immediate = ror(op_code.get_bits(0..=7), op_code.get_bits(8..=11) * 2);
        format!("0x{immediate:08x}")
    } else {
        format!("r{}", op_code.get_bits(0..=3))
    };

    Decoded::new(
        InstructionKind::Msr,
        format!("MSR{condition} {psr}_{fields}, {source}"),
    )
}

fn register_branch(op_code: u32, kind: InstructionKind, mnemonic: &str) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let rm = op_code.get_bits(0..=3) as u8;

    Decoded::new(kind, format!("{mnemonic}{condition} r{rm}"))
        .with_info(Info::Branch(BranchTarget::Register(rm)))
}

fn branch_exchange(op_code: u32) -> Decoded {
    register_branch(op_code, InstructionKind::Bx, "BX")
}

fn branch_exchange_jazelle(op_code: u32) -> Decoded {
    register_branch(op_code, InstructionKind::Bxj, "BXJ")
}

fn branch_link_exchange(op_code: u32) -> Decoded {
    register_branch(op_code, InstructionKind::Blx, "BLX")
}

fn count_leading_zeros(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let rd = op_code.get_bits(12..=15);
    let rm = op_code.get_bits(0..=3);

    Decoded::new(InstructionKind::Clz, format!("CLZ{condition} r{rd}, r{rm}"))
}

fn saturating_add_subtract(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let rn = op_code.get_bits(16..=19);
    let rd = op_code.get_bits(12..=15);
    let rm = op_code.get_bits(0..=3);

    let (kind, mnemonic) = match op_code.get_bits(21..=22) {
        0b00 => (InstructionKind::Qadd, "QADD"),
        0b01 => (InstructionKind::Qsub, "QSUB"),
        0b10 => (InstructionKind::Qdadd, "QDADD"),
        _ => (InstructionKind::Qdsub, "QDSUB"),
    };

    Decoded::new(kind, format!("{mnemonic}{condition} r{rd}, r{rm}, r{rn}"))
}

fn breakpoint(op_code: u32) -> Decoded {
    let immediate = (op_code.get_bits(8..=19) << 4) | op_code.get_bits(0..=3);
    Decoded::new(InstructionKind::Bkpt, format!("BKPT 0x{immediate:04x}"))
}

/// Halfword multiplies, op (22-21) selects the group, x (5) and y (6) pick
/// the bottom or top half of each operand.
fn signed_multiply(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let x_top = op_code.get_bit(5);
    let x = if x_top { "T" } else { "B" };
    let y = if op_code.get_bit(6) { "T" } else { "B" };
    let rd = op_code.get_bits(16..=19);
    let rn = op_code.get_bits(12..=15);
    let rs = op_code.get_bits(8..=11);
    let rm = op_code.get_bits(0..=3);

    match op_code.get_bits(21..=22) {
        0b00 => Decoded::new(
            InstructionKind::Smlaxy,
            format!("SMLA{x}{y}{condition} r{rd}, r{rm}, r{rs}, r{rn}"),
        ),
        0b01 if !x_top => Decoded::new(
            InstructionKind::Smlawy,
            format!("SMLAW{y}{condition} r{rd}, r{rm}, r{rs}, r{rn}"),
        ),
        0b01 => Decoded::new(
            InstructionKind::Smulwy,
            format!("SMULW{y}{condition} r{rd}, r{rm}, r{rs}"),
        ),
        // Here bits 19-16 hold RdHi and 15-12 RdLo.
        0b10 => Decoded::new(
            InstructionKind::Smlalxy,
            format!("SMLAL{x}{y}{condition} r{rn}, r{rd}, r{rm}, r{rs}"),
        ),
        _ => Decoded::new(
            InstructionKind::Smulxy,
            format!("SMUL{x}{y}{condition} r{rd}, r{rm}, r{rs}"),
        ),
    }
}
