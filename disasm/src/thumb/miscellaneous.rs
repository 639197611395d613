//! # Miscellaneous 16-bit Instructions
//!
//! The `1011` space, split on bits 11-8:
//!
//! ```text
//! ┌────────────┬──────────────────────────────┐
//! │ bits 11-8  │ instruction                  │
//! ├────────────┼──────────────────────────────┤
//! │ 0000       │ ADD/SUB SP, #imm             │
//! │ x0x1       │ CBZ/CBNZ                     │
//! │ 0010       │ SXTH/SXTB/UXTH/UXTB          │
//! │ x10x       │ PUSH/POP                     │
//! │ 0110       │ SETEND / CPS                 │
//! │ 1010       │ REV/REV16/REVSH              │
//! │ 1110       │ BKPT                         │
//! │ 1111       │ IT (mask != 0) / hints       │
//! │ others     │ undefined                    │
//! └────────────┴──────────────────────────────┘
//! ```

use crate::bitwise::Bits;
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};

use super::{branch, data_processing, load_store};

pub fn decode(op_code: u16, address: u32) -> Decoded {
    match op_code.get_bits(8..=11) {
        0x0 => data_processing::adjust_stack(op_code, address),
        0x1 | 0x3 | 0x9 | 0xB => branch::compare_branch(op_code, address),
        0x2 => extend(op_code),
        0x4 | 0x5 | 0xC | 0xD => load_store::push_pop(op_code, address),
        0x6 => change_state(op_code),
        0xA if op_code.get_bits(6..=7) != 0b10 => byte_reverse(op_code),
        0xE => breakpoint(op_code),
        0xF if op_code.get_bits(0..=3) != 0 => if_then(op_code),
        0xF => hint(op_code),
        _ => {
            tracing::debug!("Thumb {op_code:#06x}: unallocated miscellaneous encoding");
            Decoded::undefined()
        }
    }
}

/// Bit 7 picks unsigned, bit 6 byte over half-word.
fn extend(op_code: u16) -> Decoded {
    let sign = if op_code.get_bit(7) { 'U' } else { 'S' };
    let width = if op_code.get_bit(6) { 'B' } else { 'H' };
    let rd = op_code.get_bits(0..=2);
    let rm = op_code.get_bits(3..=5);

    Decoded::new(
        InstructionKind::Extend,
        format!("{sign}XT{width} r{rd}, r{rm}"),
    )
}

/// `SETEND BE|LE` (`1011 0110 0101 E000`) or `CPSIE`/`CPSID` with the
/// `A`, `I`, `F` flags in bits 2-0.
fn change_state(op_code: u16) -> Decoded {
    if op_code & 0x0FF0 == 0x0650 {
        let endianness = if op_code.get_bit(3) { "BE" } else { "LE" };
        return Decoded::new(InstructionKind::Setend, format!("SETEND {endianness}"));
    }

    let effect = if op_code.get_bit(4) { 'D' } else { 'E' };
    let flags: String = [(2, 'A'), (1, 'I'), (0, 'F')]
        .into_iter()
        .filter(|(bit, _)| op_code.get_bit(*bit))
        .map(|(_, flag)| flag)
        .collect();

    Decoded::new(InstructionKind::Cps, format!("CPSI{effect} {flags}"))
}

fn byte_reverse(op_code: u16) -> Decoded {
    let (kind, mnemonic) = match op_code.get_bits(6..=7) {
        0b00 => (InstructionKind::Rev, "REV"),
        0b01 => (InstructionKind::Rev16, "REV16"),
        _ => (InstructionKind::Revsh, "REVSH"),
    };
    let rd = op_code.get_bits(0..=2);
    let rm = op_code.get_bits(3..=5);

    Decoded::new(kind, format!("{mnemonic} r{rd}, r{rm}"))
}

fn breakpoint(op_code: u16) -> Decoded {
    let immediate = op_code.get_bits(0..=7);
    Decoded::new(InstructionKind::Bkpt, format!("BKPT 0x{immediate:02x}"))
}

fn hint(op_code: u16) -> Decoded {
    let hint = match op_code.get_bits(4..=7) {
        0 => "NOP",
        1 => "YIELD",
        2 => "WFE",
        3 => "WFI",
        4 => "SEV",
        _ => "HINT (UNRECOGNIZED)",
    };

    Decoded::new(InstructionKind::Hint, hint.to_owned())
}

/// `IT{x{y{z}}} <cond>`. The mask in bits 3-0 ends with a trailing 1; each
/// bit above it is compared with the low bit of the condition: equal is a
/// `T` slot, different an `E` slot.
fn if_then(op_code: u16) -> Decoded {
    let first_condition_low = op_code.get_bit(4);
    let slot = |present: bool, mask_bit: u8| {
        if !present {
            ""
        } else if op_code.get_bit(mask_bit) == first_condition_low {
            "T"
        } else {
            "E"
        }
    };
    let z = slot(op_code.get_bit(0), 1);
    let y = slot(op_code.get_bits(0..=1) != 0, 2);
    let x = slot(op_code.get_bits(0..=2) != 0, 3);
    let condition = Condition::from(op_code.get_bits(4..=7) as u8);

    Decoded::new(
        InstructionKind::IfThen,
        format!("IT{x}{y}{z} {condition}"),
    )
}
