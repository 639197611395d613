use crate::bitwise::Bits;
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};

use super::load_store;

/// Entry for the `[27:25] = 000`, bits 7 and 4 set space. Multiplies and swaps
/// are recognized on bits 7:4 = `1001`; everything else is an extra load/store.
pub fn decode(op_code: u32, address: u32) -> Decoded {
    if op_code.get_bits(4..=7) == 0b1001 {
        match op_code & 0x0F80_0000 {
            0x0000_0000 => return multiply(op_code),
            0x0080_0000 => return multiply_long(op_code),
            0x0100_0000 => return swap(op_code),
            _ => {}
        }
    }

    load_store::decode_extra(op_code, address)
}

fn multiply(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let s = if op_code.get_bit(20) { "S" } else { "" };
    let rd = op_code.get_bits(16..=19);
    let rn = op_code.get_bits(12..=15);
    let rs = op_code.get_bits(8..=11);
    let rm = op_code.get_bits(0..=3);

    if op_code.get_bit(21) {
        Decoded::new(
            InstructionKind::Mla,
            format!("MLA{condition}{s} r{rd}, r{rm}, r{rs}, r{rn}"),
        )
    } else {
        Decoded::new(
            InstructionKind::Mul,
            format!("MUL{condition}{s} r{rd}, r{rm}, r{rs}"),
        )
    }
}

fn multiply_long(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let s = if op_code.get_bit(20) { "S" } else { "" };
    let rd_lo = op_code.get_bits(16..=19);
    let rd_hi = op_code.get_bits(12..=15);
    let rs = op_code.get_bits(8..=11);
    let rm = op_code.get_bits(0..=3);

    let (kind, mnemonic) = match op_code.get_bits(21..=22) {
        0b00 => (InstructionKind::Umull, "UMULL"),
        0b01 => (InstructionKind::Umlal, "UMLAL"),
        0b10 => (InstructionKind::Smull, "SMULL"),
        _ => (InstructionKind::Smlal, "SMLAL"),
    };

    Decoded::new(
        kind,
        format!("{mnemonic}{condition}{s} r{rd_lo}, r{rd_hi}, r{rm}, r{rs}"),
    )
}

fn swap(op_code: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let rn = op_code.get_bits(16..=19);
    let rd = op_code.get_bits(12..=15);
    let rm = op_code.get_bits(0..=3);

    let (kind, mnemonic) = if op_code.get_bit(22) {
        (InstructionKind::Swpb, "SWPB")
    } else {
        (InstructionKind::Swp, "SWP")
    };

    Decoded::new(kind, format!("{mnemonic}{condition} r{rd}, r{rm}, [r{rn}]"))
}
