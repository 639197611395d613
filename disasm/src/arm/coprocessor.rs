//! # Coprocessor Instructions
//!
//! Shared by the normal space and the `1111` extension space, where the
//! condition suffix is replaced by `2` (`LDC2`, `MCR2`, ...).
//!
//! ```text
//! LDC/STC:   [cond] 110 P U N W L [ Rn ] [CRd ] [cp#] [ offset8 ]
//! MCRR/MRRC: [cond] 1100 010 L    [ Rn ] [ Rd ] [cp#] [opc] [CRm]
//! CDP:       [cond] 1110 [op1 ]   [CRn ] [CRd ] [cp#] [op2] 0 [CRm]
//! MCR/MRC:   [cond] 1110 [op1] L  [CRn ] [ Rd ] [cp#] [op2] 1 [CRm]
//! ```

use crate::bitwise::Bits;
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};

fn suffix(op_code: u32) -> &'static str {
    Condition::of_arm(op_code).coprocessor_suffix()
}

pub fn load_store_transfer(op_code: u32, _address: u32) -> Decoded {
    let condition = suffix(op_code);
    let cp = op_code.get_bits(8..=11);

    let double = match op_code & 0x0FF0_0000 {
        0x0C40_0000 => Some((InstructionKind::Mcrr, "MCRR")),
        0x0C50_0000 => Some((InstructionKind::Mrrc, "MRRC")),
        _ => None,
    };

    if let Some((kind, mnemonic)) = double {
        let opc = op_code.get_bits(4..=7);
        let rd = op_code.get_bits(12..=15);
        let rn = op_code.get_bits(16..=19);
        let crm = op_code.get_bits(0..=3);
        return Decoded::new(
            kind,
            format!("{mnemonic}{condition} p{cp}, {opc:x}, r{rd}, r{rn}, c{crm}"),
        );
    }

    let (kind, mnemonic) = if op_code.get_bit(20) {
        (InstructionKind::Ldc, "LDC")
    } else {
        (InstructionKind::Stc, "STC")
    };
    let long = if op_code.get_bit(22) { "L" } else { "" };
    let crd = op_code.get_bits(12..=15);
    let rn = op_code.get_bits(16..=19);
    let option = op_code.get_bits(0..=7);
    let offset = option << 2;
    let sign = if op_code.get_bit(23) { "" } else { "-" };

    let addressing = match op_code & 0x0120_0000 {
        0x0100_0000 => format!("[r{rn}, #{sign}{offset}]"),
        0x0120_0000 => format!("[r{rn}, #{sign}{offset}]!"),
        0x0020_0000 => format!("[r{rn}], #{sign}{offset}"),
        // Unindexed: the 8-bit field is a coprocessor option.
        _ => format!("[r{rn}], {{{option}}}"),
    };

    Decoded::new(
        kind,
        format!("{mnemonic}{condition}{long} p{cp}, c{crd}, {addressing}"),
    )
}

/// `CDP`: coprocessor internal operation, nothing moves through the core.
pub fn data_operation(op_code: u32, _address: u32) -> Decoded {
    let condition = suffix(op_code);
    let cp = op_code.get_bits(8..=11);
    let op1 = op_code.get_bits(20..=23);
    let crn = op_code.get_bits(16..=19);
    let crd = op_code.get_bits(12..=15);
    let op2 = op_code.get_bits(5..=7);
    let crm = op_code.get_bits(0..=3);

    Decoded::new(
        InstructionKind::Cdp,
        format!("CDP{condition} p{cp}, 0x{op1:02x}, c{crd}, c{crn}, c{crm}, 0x{op2:02x}"),
    )
}

pub fn register_transfer(op_code: u32, _address: u32) -> Decoded {
    let condition = suffix(op_code);
    let (kind, mnemonic) = if op_code.get_bit(20) {
        (InstructionKind::Mrc, "MRC")
    } else {
        (InstructionKind::Mcr, "MCR")
    };
    let cp = op_code.get_bits(8..=11);
    let op1 = op_code.get_bits(21..=23);
    let crn = op_code.get_bits(16..=19);
    let rd = op_code.get_bits(12..=15);
    let op2 = op_code.get_bits(5..=7);
    let crm = op_code.get_bits(0..=3);

    Decoded::new(
        kind,
        format!("{mnemonic}{condition} p{cp}, 0x{op1:02x}, r{rd}, c{crn}, c{crm}, 0x{op2:02x}"),
    )
}
