//! # Single Data Transfer
//!
//! Word/byte loads and stores (`LDR`, `STRB`, `LDRT`, ...) and the
//! "miscellaneous" halfword, signed and doubleword forms that share the
//! multiply encoding space.
//!
//! ```text
//! LDR/STR:
//! 31-28  27-26  25  24  23  22  21  20  19-16  15-12  11-0
//! [cond] [ 01 ] [I] [P] [U] [B] [W] [L] [ Rn ] [ Rd ] [offset]
//!
//! LDRH/STRH/LDRSB/LDRSH/LDRD/STRD:
//! 31-28  27-25  24  23  22  21  20  19-16  15-12  11-8   7  6  5  4  3-0
//! [cond] [000]  [P] [U] [I] [W] [L] [ Rn ] [ Rd ] [immH] [1][S][H][1] [immL/Rm]
//! ```
//!
//! The index mode comes from P/W in both cases:
//!
//! ```text
//! P=1 W=0  →  [Rn, off]     offset
//! P=1 W=1  →  [Rn, off]!    pre-indexed
//! P=0      →  [Rn], off     post-indexed (W=1 on LDR/STR means user mode: T)
//! ```

use crate::bitwise::Bits;
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};
use crate::operand::{IndexMode, Info, LoadStoreInfo, Offset};
use crate::shift::{Shift, normalize_immediate_shift, render_immediate_shift};

/// Offset of a word/byte transfer and its text (`#-0x4`, `r2, LSL #0x2`).
/// A zero immediate renders as nothing.
pub fn single_offset(op_code: u32) -> (Offset, String) {
    let sign = if op_code.get_bit(23) { "" } else { "-" };

    if op_code.get_bit(25) {
        let rm = op_code.get_bits(0..=3) as u8;
        let (shift, amount) =
            normalize_immediate_shift(op_code.get_bits(5..=6), op_code.get_bits(7..=11));
        (
            Offset::Register { rm, shift, amount },
            render_immediate_shift(sign, rm, shift, amount),
        )
    } else {
        let offset = op_code.get_bits(0..=11);
        let text = if offset == 0 {
            String::new()
        } else {
            format!("#{sign}0x{offset:x}")
        };
        (Offset::Immediate(offset), text)
    }
}

pub fn decode_single(op_code: u32, _address: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let pre = op_code.get_bit(24);
    let up = op_code.get_bit(23);
    let byte = op_code.get_bit(22);
    let write_back = op_code.get_bit(21);
    let load = op_code.get_bit(20);
    let rn = op_code.get_bits(16..=19) as u8;
    let rd = op_code.get_bits(12..=15) as u8;

    // Post-indexed with W set forces a user mode access.
    let translated = !pre && write_back;

    let (kind, suffix) = match (load, byte, translated) {
        (true, true, true) => (InstructionKind::Ldrbt, "BT"),
        (true, true, false) => (InstructionKind::Ldrb, "B"),
        (true, false, true) => (InstructionKind::Ldrt, "T"),
        (true, false, false) => (InstructionKind::Ldr, ""),
        (false, true, true) => (InstructionKind::Strbt, "BT"),
        (false, true, false) => (InstructionKind::Strb, "B"),
        (false, false, true) => (InstructionKind::Strt, "T"),
        (false, false, false) => (InstructionKind::Str, ""),
    };
    let operation = if load { "LDR" } else { "STR" };

    let (offset, offset_text) = single_offset(op_code);
    let separated = if offset_text.is_empty() {
        offset_text
    } else {
        format!(", {offset_text}")
    };

    let index_mode = IndexMode::from_pw(pre, write_back);
    let address = match index_mode {
        IndexMode::Offset => format!("[r{rn}{separated}]"),
        IndexMode::PreIndexed => format!("[r{rn}{separated}]!"),
        IndexMode::PostIndexed => format!("[r{rn}]{separated}"),
    };

    Decoded::new(kind, format!("{operation}{condition}{suffix} r{rd}, {address}")).with_info(
        Info::LoadStore(LoadStoreInfo {
            rd,
            rn,
            up,
            index_mode,
            offset,
        }),
    )
}

/// Halfword, signed byte/halfword and doubleword transfers.
pub fn decode_extra(op_code: u32, _address: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let pre = op_code.get_bit(24);
    let up = op_code.get_bit(23);
    let immediate = op_code.get_bit(22);
    let write_back = op_code.get_bit(21);
    let load = op_code.get_bit(20);
    let signed = op_code.get_bit(6);
    let halfword = op_code.get_bit(5);
    let rn = op_code.get_bits(16..=19) as u8;
    let rd = op_code.get_bits(12..=15) as u8;

    // There are no signed stores, S=1 L=0 encodes the doubleword pair.
    let (kind, operation, suffix) = match (signed, load, halfword) {
        (true, true, true) => (InstructionKind::Ldrsh, "LDR", "SH"),
        (true, true, false) => (InstructionKind::Ldrsb, "LDR", "SB"),
        (true, false, true) => (InstructionKind::Strd, "STR", "D"),
        (true, false, false) => (InstructionKind::Ldrd, "LDR", "D"),
        (false, true, _) => (InstructionKind::Ldrh, "LDR", "H"),
        (false, false, _) => (InstructionKind::Strh, "STR", "H"),
    };

    let sign = if up { "" } else { "-" };
    let (offset, offset_text) = if immediate {
        let offset = (op_code.get_bits(8..=11) << 4) | op_code.get_bits(0..=3);
        (Offset::Immediate(offset), format!("#{sign}0x{offset:x}"))
    } else {
        let rm = op_code.get_bits(0..=3) as u8;
        (
            Offset::Register {
                rm,
                shift: Shift::Lsl,
                amount: 0,
            },
            format!("{sign}r{rm}"),
        )
    };

    let index_mode = IndexMode::from_pw(pre, write_back);
    let address = match index_mode {
        IndexMode::Offset => format!("[r{rn}, {offset_text}]"),
        IndexMode::PreIndexed => format!("[r{rn}, {offset_text}]!"),
        IndexMode::PostIndexed => format!("[r{rn}], {offset_text}"),
    };

    Decoded::new(kind, format!("{operation}{condition}{suffix} r{rd}, {address}")).with_info(
        Info::LoadStore(LoadStoreInfo {
            rd,
            rn,
            up,
            index_mode,
            offset,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decoded(decoded: Decoded) -> (InstructionKind, String, LoadStoreInfo) {
        let info = decoded.info.load_store().copied().unwrap();
        (decoded.kind, decoded.body, info)
    }

    #[test]
    fn immediate_offset_forms() {
        // LDR r0, [r1]
        let (kind, body, info) = decoded(decode_single(0xE591_0000, 0));
        assert_eq!(kind, InstructionKind::Ldr);
        assert_eq!(body, "LDR r0, [r1]");
        assert_eq!(info.index_mode, IndexMode::Offset);
        assert_eq!(info.offset, Offset::Immediate(0));

        // STR r2, [r3, #-0x4]!
        let (kind, body, info) = decoded(decode_single(0xE523_2004, 0));
        assert_eq!(kind, InstructionKind::Str);
        assert_eq!(body, "STR r2, [r3, #-0x4]!");
        assert!(!info.up);
        assert_eq!(info.index_mode.tag(), 1);

        // LDRB r0, [r1], #0x1
        let (kind, body, info) = decoded(decode_single(0xE4D1_0001, 0));
        assert_eq!(kind, InstructionKind::Ldrb);
        assert_eq!(body, "LDRB r0, [r1], #0x1");
        assert_eq!(info.index_mode, IndexMode::PostIndexed);
    }

    #[test]
    fn translated_forms() {
        // LDRT r0, [r1], #0x4
        let (kind, body, _) = decoded(decode_single(0xE4B1_0004, 0));
        assert_eq!(kind, InstructionKind::Ldrt);
        assert_eq!(body, "LDRT r0, [r1], #0x4");

        let (kind, body, _) = decoded(decode_single(0xE4E1_0000, 0));
        assert_eq!(kind, InstructionKind::Strbt);
        assert_eq!(body, "STRBT r0, [r1]");
    }

    #[test]
    fn register_offset_with_shift() {
        // LDR r0, [r1, r2, LSL #2]
        let (_, body, info) = decoded(decode_single(0xE791_0102, 0));
        assert_eq!(body, "LDR r0, [r1, r2, LSL #0x2]");
        assert_eq!(
            info.offset,
            Offset::Register {
                rm: 2,
                shift: Shift::Lsl,
                amount: 2
            }
        );

        // LDRNE r0, [r1, -r2, LSR #32]
        let (_, body, info) = decoded(decode_single(0x1711_0022, 0));
        assert_eq!(body, "LDRNE r0, [r1, -r2, LSR #0x20]");
        assert!(!info.up);

        // STR r0, [r1, r2, RRX]
        let (_, body, _) = decoded(decode_single(0xE781_0062, 0));
        assert_eq!(body, "STR r0, [r1, r2, RRX]");
    }

    #[test]
    fn halfword_and_signed() {
        // LDRH r0, [r1, #0x12]
        let (kind, body, info) = decoded(decode_extra(0xE1D1_01B2, 0));
        assert_eq!(kind, InstructionKind::Ldrh);
        assert_eq!(body, "LDRH r0, [r1, #0x12]");
        assert_eq!(info.offset, Offset::Immediate(0x12));

        // STRH r0, [r1], -r2
        let (kind, body, _) = decoded(decode_extra(0xE001_00B2, 0));
        assert_eq!(kind, InstructionKind::Strh);
        assert_eq!(body, "STRH r0, [r1], -r2");

        let (kind, body, _) = decoded(decode_extra(0xE1D1_00D0, 0));
        assert_eq!(kind, InstructionKind::Ldrsb);
        assert_eq!(body, "LDRSB r0, [r1, #0x0]");

        let (kind, _, _) = decoded(decode_extra(0xE1D1_00F0, 0));
        assert_eq!(kind, InstructionKind::Ldrsh);
    }

    #[test]
    fn doubleword() {
        // LDRD r0, [r1, #0x8]!
        let (kind, body, info) = decoded(decode_extra(0xE1E1_00D8, 0));
        assert_eq!(kind, InstructionKind::Ldrd);
        assert_eq!(body, "LDRD r0, [r1, #0x8]!");
        assert_eq!(info.index_mode, IndexMode::PreIndexed);

        let (kind, body, _) = decoded(decode_extra(0xE1C1_00F8, 0));
        assert_eq!(kind, InstructionKind::Strd);
        assert_eq!(body, "STRD r0, [r1, #0x8]");
    }
}
