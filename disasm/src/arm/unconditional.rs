use crate::bitwise::Bits;
use crate::instruction::{Decoded, InstructionKind};

use super::load_store;

/// `PLD [Rn, <offset>]`, the only defined opcode in `1111 0xxx`.
pub fn preload(op_code: u32, _address: u32) -> Decoded {
    if op_code & 0x0D70_F000 != 0x0550_F000 {
        tracing::debug!("ARM {op_code:#010x}: unconditional space, not a preload");
        return Decoded::undefined();
    }

    let rn = op_code.get_bits(16..=19);
    let (_, offset) = load_store::single_offset(op_code);
    let body = if offset.is_empty() {
        format!("PLD [r{rn}]")
    } else {
        format!("PLD [r{rn}, {offset}]")
    };

    Decoded::new(InstructionKind::Pld, body)
}

/// `SRS<mode> SP{!}, #<cpu mode>` and `RFE<mode> Rn{!}`.
pub fn return_from_exception(op_code: u32, _address: u32) -> Decoded {
    let write_back = if op_code.get_bit(21) { "!" } else { "" };
    let mode = match op_code.get_bits(23..=24) {
        0b00 => "DA",
        0b01 => "",
        0b10 => "DB",
        _ => "IB",
    };

    match op_code & 0x0E50_0000 {
        0x0840_0000 => Decoded::new(
            InstructionKind::Srs,
            format!("SRS{mode} SP{write_back}, #{}", op_code.get_bits(0..=4)),
        ),
        0x0810_0000 => Decoded::new(
            InstructionKind::Rfe,
            format!("RFE{mode} r{}{write_back}", op_code.get_bits(16..=19)),
        ),
        _ => Decoded::undefined(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preload_offsets() {
        let decoded = preload(0xF5D1_F000, 0);
        assert_eq!(decoded.kind, InstructionKind::Pld);
        assert_eq!(decoded.body, "PLD [r1]");

        assert_eq!(preload(0xF5D1_F004, 0).body, "PLD [r1, #0x4]");
        assert_eq!(preload(0xF551_F004, 0).body, "PLD [r1, #-0x4]");
        assert_eq!(preload(0xF7D1_F002, 0).body, "PLD [r1, r2]");
        assert_eq!(preload(0xF7D1_F102, 0).body, "PLD [r1, r2, LSL #0x2]");
    }

    #[test]
    fn not_a_preload() {
        // Rd field is not 1111.
        let decoded = preload(0xF5D1_0000, 0);
        assert_eq!(decoded.kind, InstructionKind::Undefined);
        assert_eq!(decoded.body, "UNDEFINED INSTRUCTION");
    }

    #[test]
    fn store_return_state() {
        let decoded = return_from_exception(0xF96D_0513, 0);
        assert_eq!(decoded.kind, InstructionKind::Srs);
        assert_eq!(decoded.body, "SRSDB SP!, #19");
    }

    #[test]
    fn return_from_exception_modes() {
        let decoded = return_from_exception(0xF8BD_0A00, 0);
        assert_eq!(decoded.kind, InstructionKind::Rfe);
        assert_eq!(decoded.body, "RFE r13!");

        assert_eq!(return_from_exception(0xF810_0A00, 0).body, "RFEDA r0");
        assert_eq!(return_from_exception(0xF991_0A00, 0).body, "RFEIB r1");
    }

    #[test]
    fn neither_srs_nor_rfe() {
        assert_eq!(
            return_from_exception(0xF800_0000, 0).kind,
            InstructionKind::Undefined
        );
    }
}
