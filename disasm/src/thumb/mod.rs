//! # Thumb Instruction Classification
//!
//! 16-bit opcodes are classified on their top bits. Like the ARM side, the
//! table is walked top to bottom and the first `mask`/`value` match decodes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Thumb Instruction Formats                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  000 11          Add/subtract (register or 3-bit immediate)             │
//! │  000 xx          Move shifted register                                  │
//! │  001 xx          Move/compare/add/subtract immediate                    │
//! │  0100 0x         ALU operations, hi register operations / BX / BLX      │
//! │  0100 1          PC-relative load                                       │
//! │  0101            Load/store with register offset                        │
//! │  011 xx          Load/store with immediate offset                       │
//! │  1000            Load/store halfword                                    │
//! │  1001            SP-relative load/store                                 │
//! │  1010            Add to SP or PC                                        │
//! │  1011            Miscellaneous (see `miscellaneous`)                    │
//! │  1100            Multiple load/store                                    │
//! │  1101            Conditional branch / SVC                               │
//! │  1110 1 ...1     Undefined (odd BLX suffix)                             │
//! │  111 xx          B / BLX suffix / BL-BLX prefix / BL suffix             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod alu_instructions;
mod branch;
mod data_processing;
mod load_store;
mod miscellaneous;

use crate::instruction::Decoded;

type Handler = fn(u16, u32) -> Decoded;

/// `(mask, value, handler)`, first match wins.
static DECODE_TABLE: [(u16, u16, Handler); 15] = [
    (0xF800, 0x1800, data_processing::add_subtract),
    (0xE000, 0x0000, data_processing::shift_immediate),
    (0xE000, 0x2000, data_processing::immediate),
    (0xF800, 0x4000, data_processing::register),
    (0xF800, 0x4800, load_store::literal),
    (0xF000, 0x5000, load_store::register_offset),
    (0xE000, 0x6000, load_store::immediate_offset),
    (0xF000, 0x8000, load_store::immediate_offset),
    (0xF000, 0x9000, load_store::stack_relative),
    (0xF000, 0xA000, data_processing::add_to_stack_or_program_counter),
    (0xF000, 0xB000, miscellaneous::decode),
    (0xF000, 0xC000, load_store::multiple),
    (0xF000, 0xD000, branch::conditional),
    (0xF801, 0xE801, branch::undefined),
    (0xE000, 0xE000, branch::unconditional),
];

/// Classifies `op_code` and runs the matching sub-decoder.
///
/// Returns `None` only if no table entry claims the half-word.
pub fn decode(op_code: u16, address: u32) -> Option<Decoded> {
    DECODE_TABLE
        .iter()
        .find(|(mask, value, _)| op_code & mask == *value)
        .map(|(mask, value, handler)| {
            tracing::trace!("Thumb {op_code:#06x} matched {mask:#06x}/{value:#06x}");
            handler(op_code, address)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::InstructionKind;
    use crate::operand::{BranchTarget, Info};
    use pretty_assertions::assert_eq;

    fn decoded(op_code: u16) -> Decoded {
        decode(op_code, 0x2000).unwrap()
    }

    #[test]
    fn format_boundaries() {
        // 0x1800 is add/subtract, not a shift.
        assert_eq!(decoded(0x1800).kind, InstructionKind::Add);
        assert_eq!(decoded(0x17FF).kind, InstructionKind::Mov);
        assert_eq!(decoded(0x2000).kind, InstructionKind::Mov);
        assert_eq!(decoded(0x4000).kind, InstructionKind::And);
        assert_eq!(decoded(0x4770).kind, InstructionKind::Bx);
        assert_eq!(decoded(0x4800).kind, InstructionKind::Ldr);
        assert_eq!(decoded(0x5000).kind, InstructionKind::Str);
        assert_eq!(decoded(0x6800).kind, InstructionKind::Ldr);
        assert_eq!(decoded(0x8000).kind, InstructionKind::Strh);
        assert_eq!(decoded(0x9800).kind, InstructionKind::Ldr);
        assert_eq!(decoded(0xA800).kind, InstructionKind::Add);
        assert_eq!(decoded(0xBF00).kind, InstructionKind::Hint);
        assert_eq!(decoded(0xC800).kind, InstructionKind::Ldm);
        assert_eq!(decoded(0xD000).kind, InstructionKind::B);
        assert_eq!(decoded(0xDF00).kind, InstructionKind::Swi);
    }

    #[test]
    fn branch_space() {
        assert_eq!(decoded(0xE000).kind, InstructionKind::B);
        assert_eq!(decoded(0xE801).kind, InstructionKind::Undefined);
        assert_eq!(decoded(0xE800).kind, InstructionKind::Blx);
        assert_eq!(decoded(0xF000).kind, InstructionKind::Unknown);
        assert_eq!(decoded(0xF800).kind, InstructionKind::Bl);
        // BL suffixes may be odd, only BLX is restricted.
        assert_eq!(decoded(0xF801).kind, InstructionKind::Bl);
    }

    #[test]
    fn literal_load_body() {
        let decoded = decode(0x4A01, 0x2002).unwrap();
        assert_eq!(decoded.body, "LDR r2, [pc, #0x4] ; 0x00002008");
    }

    #[test]
    fn every_half_word_is_claimed() {
        for op_code in 0..=u16::MAX {
            assert!(decode(op_code, 0).is_some(), "{op_code:#06x}");
        }
    }

    #[test]
    fn branch_record_is_a_literal_target() {
        let decoded = decoded(0xD0FE);
        assert_eq!(decoded.body, "BEQ 0x00002000");
        assert_eq!(decoded.info, Info::Branch(BranchTarget::Address(0x2000)));
    }
}
