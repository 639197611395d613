#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_wrap)]
mod bitwise;

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::unreadable_literal)]
#[allow(clippy::too_many_lines)]
mod arm;
pub mod condition;
pub mod instruction;
pub mod listing;
pub mod operand;

#[allow(clippy::cast_possible_truncation)]
pub mod shift;

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::unreadable_literal)]
mod thumb;

pub use condition::Condition;
pub use instruction::{Instruction, InstructionKind, InstructionText, Mode, TEXT_CAPACITY};
pub use operand::{
    BlockAddressing, BranchTarget, DataProcessingInfo, IndexMode, Info, LoadStoreInfo,
    LoadStoreMultipleInfo, Offset, ShifterOperand,
};
pub use shift::Shift;

use instruction::Decoded;

/// The only way a decode call can fail: no classification branch claimed the
/// opcode. Both classifiers are total, so seeing this is a decoder bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{mode}: no classification matched opcode {opcode:#010x}")]
    Unclassified { opcode: u32, mode: Mode },
}

/// Decodes one 32-bit ARM opcode fetched from `address`.
///
/// # Errors
///
/// Returns [`DecodeError::Unclassified`] if no classification branch matches.
/// That cannot happen for a well-formed decoder and panics in debug builds.
pub fn decode_arm(opcode: u32, address: u32) -> Result<Instruction, DecodeError> {
    let decoded = arm::decode(opcode, address);
    finish(Mode::Arm, opcode, address, decoded)
}

/// Decodes one 16-bit Thumb opcode fetched from `address`.
///
/// The two halves of a Thumb `BL`/`BLX` pair are decoded separately, see
/// [`listing::fuse_thumb_long_branch`] to combine them.
///
/// # Errors
///
/// Same contract as [`decode_arm`].
pub fn decode_thumb(opcode: u16, address: u32) -> Result<Instruction, DecodeError> {
    let decoded = thumb::decode(opcode, address);
    finish(Mode::Thumb, u32::from(opcode), address, decoded)
}

/// Decodes `opcode` in the given `mode`. In Thumb mode only the low half-word
/// is used.
///
/// # Errors
///
/// Same contract as [`decode_arm`].
pub fn decode(mode: Mode, opcode: u32, address: u32) -> Result<Instruction, DecodeError> {
    match mode {
        Mode::Arm => decode_arm(opcode, address),
        #[allow(clippy::cast_possible_truncation)]
        Mode::Thumb => decode_thumb(opcode as u16, address),
    }
}

fn finish(
    mode: Mode,
    opcode: u32,
    address: u32,
    decoded: Option<Decoded>,
) -> Result<Instruction, DecodeError> {
    decoded.map_or_else(
        || {
            tracing::error!("{mode}: should never reach this point (opcode={opcode:#010x})");
            if cfg!(debug_assertions) {
                panic!("{mode} classifier is not total: {opcode:#010x}");
            }
            Err(DecodeError::Unclassified { opcode, mode })
        },
        |decoded| Ok(Instruction::new(mode, opcode, address, decoded)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mov_r0_r0_is_nop() {
        let instruction = decode_arm(0xE1A0_0000, 0x8000).unwrap();
        assert_eq!(instruction.kind, InstructionKind::Mov);
        assert!(instruction.text.as_str().contains("NOP"));
        assert_eq!(instruction.instruction_size, 4);
        assert_eq!(instruction.address, 0x8000);
        assert_eq!(instruction.opcode, 0xE1A0_0000);
    }

    #[test]
    fn bl_target() {
        let instruction = decode_arm(0xEB00_0002, 0x1000).unwrap();
        assert_eq!(instruction.kind, InstructionKind::Bl);
        assert_eq!(instruction.info.branch(), Some(&BranchTarget::Address(0x1010)));
        assert_eq!(instruction.text.as_str(), "0x00001000 0xeb000002 BL 0x00001010");
    }

    #[test]
    fn thumb_bx_lr() {
        let instruction = decode_thumb(0x4770, 0x2000).unwrap();
        assert_eq!(instruction.kind, InstructionKind::Bx);
        assert_eq!(instruction.instruction_size, 2);

        let target = instruction.info.branch().copied().unwrap();
        assert_eq!(target.reg_operand(), Some(14));
        assert_eq!(target.target_address(), None);
        assert_eq!(instruction.text.as_str(), "0x00002000  0x4770     BX r14");
    }

    #[test]
    fn rotated_immediate() {
        // MOV r0, #0xFF, rotate field 8
        let instruction = decode_arm(0xE3A0_08FF, 0).unwrap();
        let info = instruction.info.data_processing().copied().unwrap();
        assert_eq!(
            info.shifter_operand,
            ShifterOperand::Immediate { value: 0x00FF_0000 }
        );
        assert_eq!(instruction.text.as_str(), "0x00000000 0xe3a008ff MOV r0, #0xff0000");
    }

    #[test]
    fn thumb_svc_with_condition_15() {
        let instruction = decode_thumb(0xDFFF, 0).unwrap();
        assert_eq!(instruction.kind, InstructionKind::Swi);
        assert_eq!(instruction.info, Info::SoftwareInterrupt { immediate: 0xFF });
        assert_eq!(instruction.text.as_str(), "0x00000000  0xdfff     SVC 0xff");
    }

    #[test]
    fn decode_by_mode() {
        assert_eq!(
            decode(Mode::Thumb, 0xFFFF_4770, 0x2000).unwrap(),
            decode_thumb(0x4770, 0x2000).unwrap()
        );
        assert_eq!(
            decode(Mode::Arm, 0xE1A0_0000, 0x8000).unwrap(),
            decode_arm(0xE1A0_0000, 0x8000).unwrap()
        );
    }

    #[test]
    fn arm_is_total_and_idempotent() {
        for _ in 0..100_000 {
            let opcode: u32 = rand::random();
            let address: u32 = rand::random::<u32>() & !3;

            let first = decode_arm(opcode, address).unwrap();
            let second = decode_arm(opcode, address).unwrap();
            assert_eq!(first, second);
            assert!(!first.text.is_empty());
            assert!(first.text.len() < TEXT_CAPACITY);
        }
    }

    #[test]
    fn arm_edge_words_are_total() {
        for opcode in [0, u32::MAX, 0xF000_0000, 0x0FFF_FFFF, 0xE7F0_00F0, 0xFE00_0000] {
            assert!(decode_arm(opcode, 0).is_ok());
        }
    }

    #[test]
    fn thumb_is_total_and_idempotent() {
        for opcode in 0..=u16::MAX {
            let first = decode_thumb(opcode, 0x0800_0000).unwrap();
            let second = decode_thumb(opcode, 0x0800_0000).unwrap();
            assert_eq!(first, second);
            assert!(!first.text.is_empty());
            assert!(first.text.len() < TEXT_CAPACITY);
        }
    }

    #[test]
    fn unclassified_message() {
        let error = DecodeError::Unclassified {
            opcode: 0x1234,
            mode: Mode::Thumb,
        };
        assert_eq!(
            error.to_string(),
            "Thumb: no classification matched opcode 0x00001234"
        );
    }
}
