use crate::bitwise::Bits;
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};
use crate::operand::{BranchTarget, Info};

/// Format 16/17: `B<cond>` with a signed 8-bit half-word offset. Condition
/// `1111` is `SVC`, `1110` is undefined.
pub fn conditional(op_code: u16, address: u32) -> Decoded {
    let immediate = op_code.get_bits(0..=7);

    match op_code.get_bits(8..=11) {
        0xF => Decoded::new(InstructionKind::Swi, format!("SVC 0x{immediate:02x}"))
            .with_info(Info::SoftwareInterrupt {
                immediate: u32::from(immediate),
            }),
        0xE => {
            tracing::debug!("Thumb {op_code:#06x}: conditional branch with AL condition");
            Decoded::undefined()
        }
        condition => {
            let condition = Condition::from(condition as u8);
            let offset = u32::from(immediate).sign_extended(8) << 1;
            let target = address.wrapping_add(4).wrapping_add(offset);

            Decoded::new(InstructionKind::B, format!("B{condition} 0x{target:08x}"))
                .with_info(Info::Branch(BranchTarget::Address(target)))
        }
    }
}

/// `CBZ`/`CBNZ Rn, <label>`: forward only, the offset is `i:imm5` half-words.
pub fn compare_branch(op_code: u16, address: u32) -> Decoded {
    let offset = u32::from(op_code.get_bits(3..=7) | (u16::from(op_code.get_bit(9)) << 5));
    let target = address.wrapping_add(4).wrapping_add(offset << 1);
    let non_zero = if op_code.get_bit(11) { "N" } else { "" };
    let rn = op_code.get_bits(0..=2);

    Decoded::new(
        InstructionKind::CompareBranch,
        format!("CB{non_zero}Z r{rn}, 0x{target:08x}"),
    )
}

/// The `111xx` branch space, bits 12-11 pick the form:
///
/// ```text
/// 00  B       address + 4 + sext(offset11) * 2
/// 01  BLX     suffix, offset11 is unsigned, target word aligned
/// 10  prefix  upper half of a BL/BLX pair: sext(offset11) << 12
/// 11  BL      suffix, offset11 is unsigned
/// ```
///
/// The pair halves are decoded on their own; [`crate::listing`] has the
/// helper that puts them back together.
pub fn unconditional(op_code: u16, address: u32) -> Decoded {
    let offset = u32::from(op_code.get_bits(0..=10));
    let form = op_code.get_bits(11..=12);

    let offset = if form == 0b00 || form == 0b10 {
        offset.sign_extended(11)
    } else {
        offset
    };
    let relative = address.wrapping_add(4).wrapping_add(offset << 1);

    let (kind, mnemonic, target) = match form {
        0b00 => (InstructionKind::B, "B", relative),
        0b01 => (InstructionKind::Blx, "BLX", relative & !3),
        0b10 => (InstructionKind::Unknown, "prefix", offset << 12),
        _ => (InstructionKind::Bl, "BL", relative),
    };

    Decoded::new(kind, format!("{mnemonic} 0x{target:08x}"))
        .with_info(Info::Branch(BranchTarget::Address(target)))
}

/// `1110 1xxx xxxx xxx1`: a BLX suffix with an odd offset.
pub fn undefined(op_code: u16, _address: u32) -> Decoded {
    tracing::debug!("Thumb {op_code:#06x}: BLX suffix with bit 0 set");
    Decoded::undefined()
}
