use crate::bitwise::Bits;
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};
use crate::operand::{BranchTarget, Info};

/// Byte offset encoded in the low 24 bits: sign-extended, in words.
fn branch_offset(op_code: u32) -> u32 {
    op_code.get_bits(0..=23).sign_extended(24) << 2
}

/// `B`/`BL`: the target is relative to the address of this instruction plus 8.
pub fn branch_link(op_code: u32, address: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let link = op_code.get_bit(24);
    let target = address.wrapping_add(8).wrapping_add(branch_offset(op_code));

    let (kind, l) = if link {
        (InstructionKind::Bl, "L")
    } else {
        (InstructionKind::B, "")
    };

    Decoded::new(kind, format!("B{l}{condition} 0x{target:08x}"))
        .with_info(Info::Branch(BranchTarget::Address(target)))
}

/// `BLX` (immediate), always unconditional. Bit 24 (H) selects the odd
/// halfword so the Thumb target can land on any 2-byte boundary.
pub fn branch_link_exchange_immediate(op_code: u32, address: u32) -> Decoded {
    let halfword = if op_code.get_bit(24) { 2 } else { 0 };
    let target = address
        .wrapping_add(8)
        .wrapping_add(branch_offset(op_code) | halfword);

    Decoded::new(InstructionKind::Blx, format!("BLX 0x{target:08x}"))
        .with_info(Info::Branch(BranchTarget::Address(target)))
}

pub fn software_interrupt(op_code: u32, _address: u32) -> Decoded {
    let immediate = op_code.get_bits(0..=23);

    Decoded::new(InstructionKind::Swi, format!("SVC 0x{immediate:06x}"))
        .with_info(Info::SoftwareInterrupt { immediate })
}
