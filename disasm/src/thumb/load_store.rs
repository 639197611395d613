use crate::bitwise::Bits;
use crate::instruction::{Decoded, InstructionKind};
use crate::operand::{
    BlockAddressing, IndexMode, Info, LoadStoreInfo, LoadStoreMultipleInfo, Offset,
    render_register_list,
};
use crate::shift::Shift;

const REG_STACK_POINTER: u8 = 13;
const REG_LINK_REGISTER: u8 = 14;
const REG_PROGRAM_COUNTER: u8 = 15;

/// Thumb transfers are always `[Rn, offset]` with an added offset.
const fn record(rd: u8, rn: u8, offset: Offset) -> Info {
    Info::LoadStore(LoadStoreInfo {
        rd,
        rn,
        up: true,
        index_mode: IndexMode::Offset,
        offset,
    })
}

/// Format 6: `LDR Rd, [PC, #imm8 * 4]`. The base is the fetch address plus 4
/// rounded down to a word, which is printed as a comment.
pub fn literal(op_code: u16, address: u32) -> Decoded {
    let rd = op_code.get_bits(8..=10) as u8;
    let immediate = u32::from(op_code.get_bits(0..=7)) * 4;
    let literal_address = (address.wrapping_add(4) & !3).wrapping_add(immediate);

    Decoded::new(
        InstructionKind::Ldr,
        format!("LDR r{rd}, [pc, #0x{immediate:x}] ; 0x{literal_address:08x}"),
    )
    .with_info(record(rd, REG_PROGRAM_COUNTER, Offset::Immediate(immediate)))
}

/// Formats 7 and 8: `[Rn, Rm]` transfers, opcode in bits 11-9.
pub fn register_offset(op_code: u16, _address: u32) -> Decoded {
    let rd = op_code.get_bits(0..=2) as u8;
    let rn = op_code.get_bits(3..=5) as u8;
    let rm = op_code.get_bits(6..=8) as u8;

    let (kind, mnemonic) = match op_code.get_bits(9..=11) {
        0 => (InstructionKind::Str, "STR"),
        1 => (InstructionKind::Strh, "STRH"),
        2 => (InstructionKind::Strb, "STRB"),
        3 => (InstructionKind::Ldrsb, "LDRSB"),
        4 => (InstructionKind::Ldr, "LDR"),
        5 => (InstructionKind::Ldrh, "LDRH"),
        6 => (InstructionKind::Ldrb, "LDRB"),
        _ => (InstructionKind::Ldrsh, "LDRSH"),
    };

    Decoded::new(kind, format!("{mnemonic} r{rd}, [r{rn}, r{rm}]")).with_info(record(
        rd,
        rn,
        Offset::Register {
            rm,
            shift: Shift::Lsl,
            amount: 0,
        },
    ))
}

/// Formats 9 and 10: `[Rn, #imm5]` scaled by the access size.
pub fn immediate_offset(op_code: u16, _address: u32) -> Decoded {
    let rd = op_code.get_bits(0..=2) as u8;
    let rn = op_code.get_bits(3..=5) as u8;
    let load = op_code.get_bit(11);

    let halfword = op_code.get_bits(12..=15) == 0b1000;
    let byte = !halfword && op_code.get_bit(12);
    let (kind, mnemonic, scale) = match (load, halfword, byte) {
        (true, true, _) => (InstructionKind::Ldrh, "LDRH", 1),
        (false, true, _) => (InstructionKind::Strh, "STRH", 1),
        (true, false, true) => (InstructionKind::Ldrb, "LDRB", 0),
        (false, false, true) => (InstructionKind::Strb, "STRB", 0),
        (true, false, false) => (InstructionKind::Ldr, "LDR", 2),
        (false, false, false) => (InstructionKind::Str, "STR", 2),
    };
    let offset = u32::from(op_code.get_bits(6..=10)) << scale;

    Decoded::new(kind, format!("{mnemonic} r{rd}, [r{rn}, #0x{offset:x}]"))
        .with_info(record(rd, rn, Offset::Immediate(offset)))
}

/// Format 11: `LDR`/`STR Rd, [SP, #imm8 * 4]`.
pub fn stack_relative(op_code: u16, _address: u32) -> Decoded {
    let rd = op_code.get_bits(8..=10) as u8;
    let offset = u32::from(op_code.get_bits(0..=7)) * 4;

    let (kind, mnemonic) = if op_code.get_bit(11) {
        (InstructionKind::Ldr, "LDR")
    } else {
        (InstructionKind::Str, "STR")
    };

    Decoded::new(kind, format!("{mnemonic} r{rd}, [SP, #0x{offset:x}]"))
        .with_info(record(rd, REG_STACK_POINTER, Offset::Immediate(offset)))
}

/// Format 15: `LDM`/`STM Rn!, {list}`. A load whose base is in the list does
/// not write back.
pub fn multiple(op_code: u16, _address: u32) -> Decoded {
    let rn = op_code.get_bits(8..=10) as u8;
    let register_list = op_code.get_bits(0..=7);
    let load = op_code.get_bit(11);

    let (kind, mnemonic) = if load {
        (InstructionKind::Ldm, "LDM")
    } else {
        (InstructionKind::Stm, "STM")
    };
    let write_back = !(load && register_list.get_bit(rn));

    Decoded::new(
        kind,
        format!(
            "{mnemonic} r{rn}{}, {{{}}}",
            if write_back { "!" } else { "" },
            render_register_list(register_list)
        ),
    )
    .with_info(Info::LoadStoreMultiple(LoadStoreMultipleInfo {
        rn,
        register_list,
        addressing_mode: BlockAddressing::IncrementAfter,
        write_back,
        user_mode: false,
    }))
}

/// Format 14: `PUSH {list{, LR}}` is `STMDB SP!`, `POP {list{, PC}}` is
/// `LDMIA SP!`.
pub fn push_pop(op_code: u16, _address: u32) -> Decoded {
    let extra = op_code.get_bit(8);
    let mut register_list = op_code.get_bits(0..=7);

    let (kind, mnemonic, addressing_mode) = if op_code.get_bit(11) {
        if extra {
            register_list |= 1 << REG_PROGRAM_COUNTER;
        }
        (InstructionKind::Ldm, "POP", BlockAddressing::IncrementAfter)
    } else {
        if extra {
            register_list |= 1 << REG_LINK_REGISTER;
        }
        (InstructionKind::Stm, "PUSH", BlockAddressing::DecrementBefore)
    };

    Decoded::new(
        kind,
        format!("{mnemonic} {{{}}}", render_register_list(register_list)),
    )
    .with_info(Info::LoadStoreMultiple(LoadStoreMultipleInfo {
        rn: REG_STACK_POINTER,
        register_list,
        addressing_mode,
        write_back: true,
        user_mode: false,
    }))
}
