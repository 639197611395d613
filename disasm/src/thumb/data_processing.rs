use crate::bitwise::Bits;
use crate::instruction::{Decoded, InstructionKind};
use crate::operand::{BranchTarget, DataProcessingInfo, Info, ShifterOperand};
use crate::shift::Shift;

use super::alu_instructions::{ThumbHighRegisterOperation, ThumbModeAluInstruction};

const REG_STACK_POINTER: u8 = 13;
const REG_PROGRAM_COUNTER: u8 = 15;

fn record(
    rd: Option<u8>,
    rn: Option<u8>,
    set_flags: bool,
    shifter_operand: ShifterOperand,
) -> Info {
    Info::DataProcessing(DataProcessingInfo {
        rd,
        rn,
        set_flags,
        shifter_operand,
    })
}

const fn plain_register(rm: u8) -> ShifterOperand {
    ShifterOperand::ImmediateShift {
        rm,
        shift: Shift::Lsl,
        amount: 0,
    }
}

/// Format 1: `LSLS`/`LSRS`/`ASRS Rd, Rm, #imm`. A zero amount on the right
/// shifts means 32.
pub fn shift_immediate(op_code: u16, _address: u32) -> Decoded {
    let rd = op_code.get_bits(0..=2) as u8;
    let rm = op_code.get_bits(3..=5) as u8;
    let mut amount = op_code.get_bits(6..=10) as u8;

    let (shift, mnemonic) = match op_code.get_bits(11..=12) {
        0 => (Shift::Lsl, "LSLS"),
        1 => (Shift::Lsr, "LSRS"),
        _ => (Shift::Asr, "ASRS"),
    };
    if amount == 0 && shift != Shift::Lsl {
        amount = 32;
    }

    Decoded::new(
        InstructionKind::Mov,
        format!("{mnemonic} r{rd}, r{rm}, #0x{amount:02x}"),
    )
    .with_info(record(
        Some(rd),
        None,
        true,
        ShifterOperand::ImmediateShift { rm, shift, amount },
    ))
}

/// Format 2: three-register or 3-bit immediate `ADDS`/`SUBS`.
pub fn add_subtract(op_code: u16, _address: u32) -> Decoded {
    let rd = op_code.get_bits(0..=2) as u8;
    let rn = op_code.get_bits(3..=5) as u8;
    let rm_or_immediate = op_code.get_bits(6..=8) as u8;

    let (kind, mnemonic) = if op_code.get_bit(9) {
        (InstructionKind::Sub, "SUBS")
    } else {
        (InstructionKind::Add, "ADDS")
    };

    let (operand, shifter_operand) = if op_code.get_bit(10) {
        (
            format!("#{rm_or_immediate}"),
            ShifterOperand::Immediate {
                value: u32::from(rm_or_immediate),
            },
        )
    } else {
        (format!("r{rm_or_immediate}"), plain_register(rm_or_immediate))
    };

    Decoded::new(kind, format!("{mnemonic} r{rd}, r{rn}, {operand}"))
        .with_info(record(Some(rd), Some(rn), true, shifter_operand))
}

/// Format 3: `MOVS`/`CMP`/`ADDS`/`SUBS Rd, #imm8`.
pub fn immediate(op_code: u16, _address: u32) -> Decoded {
    let immediate = op_code.get_bits(0..=7);
    let rd = op_code.get_bits(8..=10) as u8;

    let (kind, mnemonic, destination, base) = match op_code.get_bits(11..=12) {
        0 => (InstructionKind::Mov, "MOVS", Some(rd), None),
        1 => (InstructionKind::Cmp, "CMP", None, Some(rd)),
        2 => (InstructionKind::Add, "ADDS", Some(rd), Some(rd)),
        _ => (InstructionKind::Sub, "SUBS", Some(rd), Some(rd)),
    };

    Decoded::new(kind, format!("{mnemonic} r{rd}, #0x{immediate:02x}")).with_info(record(
        destination,
        base,
        true,
        ShifterOperand::Immediate {
            value: u32::from(immediate),
        },
    ))
}

/// Formats 4 and 5: the `010000` ALU block and the `010001` high register
/// block, which also holds `BX`/`BLX`.
pub fn register(op_code: u16, _address: u32) -> Decoded {
    if op_code.get_bit(10) {
        high_register(op_code)
    } else {
        alu_operation(op_code)
    }
}

fn alu_operation(op_code: u16) -> Decoded {
    let operation = ThumbModeAluInstruction::from(op_code.get_bits(6..=9));
    let rd = op_code.get_bits(0..=2) as u8;
    let rm = op_code.get_bits(3..=5) as u8;

    let destination = operation.writes_destination().then_some(rd);
    let (base, shifter_operand) = match (operation, operation.shift()) {
        // Rd is shifted by the amount held in Rm.
        (_, Some(shift)) => (
            None,
            ShifterOperand::RegisterShift {
                rm: rd,
                rs: rm,
                shift,
            },
        ),
        (ThumbModeAluInstruction::Neg, None) => (Some(rm), ShifterOperand::Immediate { value: 0 }),
        (ThumbModeAluInstruction::Mvn, None) => (None, plain_register(rm)),
        _ => (Some(rd), plain_register(rm)),
    };

    Decoded::new(operation.kind(), format!("{operation} r{rd}, r{rm}"))
        .with_info(record(destination, base, true, shifter_operand))
}

fn high_register(op_code: u16) -> Decoded {
    let operation = ThumbHighRegisterOperation::from(op_code.get_bits(8..=9));
    let h1 = op_code.get_bit(7);
    let rd = (op_code.get_bits(0..=2) | (u16::from(h1) << 3)) as u8;
    let rm = op_code.get_bits(3..=6) as u8;

    let (kind, destination, base, set_flags) = match operation {
        ThumbHighRegisterOperation::Add => (InstructionKind::Add, Some(rd), Some(rd), false),
        ThumbHighRegisterOperation::Cmp => (InstructionKind::Cmp, None, Some(rd), true),
        ThumbHighRegisterOperation::Mov => (InstructionKind::Mov, Some(rd), None, false),
        ThumbHighRegisterOperation::BxOrBlx => return branch_exchange(op_code, h1, rm),
    };

    let body = if operation == ThumbHighRegisterOperation::Mov && rd == rm {
        format!("NOP   ; (MOV r{rd}, r{rm})")
    } else {
        format!("{operation} r{rd}, r{rm}")
    };

    Decoded::new(kind, body).with_info(record(
        destination,
        base,
        set_flags,
        plain_register(rm),
    ))
}

/// `BX Rm`, or `BLX Rm` when H1 is set. The low three bits must be zero.
fn branch_exchange(op_code: u16, link: bool, rm: u8) -> Decoded {
    if op_code.get_bits(0..=2) != 0 {
        tracing::debug!("Thumb {op_code:#06x}: BX/BLX with non-zero SBZ field");
        return Decoded::undefined();
    }

    let (kind, mnemonic) = if link {
        (InstructionKind::Blx, "BLX")
    } else {
        (InstructionKind::Bx, "BX")
    };

    Decoded::new(kind, format!("{mnemonic} r{rm}"))
        .with_info(Info::Branch(BranchTarget::Register(rm)))
}

/// Format 12: `ADD Rd, SP|PC, #imm8 * 4`.
pub fn add_to_stack_or_program_counter(op_code: u16, _address: u32) -> Decoded {
    let immediate = u32::from(op_code.get_bits(0..=7)) * 4;
    let rd = op_code.get_bits(8..=10) as u8;
    let (rn, name) = if op_code.get_bit(11) {
        (REG_STACK_POINTER, "SP")
    } else {
        (REG_PROGRAM_COUNTER, "PC")
    };

    Decoded::new(
        InstructionKind::Add,
        format!("ADD r{rd}, {name}, #0x{immediate:x}"),
    )
    .with_info(record(
        Some(rd),
        Some(rn),
        false,
        ShifterOperand::Immediate { value: immediate },
    ))
}

/// Format 13: `ADD`/`SUB SP, #imm7 * 4`.
pub fn adjust_stack(op_code: u16, _address: u32) -> Decoded {
    let immediate = u32::from(op_code.get_bits(0..=6)) * 4;
    let (kind, mnemonic) = if op_code.get_bit(7) {
        (InstructionKind::Sub, "SUB")
    } else {
        (InstructionKind::Add, "ADD")
    };

    Decoded::new(kind, format!("{mnemonic} SP, #0x{immediate:x}")).with_info(record(
        Some(REG_STACK_POINTER),
        Some(REG_STACK_POINTER),
        false,
        ShifterOperand::Immediate { value: immediate },
    ))
}
