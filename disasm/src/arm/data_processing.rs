use std::fmt::Display;

use crate::bitwise::{Bits, ror};
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};
use crate::operand::{DataProcessingInfo, Info, ShifterOperand};
use crate::shift::{Shift, normalize_immediate_shift};

/// `MOV r0, r0`, the canonical ARM no-op.
const NOP: u32 = 0xE1A0_0000;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ArmModeAluInstruction {
    And = 0x0,
    Eor = 0x1,
    Sub = 0x2,
    Rsb = 0x3,
    Add = 0x4,
    Adc = 0x5,
    Sbc = 0x6,
    Rsc = 0x7,
    Tst = 0x8,
    Teq = 0x9,
    Cmp = 0xA,
    Cmn = 0xB,
    Orr = 0xC,
    Mov = 0xD,
    Bic = 0xE,
    Mvn = 0xF,
}

impl Display for ArmModeAluInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Eor => f.write_str("EOR"),
            Self::Sub => f.write_str("SUB"),
            Self::Rsb => f.write_str("RSB"),
            Self::Add => f.write_str("ADD"),
            Self::Adc => f.write_str("ADC"),
            Self::Sbc => f.write_str("SBC"),
            Self::Rsc => f.write_str("RSC"),
            Self::Tst => f.write_str("TST"),
            Self::Teq => f.write_str("TEQ"),
            Self::Cmp => f.write_str("CMP"),
            Self::Cmn => f.write_str("CMN"),
            Self::Orr => f.write_str("ORR"),
            Self::Mov => f.write_str("MOV"),
            Self::Bic => f.write_str("BIC"),
            Self::Mvn => f.write_str("MVN"),
        }
    }
}

impl From<u32> for ArmModeAluInstruction {
    fn from(alu_op_code: u32) -> Self {
        use ArmModeAluInstruction::*;
        match alu_op_code & 0xF {
            0x0 => And,
            0x1 => Eor,
            0x2 => Sub,
            0x3 => Rsb,
            0x4 => Add,
            0x5 => Adc,
            0x6 => Sbc,
            0x7 => Rsc,
            0x8 => Tst,
            0x9 => Teq,
            0xA => Cmp,
            0xB => Cmn,
            0xC => Orr,
            0xD => Mov,
            0xE => Bic,
            _ => Mvn,
        }
    }
}

/// Which registers the assembler syntax names.
#[derive(Eq, PartialEq, Debug)]
pub enum OperandForm {
    /// `<op>{cond}{S} Rd, Rn, <shifter>`
    DestinationAndBase,
    /// `<op>{cond}{S} Rd, <shifter>`
    DestinationOnly,
    /// `<op>{cond} Rn, <shifter>`, flags always set.
    BaseOnly,
}

impl ArmModeAluInstruction {
    pub const fn form(self) -> OperandForm {
        use ArmModeAluInstruction::*;
        match self {
            Mov | Mvn => OperandForm::DestinationOnly,
            Tst | Teq | Cmp | Cmn => OperandForm::BaseOnly,
            And | Eor | Sub | Rsb | Add | Adc | Sbc | Rsc | Orr | Bic => {
                OperandForm::DestinationAndBase
            }
        }
    }

    pub const fn kind(self) -> InstructionKind {
        use ArmModeAluInstruction::*;
        match self {
            And => InstructionKind::And,
            Eor => InstructionKind::Eor,
            Sub => InstructionKind::Sub,
            Rsb => InstructionKind::Rsb,
            Add => InstructionKind::Add,
            Adc => InstructionKind::Adc,
            Sbc => InstructionKind::Sbc,
            Rsc => InstructionKind::Rsc,
            Tst => InstructionKind::Tst,
            Teq => InstructionKind::Teq,
            Cmp => InstructionKind::Cmp,
            Cmn => InstructionKind::Cmn,
            Orr => InstructionKind::Orr,
            Mov => InstructionKind::Mov,
            Bic => InstructionKind::Bic,
            Mvn => InstructionKind::Mvn,
        }
    }
}

/// Second operand: bit 25 selects a rotated immediate, otherwise bit 4
/// selects a register-controlled shift over a constant one.
pub fn shifter_operand(op_code: u32) -> ShifterOperand {
    if op_code.get_bit(25) {
        let immediate = op_code.get_bits(0..=7);
        let rotate = op_code.get_bits(8..=11);
        return ShifterOperand::Immediate {
            value: ror(immediate, rotate * 2),
        };
    }

    let rm = op_code.get_bits(0..=3) as u8;
    let shift_type = op_code.get_bits(5..=6);

    if op_code.get_bit(4) {
        ShifterOperand::RegisterShift {
            rm,
            rs: op_code.get_bits(8..=11) as u8,
            shift: Shift::from(shift_type),
        }
    } else {
        let (shift, amount) = normalize_immediate_shift(shift_type, op_code.get_bits(7..=11));
        ShifterOperand::ImmediateShift { rm, shift, amount }
    }
}

pub fn decode(op_code: u32, _address: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let alu = ArmModeAluInstruction::from(op_code.get_bits(21..=24));
    let set_flags = op_code.get_bit(20);
    let rn = op_code.get_bits(16..=19) as u8;
    let rd = op_code.get_bits(12..=15) as u8;
    let shifter_operand = shifter_operand(op_code);
    let s = if set_flags { "S" } else { "" };

    let (body, rd, rn) = match alu.form() {
        OperandForm::DestinationAndBase => (
            format!("{alu}{condition}{s} r{rd}, r{rn}, {shifter_operand}"),
            Some(rd),
            Some(rn),
        ),
        OperandForm::DestinationOnly => {
            let body = if op_code == NOP {
                "NOP".to_owned()
            } else {
                format!("{alu}{condition}{s} r{rd}, {shifter_operand}")
            };
            (body, Some(rd), None)
        }
        OperandForm::BaseOnly => (
            format!("{alu}{condition} r{rn}, {shifter_operand}"),
            None,
            Some(rn),
        ),
    };

    Decoded::new(alu.kind(), body).with_info(Info::DataProcessing(DataProcessingInfo {
        rd,
        rn,
        set_flags,
        shifter_operand,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decoded(op_code: u32) -> (InstructionKind, String, DataProcessingInfo) {
        let decoded = decode(op_code, 0);
        let info = decoded.info.data_processing().copied().unwrap();
        (decoded.kind, decoded.body, info)
    }

    #[test]
    fn nop() {
        let (kind, body, info) = decoded(NOP);
        assert_eq!(kind, InstructionKind::Mov);
        assert_eq!(body, "NOP");
        assert_eq!(info.rd, Some(0));
        assert_eq!(info.rn, None);

        // Same registers, different condition: not the canonical NOP.
        let (_, body, _) = decoded(0x01A0_0000);
        assert_eq!(body, "MOVEQ r0, r0");
    }

    #[test]
    fn rotated_immediate() {
        let (kind, body, info) = decoded(0xE3A0_08FF);
        assert_eq!(kind, InstructionKind::Mov);
        assert_eq!(body, "MOV r0, #0xff0000");
        assert_eq!(
            info.shifter_operand,
            ShifterOperand::Immediate { value: 0x00FF_0000 }
        );

        let (_, body, _) = decoded(0x13A0_0001);
        assert_eq!(body, "MOVNE r0, #0x1");
    }

    #[test]
    fn immediate_shift() {
        let (kind, body, info) = decoded(0xE091_0182);
        assert_eq!(kind, InstructionKind::Add);
        assert_eq!(body, "ADDS r0, r1, r2, LSL #0x3");
        assert_eq!(
            info,
            DataProcessingInfo {
                rd: Some(0),
                rn: Some(1),
                set_flags: true,
                shifter_operand: ShifterOperand::ImmediateShift {
                    rm: 2,
                    shift: Shift::Lsl,
                    amount: 3
                },
            }
        );
    }

    #[test]
    fn shift_by_32_and_rrx() {
        let (_, body, info) = decoded(0xE1A0_0021);
        assert_eq!(body, "MOV r0, r1, LSR #0x20");
        assert_eq!(
            info.shifter_operand,
            ShifterOperand::ImmediateShift {
                rm: 1,
                shift: Shift::Lsr,
                amount: 32
            }
        );

        let (_, body, _) = decoded(0xE1A0_0041);
        assert_eq!(body, "MOV r0, r1, ASR #0x20");

        let (_, body, info) = decoded(0xE1A0_0061);
        assert_eq!(body, "MOV r0, r1, RRX");
        assert_eq!(
            info.shifter_operand,
            ShifterOperand::ImmediateShift {
                rm: 1,
                shift: Shift::Rrx,
                amount: 0
            }
        );
    }

    #[test]
    fn register_shift() {
        let (_, body, info) = decoded(0xE081_0312);
        assert_eq!(body, "ADD r0, r1, r2, LSL r3");
        assert_eq!(
            info.shifter_operand,
            ShifterOperand::RegisterShift {
                rm: 2,
                rs: 3,
                shift: Shift::Lsl
            }
        );
    }

    #[test]
    fn compare_has_no_destination() {
        let (kind, body, info) = decoded(0xE351_0000);
        assert_eq!(kind, InstructionKind::Cmp);
        assert_eq!(body, "CMP r1, #0x0");
        assert_eq!(info.rd, None);
        assert_eq!(info.rn, Some(1));
        assert!(info.set_flags);
    }

    #[test]
    fn three_operand_forms() {
        assert_eq!(decoded(0xE1C1_0002).1, "BIC r0, r1, r2");
        assert_eq!(decoded(0xE181_0002).1, "ORR r0, r1, r2");
        assert_eq!(decoded(0xE041_0002).1, "SUB r0, r1, r2");
        assert_eq!(decoded(0xE1E0_0002).1, "MVN r0, r2");
    }

    #[test]
    fn alu_opcode_round_trip() {
        for op in 0..16 {
            assert_eq!(ArmModeAluInstruction::from(op) as u32, op);
        }
    }
}
