use crate::instruction::InstructionKind;
use crate::shift::Shift;

/// Format 4 ALU operations (`010000 op Rs Rd`), all of them flag-setting.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ThumbModeAluInstruction {
    And = 0x0,
    Eor = 0x1,
    Lsl = 0x2,
    Lsr = 0x3,
    Asr = 0x4,
    Adc = 0x5,
    Sbc = 0x6,
    Ror = 0x7,
    Tst = 0x8,
    Neg = 0x9,
    Cmp = 0xA,
    Cmn = 0xB,
    Orr = 0xC,
    Mul = 0xD,
    Bic = 0xE,
    Mvn = 0xF,
}

impl ThumbModeAluInstruction {
    pub const fn kind(self) -> InstructionKind {
        use ThumbModeAluInstruction::*;
        match self {
            And => InstructionKind::And,
            Eor => InstructionKind::Eor,
            Lsl | Lsr | Asr | Ror => InstructionKind::Mov,
            Adc => InstructionKind::Adc,
            Sbc => InstructionKind::Sbc,
            Tst => InstructionKind::Tst,
            Neg => InstructionKind::Rsb,
            Cmp => InstructionKind::Cmp,
            Cmn => InstructionKind::Cmn,
            Orr => InstructionKind::Orr,
            Mul => InstructionKind::Mul,
            Bic => InstructionKind::Bic,
            Mvn => InstructionKind::Mvn,
        }
    }

    /// The register-specified shift behind `LSLS`/`LSRS`/`ASRS`/`RORS`.
    pub const fn shift(self) -> Option<Shift> {
        match self {
            Self::Lsl => Some(Shift::Lsl),
            Self::Lsr => Some(Shift::Lsr),
            Self::Asr => Some(Shift::Asr),
            Self::Ror => Some(Shift::Ror),
            _ => None,
        }
    }

    /// Compare forms only set flags.
    pub const fn writes_destination(self) -> bool {
        !matches!(self, Self::Tst | Self::Cmp | Self::Cmn)
    }
}

impl std::fmt::Display for ThumbModeAluInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ThumbModeAluInstruction::*;
        match self {
            And => f.write_str("ANDS"),
            Eor => f.write_str("EORS"),
            Lsl => f.write_str("LSLS"),
            Lsr => f.write_str("LSRS"),
            Asr => f.write_str("ASRS"),
            Adc => f.write_str("ADCS"),
            Sbc => f.write_str("SBCS"),
            Ror => f.write_str("RORS"),
            Tst => f.write_str("TST"),
            Neg => f.write_str("RSBS"),
            Cmp => f.write_str("CMP"),
            Cmn => f.write_str("CMN"),
            Orr => f.write_str("ORRS"),
            Mul => f.write_str("MULS"),
            Bic => f.write_str("BICS"),
            Mvn => f.write_str("MVNS"),
        }
    }
}

impl From<u16> for ThumbModeAluInstruction {
    fn from(alu_op_code: u16) -> Self {
        use ThumbModeAluInstruction::*;
        match alu_op_code & 0xF {
            0x0 => And,
            0x1 => Eor,
            0x2 => Lsl,
            0x3 => Lsr,
            0x4 => Asr,
            0x5 => Adc,
            0x6 => Sbc,
            0x7 => Ror,
            0x8 => Tst,
            0x9 => Neg,
            0xA => Cmp,
            0xB => Cmn,
            0xC => Orr,
            0xD => Mul,
            0xE => Bic,
            _ => Mvn,
        }
    }
}

/// Format 5 operations on the full register file (`010001 op H1 H2 Rs Rd`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbHighRegisterOperation {
    Add,
    Cmp,
    Mov,
    BxOrBlx,
}

impl std::fmt::Display for ThumbHighRegisterOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mov => f.write_str("MOV"),
            Self::Cmp => f.write_str("CMP"),
            Self::Add => f.write_str("ADD"),
            Self::BxOrBlx => f.write_str("BX"),
        }
    }
}

impl From<u16> for ThumbHighRegisterOperation {
    fn from(op: u16) -> Self {
        match op & 0b11 {
            0 => Self::Add,
            1 => Self::Cmp,
            2 => Self::Mov,
            _ => Self::BxOrBlx,
        }
    }
}
