//! # Instruction Descriptor
//!
//! The result of one decode call. It is built fresh each time and handed to
//! the caller; the decoder keeps nothing.
//!
//! ```text
//! 0x00008000 0xe1a00000 NOP
//! └─address─┘└─opcode──┘└─mnemonic and operands─┘
//! ```
//!
//! ARM lines print the opcode with 8 hex digits, Thumb lines with 4:
//!
//! ```text
//! 0x00002000  0x4770     BX r14
//! ```

use serde::{Deserialize, Serialize};

use crate::operand::Info;

/// Capacity of the rendered text, terminator slot included.
pub const TEXT_CAPACITY: usize = 128;

/// Instruction set the opcode belongs to.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum Mode {
    Arm,
    Thumb,
}

impl Mode {
    /// Width of one opcode in bytes.
    #[must_use]
    pub const fn instruction_size(self) -> u8 {
        match self {
            Self::Arm => 4,
            Self::Thumb => 2,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arm => f.write_str("ARM"),
            Self::Thumb => f.write_str("Thumb"),
        }
    }
}

/// What the decoder recognized the opcode as.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Nothing more specific is known, e.g. the first half of a Thumb `BL`.
    Unknown,
    Undefined,

    // Branches
    B,
    Bl,
    Bx,
    Bxj,
    Blx,

    // Data processing
    And,
    Eor,
    Sub,
    Rsb,
    Add,
    Adc,
    Sbc,
    Rsc,
    Tst,
    Teq,
    Cmp,
    Cmn,
    Orr,
    Mov,
    Bic,
    Mvn,

    // Status register access
    Mrs,
    Msr,

    // Multiplies
    Mul,
    Mla,
    Smull,
    Smlal,
    Umull,
    Umlal,

    // Loads and stores
    Ldr,
    Ldrb,
    Ldrt,
    Ldrbt,
    Ldrh,
    Ldrsb,
    Ldrsh,
    Ldrd,
    Ldm,
    Str,
    Strb,
    Strt,
    Strbt,
    Strh,
    Strd,
    Stm,
    Swp,
    Swpb,

    // Miscellaneous
    Swi,
    Bkpt,
    Clz,
    Pld,
    Srs,
    Rfe,

    // Enhanced DSP
    Qadd,
    Qsub,
    Qdadd,
    Qdsub,
    Smlaxy,
    Smlalxy,
    Smlawy,
    Smulxy,
    Smulwy,

    // Coprocessor
    Cdp,
    Mrc,
    Mcr,
    Ldc,
    Stc,
    Mcrr,
    Mrrc,

    // Media
    Pack,
    Saturate,
    DualMultiply,
    MostSignificantMultiply,
    Rev,
    Rev16,
    Revsh,
    Sel,
    Usad8,

    // Thumb-only descriptive forms
    CompareBranch,
    Extend,
    Cps,
    Setend,
    Hint,
    IfThen,
}

/// Rendered text, bounded to [`TEXT_CAPACITY`] - 1 bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct InstructionText(String);

impl InstructionText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for InstructionText {
    fn from(mut text: String) -> Self {
        let mut limit = TEXT_CAPACITY - 1;
        if text.len() > limit {
            while !text.is_char_boundary(limit) {
                limit -= 1;
            }
            text.truncate(limit);
        }
        Self(text)
    }
}

impl From<InstructionText> for String {
    fn from(text: InstructionText) -> Self {
        text.0
    }
}

impl std::fmt::Display for InstructionText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully decoded opcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Raw word as fetched (upper half zero for Thumb).
    pub opcode: u32,
    pub address: u32,
    /// 4 for ARM, 2 for Thumb.
    pub instruction_size: u8,
    pub kind: InstructionKind,
    pub text: InstructionText,
    pub info: Info,
}

impl Instruction {
    pub(crate) fn new(mode: Mode, opcode: u32, address: u32, decoded: Decoded) -> Self {
        let prefix = match mode {
            Mode::Arm => format!("0x{address:08x} 0x{opcode:08x} "),
            Mode::Thumb => format!("0x{address:08x}  0x{opcode:04x}     "),
        };

        Self {
            opcode,
            address,
            instruction_size: mode.instruction_size(),
            kind: decoded.kind,
            text: InstructionText::from(prefix + &decoded.body),
            info: decoded.info,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.instruction_size == 2 {
            Mode::Thumb
        } else {
            Mode::Arm
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.text.fmt(f)
    }
}

/// What a sub-decoder hands back: the kind, the text after the
/// address/opcode prefix, and the operand record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decoded {
    pub kind: InstructionKind,
    pub body: String,
    pub info: Info,
}

impl Decoded {
    pub(crate) const fn new(kind: InstructionKind, body: String) -> Self {
        Self {
            kind,
            body,
            info: Info::None,
        }
    }

    pub(crate) fn with_info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    pub(crate) fn undefined() -> Self {
        Self::new(InstructionKind::Undefined, "UNDEFINED INSTRUCTION".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_is_bounded() {
        let long = "X".repeat(500);
        let text = InstructionText::from(long);
        assert_eq!(text.len(), TEXT_CAPACITY - 1);

        let short = InstructionText::from("NOP".to_owned());
        assert_eq!(short.as_str(), "NOP");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut long = "a".repeat(TEXT_CAPACITY - 2);
        long.push('é');
        let text = InstructionText::from(long);
        assert_eq!(text.len(), TEXT_CAPACITY - 2);
    }

    #[test]
    fn prefix_per_mode() {
        let decoded = Decoded::new(InstructionKind::Mov, "NOP".to_owned());
        let arm = Instruction::new(Mode::Arm, 0xE1A0_0000, 0x8000, decoded.clone());
        assert_eq!(arm.text.as_str(), "0x00008000 0xe1a00000 NOP");
        assert_eq!(arm.instruction_size, 4);
        assert_eq!(arm.mode(), Mode::Arm);

        let thumb = Instruction::new(Mode::Thumb, 0x46C0, 0x2000, decoded);
        assert_eq!(thumb.text.as_str(), "0x00002000  0x46c0     NOP");
        assert_eq!(thumb.instruction_size, 2);
        assert_eq!(thumb.mode(), Mode::Thumb);
    }

    #[test]
    fn deserialized_text_is_bounded_too() {
        let json = format!("\"{}\"", "Y".repeat(300));
        let text: InstructionText = serde_json::from_str(&json).unwrap();
        assert_eq!(text.len(), TEXT_CAPACITY - 1);
        assert_eq!(serde_json::to_string(&text).unwrap().len(), TEXT_CAPACITY + 1);
    }
}
