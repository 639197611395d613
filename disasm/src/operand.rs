//! Structured operand records attached to a decoded [`Instruction`](crate::Instruction).
//!
//! Only the categories that have something a debugger can act on carry a
//! record: data processing, single and multiple loads/stores, the branch
//! family and software interrupts. Everything else is described by its text
//! alone and carries [`Info::None`].

use serde::{Deserialize, Serialize};

use crate::shift::{Shift, render_immediate_shift};

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum Info {
    #[default]
    None,
    DataProcessing(DataProcessingInfo),
    LoadStore(LoadStoreInfo),
    LoadStoreMultiple(LoadStoreMultipleInfo),
    Branch(BranchTarget),
    SoftwareInterrupt { immediate: u32 },
}

impl Info {
    #[must_use]
    pub const fn data_processing(&self) -> Option<&DataProcessingInfo> {
        match self {
            Self::DataProcessing(info) => Some(info),
            _ => None,
        }
    }

    #[must_use]
    pub const fn load_store(&self) -> Option<&LoadStoreInfo> {
        match self {
            Self::LoadStore(info) => Some(info),
            _ => None,
        }
    }

    #[must_use]
    pub const fn load_store_multiple(&self) -> Option<&LoadStoreMultipleInfo> {
        match self {
            Self::LoadStoreMultiple(info) => Some(info),
            _ => None,
        }
    }

    #[must_use]
    pub const fn branch(&self) -> Option<&BranchTarget> {
        match self {
            Self::Branch(target) => Some(target),
            _ => None,
        }
    }
}

/// Second operand of a data-processing instruction.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum ShifterOperand {
    /// `#imm`, already rotated.
    Immediate { value: u32 },
    /// `Rm, <shift> #amount`. `LSR`/`ASR` by 32 and `RRX` are already resolved.
    ImmediateShift { rm: u8, shift: Shift, amount: u8 },
    /// `Rm, <shift> Rs`.
    RegisterShift { rm: u8, rs: u8, shift: Shift },
}

impl std::fmt::Display for ShifterOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Immediate { value } => write!(f, "#0x{value:x}"),
            Self::ImmediateShift { rm, shift, amount } => {
                f.write_str(&render_immediate_shift("", rm, shift, amount))
            }
            Self::RegisterShift { rm, rs, shift } => write!(f, "r{rm}, {shift} r{rs}"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct DataProcessingInfo {
    /// `None` for compare-only forms.
    pub rd: Option<u8>,
    /// `None` for move forms.
    pub rn: Option<u8>,
    pub set_flags: bool,
    pub shifter_operand: ShifterOperand,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[repr(u8)]
pub enum IndexMode {
    /// `[Rn, off]`
    Offset = 0,
    /// `[Rn, off]!`
    PreIndexed = 1,
    /// `[Rn], off`
    PostIndexed = 2,
}

impl IndexMode {
    /// Decodes the P/W bit pair of a load/store.
    #[must_use]
    pub const fn from_pw(pre: bool, write_back: bool) -> Self {
        match (pre, write_back) {
            (true, false) => Self::Offset,
            (true, true) => Self::PreIndexed,
            (false, _) => Self::PostIndexed,
        }
    }

    /// Integer tag consumers switch on: 0 offset, 1 pre-indexed, 2 post-indexed.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum Offset {
    Immediate(u32),
    Register { rm: u8, shift: Shift, amount: u8 },
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct LoadStoreInfo {
    pub rd: u8,
    pub rn: u8,
    /// U bit: offset is added (`true`) or subtracted.
    pub up: bool,
    pub index_mode: IndexMode,
    pub offset: Offset,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockAddressing {
    IncrementAfter = 0,
    IncrementBefore = 1,
    DecrementAfter = 2,
    DecrementBefore = 3,
}

impl BlockAddressing {
    /// Decodes the P/U bit pair of a block transfer.
    #[must_use]
    pub const fn from_pu(pre: bool, up: bool) -> Self {
        match (pre, up) {
            (false, true) => Self::IncrementAfter,
            (true, true) => Self::IncrementBefore,
            (false, false) => Self::DecrementAfter,
            (true, false) => Self::DecrementBefore,
        }
    }

    /// Mnemonic suffix; `IA` is the UAL default and is left out.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::IncrementAfter => "",
            Self::IncrementBefore => "IB",
            Self::DecrementAfter => "DA",
            Self::DecrementBefore => "DB",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct LoadStoreMultipleInfo {
    pub rn: u8,
    /// Bit `i` set means `r<i>` is transferred.
    pub register_list: u16,
    pub addressing_mode: BlockAddressing,
    pub write_back: bool,
    /// S bit: user-bank transfer or CPSR restore (`^`).
    pub user_mode: bool,
}

/// Where a branch goes. Literal targets and register targets never coexist.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum BranchTarget {
    Address(u32),
    Register(u8),
}

impl BranchTarget {
    #[must_use]
    pub const fn target_address(self) -> Option<u32> {
        match self {
            Self::Address(address) => Some(address),
            Self::Register(_) => None,
        }
    }

    #[must_use]
    pub const fn reg_operand(self) -> Option<u8> {
        match self {
            Self::Register(register) => Some(register),
            Self::Address(_) => None,
        }
    }
}

/// Comma separated `r<i>` list for every set bit, ascending.
#[must_use]
pub fn render_register_list(register_list: u16) -> String {
    (0..16)
        .filter(|i| register_list & (1 << i) != 0)
        .map(|i| format!("r{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn register_list() {
        assert_eq!(render_register_list(0), "");
        assert_eq!(render_register_list(0b1), "r0");
        assert_eq!(render_register_list(0x4010), "r4, r14");
        assert_eq!(render_register_list(0x80F0), "r4, r5, r6, r7, r15");
    }

    #[test]
    fn shifter_operand_text() {
        assert_eq!(ShifterOperand::Immediate { value: 0xFF0000 }.to_string(), "#0xff0000");
        assert_eq!(
            ShifterOperand::ImmediateShift { rm: 2, shift: Shift::Lsl, amount: 0 }.to_string(),
            "r2"
        );
        assert_eq!(
            ShifterOperand::ImmediateShift { rm: 2, shift: Shift::Asr, amount: 32 }.to_string(),
            "r2, ASR #0x20"
        );
        assert_eq!(
            ShifterOperand::RegisterShift { rm: 1, rs: 3, shift: Shift::Ror }.to_string(),
            "r1, ROR r3"
        );
    }

    #[test]
    fn index_mode_tags() {
        assert_eq!(IndexMode::from_pw(true, false).tag(), 0);
        assert_eq!(IndexMode::from_pw(true, true).tag(), 1);
        assert_eq!(IndexMode::from_pw(false, false).tag(), 2);
        assert_eq!(IndexMode::from_pw(false, true).tag(), 2);
    }

    #[test]
    fn block_addressing() {
        assert_eq!(BlockAddressing::from_pu(false, true).suffix(), "");
        assert_eq!(BlockAddressing::from_pu(true, true).suffix(), "IB");
        assert_eq!(BlockAddressing::from_pu(false, false).suffix(), "DA");
        assert_eq!(BlockAddressing::from_pu(true, false).suffix(), "DB");
        assert_eq!(BlockAddressing::DecrementBefore as u8, 3);
    }

    #[test]
    fn branch_target_is_exclusive() {
        let literal = BranchTarget::Address(0x1010);
        assert_eq!(literal.target_address(), Some(0x1010));
        assert_eq!(literal.reg_operand(), None);

        let register = BranchTarget::Register(14);
        assert_eq!(register.target_address(), None);
        assert_eq!(register.reg_operand(), Some(14));
    }

    #[test]
    fn wrong_variant_is_checked() {
        let info = Info::Branch(BranchTarget::Register(3));
        assert!(info.data_processing().is_none());
        assert!(info.load_store().is_none());
        assert!(info.load_store_multiple().is_none());
        assert_eq!(info.branch(), Some(&BranchTarget::Register(3)));
    }
}
