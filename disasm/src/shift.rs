use serde::{Deserialize, Serialize};

/// Barrel shifter operation applied to a register operand.
///
/// `Rrx` never appears in an encoding directly: it is what `ROR #0` means.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum Shift {
    Lsl = 0,
    Lsr = 1,
    Asr = 2,
    Ror = 3,
    Rrx = 4,
}

impl From<u32> for Shift {
    fn from(shift_type: u32) -> Self {
        match shift_type & 0b11 {
            0b00 => Self::Lsl,
            0b01 => Self::Lsr,
            0b10 => Self::Asr,
            _ => Self::Ror,
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
            Self::Rrx => f.write_str("RRX"),
        }
    }
}

/// Resolves the immediate-shift special cases: `LSR #0` and `ASR #0` encode
/// a shift by 32, `ROR #0` encodes `RRX`.
#[must_use]
pub fn normalize_immediate_shift(shift_type: u32, amount: u32) -> (Shift, u8) {
    let shift = Shift::from(shift_type);
    match (shift, amount) {
        (Shift::Lsr | Shift::Asr, 0) => (shift, 32),
        (Shift::Ror, 0) => (Shift::Rrx, 0),
        _ => (shift, amount as u8),
    }
}

/// Renders `r<m>` with an optional constant shift, e.g. `r3, LSR #0x20`.
/// `sign` is prepended to the register (`-` for subtracted offsets).
#[must_use]
pub fn render_immediate_shift(sign: &str, rm: u8, shift: Shift, amount: u8) -> String {
    match (shift, amount) {
        (Shift::Lsl, 0) => format!("{sign}r{rm}"),
        (Shift::Rrx, _) => format!("{sign}r{rm}, RRX"),
        _ => format!("{sign}r{rm}, {shift} #0x{amount:x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_amount_special_cases() {
        assert_eq!(normalize_immediate_shift(0, 0), (Shift::Lsl, 0));
        assert_eq!(normalize_immediate_shift(1, 0), (Shift::Lsr, 32));
        assert_eq!(normalize_immediate_shift(2, 0), (Shift::Asr, 32));
        assert_eq!(normalize_immediate_shift(3, 0), (Shift::Rrx, 0));
    }

    #[test]
    fn non_zero_amounts_are_kept() {
        assert_eq!(normalize_immediate_shift(0, 31), (Shift::Lsl, 31));
        assert_eq!(normalize_immediate_shift(1, 4), (Shift::Lsr, 4));
        assert_eq!(normalize_immediate_shift(3, 8), (Shift::Ror, 8));
    }

    #[test]
    fn render() {
        assert_eq!(render_immediate_shift("", 2, Shift::Lsl, 0), "r2");
        assert_eq!(render_immediate_shift("-", 2, Shift::Lsl, 0), "-r2");
        assert_eq!(render_immediate_shift("", 7, Shift::Lsr, 32), "r7, LSR #0x20");
        assert_eq!(render_immediate_shift("", 1, Shift::Rrx, 0), "r1, RRX");
        assert_eq!(render_immediate_shift("-", 4, Shift::Asr, 3), "-r4, ASR #0x3");
    }
}
