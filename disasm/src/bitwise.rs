use std::ops::RangeInclusive;

/// Bit helpers for opcode words.
/// The index (`bit_idx`) goes from lsb to msb (right to left).
pub trait Bits: Copy {
    const WIDTH: u8;

    fn get_bit(self, bit_idx: u8) -> bool;

    /// Extracts the field `bits_range` and moves it down to bit 0.
    fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self;

    /// Returns a sign-extended copy of the low `number_of_bits` bits.
    fn sign_extended(self, number_of_bits: u8) -> Self;
}

macro_rules! impl_bits {
    ($ty:ty, $signed:ty) => {
        impl Bits for $ty {
            const WIDTH: u8 = <$ty>::BITS as u8;

            fn get_bit(self, bit_idx: u8) -> bool {
                debug_assert!(bit_idx < Self::WIDTH);
                (self >> bit_idx) & 1 == 1
            }

            fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self {
                let start = *bits_range.start();
                let end = *bits_range.end();
                debug_assert!(start <= end && end < Self::WIDTH);

                let length = u32::from(end - start + 1);
                let mask = <$ty>::MAX.checked_shr(<$ty>::BITS - length).unwrap_or(0);
                (self >> start) & mask
            }

            fn sign_extended(self, number_of_bits: u8) -> Self {
                debug_assert!(number_of_bits > 0 && number_of_bits <= Self::WIDTH);

                // Park the sign bit in the msb, then let the arithmetic shift
                // smear it back down.
                let unused = Self::WIDTH - number_of_bits;
                (((self << unused) as $signed) >> unused) as $ty
            }
        }
    };
}

impl_bits!(u32, i32);
impl_bits!(u16, i16);

/// Rotates a 32-bit word right, as the barrel shifter does for immediates.
/// Rotating by 0 (or any multiple of 32) leaves the value untouched.
#[must_use]
pub const fn ror(value: u32, places: u32) -> u32 {
    value.rotate_right(places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn get_bit() {
        let b = 0b1011001110_u32;
        assert!(b.get_bit(1));
        assert!(!b.get_bit(0));
        assert!(b.get_bit(2));
        assert!(!b.get_bit(31));

        let h = 0x8001_u16;
        assert!(h.get_bit(15));
        assert!(h.get_bit(0));
        assert!(!h.get_bit(14));
    }

    #[test]
    fn get_bits() {
        let b = 0b1011001110_u32;
        assert_eq!(b.get_bits(0..=3), 0b1110);
        assert_eq!(b.get_bits(1..=1), 0b1);
        assert_eq!(b.get_bits(4..=7), 0b1100);
        assert_eq!(b.get_bits(8..=9), 0b10);
        assert_eq!(b.get_bits(0..=9), 0b10_1100_1110);
        assert_eq!(b.get_bits(0..=31), 0b10_1100_1110);
        assert_eq!(b.get_bits(28..=31), 0b0);

        assert_eq!(0xE1A0_0000_u32.get_bits(28..=31), 0xE);
        assert_eq!(0x4770_u16.get_bits(11..=15), 0b01000);
        assert_eq!(0xFFFF_u16.get_bits(0..=15), 0xFFFF);
    }

    #[test]
    fn sign_extended() {
        let a: u32 = 0b1001; // -7 in i4
        assert_eq!(a.sign_extended(4) as i32, -7);

        assert_eq!(0x00FF_FFFE_u32.sign_extended(24), 0xFFFF_FFFE);
        assert_eq!(0x007F_FFFF_u32.sign_extended(24), 0x007F_FFFF);
        assert_eq!(0x0080_u16.sign_extended(8), 0xFF80);
        assert_eq!(0x0400_u32.sign_extended(11), 0xFFFF_FC00);
    }

    #[test]
    fn ror_by_zero_is_identity() {
        for value in [0, 0xFF, 0x8000_0001, u32::MAX] {
            assert_eq!(ror(value, 0), value);
        }
    }

    #[test]
    fn ror_by_sixteen_swaps_halves() {
        assert_eq!(ror(0x1234_5678, 16), 0x5678_1234);
        assert_eq!(ror(0xFF, 16), 0x00FF_0000);
        assert_eq!(ror(0xFF, 8), 0xFF00_0000);
        assert_eq!(ror(0x3F, 2), 0xC000_000F);
    }
}
