//! # Sequential Listings
//!
//! Walks a little-endian code image one opcode at a time, as a fault handler
//! does when it dumps the instructions around a faulting address. Addresses
//! advance by the instruction size of the mode; the decoder itself keeps no
//! state between words.
//!
//! Thumb `BL`/`BLX` come as two half-words that decode separately. Callers
//! that want the final target call [`fuse_thumb_long_branch`] on the pair.

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::instruction::{Instruction, InstructionKind, Mode};
use crate::{DecodeError, decode_arm, decode_thumb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    /// The image ended in the middle of an opcode.
    #[error("{remaining} trailing byte(s) at {address:#010x} do not form a whole opcode")]
    Truncated { address: u32, remaining: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Iterator over the opcodes of `bytes`, the first one located at `address`.
///
/// A trailing partial opcode yields one [`ListingError::Truncated`] and ends
/// the listing.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    mode: Mode,
    bytes: &'a [u8],
    address: u32,
}

impl<'a> Listing<'a> {
    #[must_use]
    pub const fn new(mode: Mode, bytes: &'a [u8], address: u32) -> Self {
        Self {
            mode,
            bytes,
            address,
        }
    }

    /// Address of the next opcode.
    #[must_use]
    pub const fn address(&self) -> u32 {
        self.address
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }
}

impl Iterator for Listing<'_> {
    type Item = Result<Instruction, ListingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bytes.is_empty() {
            return None;
        }

        let size = usize::from(self.mode.instruction_size());
        let address = self.address;

        let Some((word, rest)) = self.bytes.split_at_checked(size) else {
            let remaining = self.bytes.len();
            self.bytes = &[];
            tracing::debug!("listing stops at {address:#010x}, {remaining} byte(s) left");
            return Some(Err(ListingError::Truncated { address, remaining }));
        };

        self.bytes = rest;
        self.address = address.wrapping_add(u32::from(self.mode.instruction_size()));

        let decoded = match *word {
            [b0, b1, b2, b3] => decode_arm(u32::from_le_bytes([b0, b1, b2, b3]), address),
            [b0, b1] => decode_thumb(u16::from_le_bytes([b0, b1]), address),
            _ => unreachable!("opcode slices are 2 or 4 bytes"),
        };

        Some(decoded.map_err(ListingError::from))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = usize::from(self.mode.instruction_size());
        let count = self.bytes.len().div_ceil(size);
        (count, Some(count))
    }
}

/// Final destination of a Thumb `BL`/`BLX` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongBranch {
    /// [`InstructionKind::Bl`] or [`InstructionKind::Blx`].
    pub kind: InstructionKind,
    pub target: u32,
}

/// Combines the prefix half-word (`11110`, fetched from `prefix_address`)
/// with the suffix that follows it.
///
/// ```text
/// BL   target = prefix_address + 4 + (sext(prefix[10:0]) << 12) + (suffix[10:0] << 1)
/// BLX  same, then aligned down to a word
/// ```
///
/// Returns `None` if `prefix` is not a prefix or `suffix` is neither a `BL`
/// nor a valid `BLX` suffix.
#[must_use]
pub fn fuse_thumb_long_branch(
    prefix: u16,
    suffix: u16,
    prefix_address: u32,
) -> Option<LongBranch> {
    if prefix & 0xF800 != 0xF000 {
        return None;
    }

    let kind = match suffix & 0xF800 {
        0xF800 => InstructionKind::Bl,
        0xE800 if !suffix.get_bit(0) => InstructionKind::Blx,
        _ => return None,
    };

    let high = u32::from(prefix.get_bits(0..=10)).sign_extended(11) << 12;
    let low = u32::from(suffix.get_bits(0..=10)) << 1;
    let suffix_address = prefix_address.wrapping_add(2);
    let target = suffix_address
        .wrapping_add(2)
        .wrapping_add(high)
        .wrapping_add(low);

    let target = if kind == InstructionKind::Blx {
        target & !3
    } else {
        target
    };

    Some(LongBranch { kind, target })
}
