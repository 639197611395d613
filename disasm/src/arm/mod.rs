//! # ARM Instruction Classification
//!
//! A 32-bit ARM opcode is classified by walking [`DECODE_TABLE`] top to
//! bottom and handing the word to the first entry whose `mask`/`value` pair
//! matches. Order matters: several groups overlap and the earlier entry wins.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ARM Instruction Categories                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  cond = 1111 (unconditional space)                                      │
//! │    0xxx  →  PLD / undefined                                             │
//! │    100x  →  SRS / RFE                                                   │
//! │    101x  →  BLX (immediate)                                             │
//! │    110x  →  LDC2 / STC2 / MCRR2 / MRRC2                                 │
//! │    1110  →  falls through to CDP2 / MCR2 / MRC2 below                   │
//! │    1111  →  undefined                                                   │
//! │                                                                         │
//! │  Bits 27-25:                                                            │
//! │  000  →  multiply / extra load-store   (bits 7,4 = 1,1)                 │
//! │          miscellaneous                 (S = 0 on TST/TEQ/CMP/CMN)       │
//! │          data processing, register operand                              │
//! │  001  →  undefined, MSR immediate, data processing immediate            │
//! │  010  →  load/store, immediate offset                                   │
//! │  011  →  load/store register offset (bit 4 = 0), undefined, media       │
//! │  100  →  load/store multiple                                            │
//! │  101  →  B / BL                                                         │
//! │  110  →  coprocessor load/store, double register transfer               │
//! │  111  →  SWI, CDP, MCR / MRC                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod block_transfer;
mod branch;
mod coprocessor;
mod data_processing;
mod load_store;
mod media;
mod miscellaneous;
mod multiply;
mod unconditional;

use crate::instruction::Decoded;

/// Sub-decoder entry point: opcode and fetch address in, instruction body out.
type Handler = fn(u32, u32) -> Decoded;

/// `(mask, value, handler)`, first match wins.
static DECODE_TABLE: [(u32, u32, Handler); 21] = [
    // Unconditional extension space.
    (0xF800_0000, 0xF000_0000, unconditional::preload),
    (0xFE00_0000, 0xF800_0000, unconditional::return_from_exception),
    (0xFE00_0000, 0xFA00_0000, branch::branch_link_exchange_immediate),
    (0xFE00_0000, 0xFC00_0000, coprocessor::load_store_transfer),
    (0xFF00_0000, 0xFF00_0000, undefined),
    // 000
    (0x0E00_0090, 0x0000_0090, multiply::decode),
    (0x0F90_0000, 0x0100_0000, miscellaneous::decode),
    (0x0E00_0000, 0x0000_0000, data_processing::decode),
    // 001
    (0x0FB0_0000, 0x0300_0000, undefined),
    (0x0FB0_0000, 0x0320_0000, miscellaneous::status_register_transfer),
    (0x0E00_0000, 0x0200_0000, data_processing::decode),
    // 010
    (0x0E00_0000, 0x0400_0000, load_store::decode_single),
    // 011
    (0x0E00_0010, 0x0600_0000, load_store::decode_single),
    (0x0FF0_00F0, 0x07F0_00F0, undefined),
    (0x0E00_0000, 0x0600_0000, media::decode),
    // 100
    (0x0E00_0000, 0x0800_0000, block_transfer::decode),
    // 101
    (0x0E00_0000, 0x0A00_0000, branch::branch_link),
    // 110
    (0x0E00_0000, 0x0C00_0000, coprocessor::load_store_transfer),
    // 111
    (0x0F00_0000, 0x0F00_0000, branch::software_interrupt),
    (0x0F00_0010, 0x0E00_0000, coprocessor::data_operation),
    (0x0F00_0010, 0x0E00_0010, coprocessor::register_transfer),
];

/// Classifies `op_code` and runs the matching sub-decoder.
///
/// Returns `None` only if no table entry claims the word.
pub fn decode(op_code: u32, address: u32) -> Option<Decoded> {
    DECODE_TABLE
        .iter()
        .find(|(mask, value, _)| op_code & mask == *value)
        .map(|(mask, value, handler)| {
            tracing::trace!("ARM {op_code:#010x} matched {mask:#010x}/{value:#010x}");
            handler(op_code, address)
        })
}

fn undefined(op_code: u32, _address: u32) -> Decoded {
    tracing::debug!("ARM {op_code:#010x} is architecturally undefined");
    Decoded::undefined()
}
