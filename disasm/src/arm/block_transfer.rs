use crate::bitwise::Bits;
use crate::condition::Condition;
use crate::instruction::{Decoded, InstructionKind};
use crate::operand::{BlockAddressing, Info, LoadStoreMultipleInfo, render_register_list};

/// `LDM`/`STM`: `<op><mode>{cond} Rn{!}, {<list>}{^}`.
pub fn decode(op_code: u32, _address: u32) -> Decoded {
    let condition = Condition::of_arm(op_code);
    let addressing_mode = BlockAddressing::from_pu(op_code.get_bit(24), op_code.get_bit(23));
    let user_mode = op_code.get_bit(22);
    let write_back = op_code.get_bit(21);
    let load = op_code.get_bit(20);
    let rn = op_code.get_bits(16..=19) as u8;
    let register_list = op_code.get_bits(0..=15) as u16;

    let (kind, mnemonic) = if load {
        (InstructionKind::Ldm, "LDM")
    } else {
        (InstructionKind::Stm, "STM")
    };

    let body = format!(
        "{mnemonic}{}{condition} r{rn}{}, {{{}}}{}",
        addressing_mode.suffix(),
        if write_back { "!" } else { "" },
        render_register_list(register_list),
        if user_mode { "^" } else { "" },
    );

    Decoded::new(kind, body).with_info(Info::LoadStoreMultiple(LoadStoreMultipleInfo {
        rn,
        register_list,
        addressing_mode,
        write_back,
        user_mode,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_style_store() {
        // STMDB sp!, {r4, lr}
        let decoded = decode(0xE92D_4010, 0);
        assert_eq!(decoded.kind, InstructionKind::Stm);
        assert_eq!(decoded.body, "STMDB r13!, {r4, r14}");
        assert_eq!(
            decoded.info,
            Info::LoadStoreMultiple(LoadStoreMultipleInfo {
                rn: 13,
                register_list: 0x4010,
                addressing_mode: BlockAddressing::DecrementBefore,
                write_back: true,
                user_mode: false,
            })
        );
    }

    #[test]
    fn default_increment_after() {
        // LDM r0, {r1, r2}
        let decoded = decode(0xE890_0006, 0);
        assert_eq!(decoded.kind, InstructionKind::Ldm);
        assert_eq!(decoded.body, "LDM r0, {r1, r2}");
    }

    #[test]
    fn user_bank_and_condition() {
        // LDMNEIB r0!, {pc}^
        let decoded = decode(0x19F0_8000, 0);
        assert_eq!(decoded.body, "LDMIBNE r0!, {r15}^");
        let info = decoded.info.load_store_multiple().copied().unwrap();
        assert!(info.user_mode);
        assert_eq!(info.addressing_mode as u8, 1);

        // STMDA r1, {r0}
        let decoded = decode(0xE801_0001, 0);
        assert_eq!(decoded.body, "STMDA r1, {r0}");
    }
}
