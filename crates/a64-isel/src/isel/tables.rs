// Opcode resolution tables.
//
// Pure lookups from (generic operation, register bank, width) to the AArch64
// opcode. Only the general-purpose bank at 32 and 64 bits has entries.

use crate::mir::{BinaryOp, MemOp};
use crate::target::{A64Opcode, RegBank};

/// Select the register-register opcode for `op` on `bank` at `bits`.
#[must_use]
pub fn select_binary_op(op: BinaryOp, bank: RegBank, bits: u32) -> Option<A64Opcode> {
    if bank != RegBank::Gpr {
        return None;
    }
    let opcode = match (op, bits) {
        (BinaryOp::Or, 32) => A64Opcode::ORRWrr,
        (BinaryOp::Xor, 32) => A64Opcode::EORWrr,
        (BinaryOp::And, 32) => A64Opcode::ANDWrr,
        (BinaryOp::Add, 32) => A64Opcode::ADDWrr,
        (BinaryOp::Sub, 32) => A64Opcode::SUBWrr,
        (BinaryOp::Shl, 32) => A64Opcode::LSLVWr,
        (BinaryOp::LShr, 32) => A64Opcode::LSRVWr,
        (BinaryOp::AShr, 32) => A64Opcode::ASRVWr,
        (BinaryOp::SDiv, 32) => A64Opcode::SDIVWr,
        (BinaryOp::UDiv, 32) => A64Opcode::UDIVWr,
        (BinaryOp::Or, 64) => A64Opcode::ORRXrr,
        (BinaryOp::Xor, 64) => A64Opcode::EORXrr,
        (BinaryOp::And, 64) => A64Opcode::ANDXrr,
        (BinaryOp::Add, 64) => A64Opcode::ADDXrr,
        (BinaryOp::Sub, 64) => A64Opcode::SUBXrr,
        (BinaryOp::Shl, 64) => A64Opcode::LSLVXr,
        (BinaryOp::LShr, 64) => A64Opcode::LSRVXr,
        (BinaryOp::AShr, 64) => A64Opcode::ASRVXr,
        (BinaryOp::SDiv, 64) => A64Opcode::SDIVXr,
        (BinaryOp::UDiv, 64) => A64Opcode::UDIVXr,
        _ => return None,
    };
    Some(opcode)
}

/// Select the base + unsigned-immediate load/store opcode for a value on
/// `bank` with a memory access of `bits`.
#[must_use]
pub fn select_load_store_ui_op(op: MemOp, bank: RegBank, bits: u32) -> Option<A64Opcode> {
    match (bank, bits, op) {
        (RegBank::Gpr, 32, MemOp::Load) => Some(A64Opcode::LDRWui),
        (RegBank::Gpr, 32, MemOp::Store) => Some(A64Opcode::STRWui),
        (RegBank::Gpr, 64, MemOp::Load) => Some(A64Opcode::LDRXui),
        (RegBank::Gpr, 64, MemOp::Store) => Some(A64Opcode::STRXui),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpr_binary_ops_have_both_widths() {
        for op in BinaryOp::ALL {
            let w = select_binary_op(op, RegBank::Gpr, 32).expect("32-bit entry");
            let x = select_binary_op(op, RegBank::Gpr, 64).expect("64-bit entry");
            assert_ne!(w, x, "{op:?}");
            assert!(w.name().contains('W'), "{w}");
            assert!(x.name().contains('X'), "{x}");
        }
    }

    #[test]
    fn other_banks_and_widths_have_no_entry() {
        for op in BinaryOp::ALL {
            assert_eq!(select_binary_op(op, RegBank::Fpr, 32), None);
            assert_eq!(select_binary_op(op, RegBank::Fpr, 64), None);
            for bits in [1, 8, 16, 128] {
                assert_eq!(select_binary_op(op, RegBank::Gpr, bits), None);
            }
        }
    }

    #[test]
    fn specific_binary_entries() {
        assert_eq!(
            select_binary_op(BinaryOp::Shl, RegBank::Gpr, 32),
            Some(A64Opcode::LSLVWr)
        );
        assert_eq!(
            select_binary_op(BinaryOp::AShr, RegBank::Gpr, 64),
            Some(A64Opcode::ASRVXr)
        );
        assert_eq!(
            select_binary_op(BinaryOp::UDiv, RegBank::Gpr, 64),
            Some(A64Opcode::UDIVXr)
        );
    }

    #[test]
    fn load_store_entries() {
        assert_eq!(
            select_load_store_ui_op(MemOp::Load, RegBank::Gpr, 64),
            Some(A64Opcode::LDRXui)
        );
        assert_eq!(
            select_load_store_ui_op(MemOp::Load, RegBank::Gpr, 32),
            Some(A64Opcode::LDRWui)
        );
        assert_eq!(
            select_load_store_ui_op(MemOp::Store, RegBank::Gpr, 64),
            Some(A64Opcode::STRXui)
        );
        assert_eq!(
            select_load_store_ui_op(MemOp::Store, RegBank::Gpr, 32),
            Some(A64Opcode::STRWui)
        );
        assert_eq!(select_load_store_ui_op(MemOp::Load, RegBank::Gpr, 8), None);
        assert_eq!(select_load_store_ui_op(MemOp::Store, RegBank::Fpr, 64), None);
    }
}
