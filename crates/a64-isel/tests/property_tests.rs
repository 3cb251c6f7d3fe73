//! Property-based tests for the instruction selector.
//!
//! Uses `proptest` to check invariants over random banks, widths and
//! opcodes:
//! - Opcode tables only answer for GPR values of 32 or 64 bits
//! - Rejected instructions and their register info are left untouched
//! - Unhandled generic opcodes are always rejected
//! - Pointers outside address space 0 are never selected

use a64_isel::isel::{
    InstructionSelector, SelectError, Selected, select_binary_op, select_load_store_ui_op,
};
use a64_isel::mir::{
    BinaryOp, GenericOpcode, LowLevelType, MachineInstr, MachineOperand, MemOp, VReg, VRegInfo,
};
use a64_isel::target::{A64Opcode, OperandConstraint, RegBank, operand_constraints};
use proptest::prelude::*;

fn bank_strategy() -> impl Strategy<Value = RegBank> {
    prop_oneof![Just(RegBank::Gpr), Just(RegBank::Fpr)]
}

fn width_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1u32), Just(8), Just(16), Just(32), Just(64), Just(128)]
}

fn binary_op_strategy() -> impl Strategy<Value = BinaryOp> {
    proptest::sample::select(BinaryOp::ALL.to_vec())
}

fn unhandled_opcode_strategy() -> impl Strategy<Value = GenericOpcode> {
    proptest::sample::select(vec![
        GenericOpcode::BrCond,
        GenericOpcode::Phi,
        GenericOpcode::PtrAdd,
        GenericOpcode::SRem,
        GenericOpcode::URem,
        GenericOpcode::Constant,
        GenericOpcode::ImplicitDef,
        GenericOpcode::ZExt,
        GenericOpcode::SExt,
        GenericOpcode::AnyExt,
        GenericOpcode::Trunc,
        GenericOpcode::ICmp,
        GenericOpcode::Select,
    ])
}

/// `%2 = op {s<bits>} %0, %1` with each vreg on its own bank.
fn binary_instr(
    opcode: GenericOpcode,
    bits: u32,
    banks: [RegBank; 3],
) -> (MachineInstr, VRegInfo) {
    let mut regs = VRegInfo::new();
    let lhs = regs.create(bits, Some(banks[1]));
    let rhs = regs.create(bits, Some(banks[2]));
    let dst = regs.create(bits, Some(banks[0]));
    let instr = MachineInstr::new(opcode)
        .with_type(LowLevelType::scalar(bits))
        .with_def(dst)
        .with_use(lhs)
        .with_use(rhs);
    (instr, regs)
}

fn reg_class_sizes(opcode: A64Opcode) -> Vec<u32> {
    operand_constraints(opcode)
        .unwrap_or_default()
        .iter()
        .filter_map(|c| match c {
            OperandConstraint::Reg(class) => Some(class.size_bits()),
            OperandConstraint::Imm | OperandConstraint::Block => None,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn binary_table_covers_only_gpr_32_64(
        op in binary_op_strategy(),
        bank in bank_strategy(),
        bits in width_strategy(),
    ) {
        let expected = bank == RegBank::Gpr && (bits == 32 || bits == 64);
        let selected = select_binary_op(op, bank, bits);
        prop_assert_eq!(selected.is_some(), expected);
        if let Some(opcode) = selected {
            let sizes = reg_class_sizes(opcode);
            prop_assert_eq!(sizes.len(), 3);
            prop_assert!(sizes.iter().all(|&s| s == bits), "{opcode}: {sizes:?}");
        }
    }

    #[test]
    fn load_store_table_covers_only_gpr_32_64(
        is_load in any::<bool>(),
        bank in bank_strategy(),
        bits in width_strategy(),
    ) {
        let op = if is_load { MemOp::Load } else { MemOp::Store };
        let expected = bank == RegBank::Gpr && (bits == 32 || bits == 64);
        let selected = select_load_store_ui_op(op, bank, bits);
        prop_assert_eq!(selected.is_some(), expected);
        if let Some(opcode) = selected {
            prop_assert_eq!(opcode.may_load(), is_load);
            prop_assert_eq!(opcode.may_store(), !is_load);
            // Value register width follows the access; the base is 64-bit.
            prop_assert_eq!(reg_class_sizes(opcode), vec![bits, 64]);
        }
    }

    #[test]
    fn binary_selection_succeeds_only_on_uniform_gpr(
        op in binary_op_strategy(),
        bits in width_strategy(),
        banks in [bank_strategy(), bank_strategy(), bank_strategy()],
    ) {
        let (mut instr, mut regs) = binary_instr(op.generic(), bits, banks);
        let before = (instr.clone(), regs.clone());
        let outcome = InstructionSelector::new().select(&mut instr, &mut regs);

        let selectable =
            banks.iter().all(|&b| b == RegBank::Gpr) && (bits == 32 || bits == 64);
        if selectable {
            let expected = select_binary_op(op, RegBank::Gpr, bits).expect("table entry");
            prop_assert_eq!(outcome, Ok(Selected::Rewritten(expected)));
            prop_assert!(instr.types().is_empty());
            for vreg in 0..3 {
                let class = regs.class(VReg(vreg));
                prop_assert_eq!(class.map(|c| c.size_bits()), Some(bits));
            }
        } else {
            prop_assert!(outcome.is_err());
            prop_assert_eq!((instr, regs), before);
        }
    }

    #[test]
    fn unhandled_opcodes_are_rejected_unchanged(
        opcode in unhandled_opcode_strategy(),
        bits in prop_oneof![Just(32u32), Just(64)],
    ) {
        let banks = [RegBank::Gpr; 3];
        let (mut instr, mut regs) = binary_instr(opcode, bits, banks);
        let before = (instr.clone(), regs.clone());
        let outcome = InstructionSelector::new().select(&mut instr, &mut regs);
        prop_assert_eq!(outcome, Err(SelectError::Unhandled(opcode)));
        prop_assert_eq!((instr, regs), before);
    }

    #[test]
    fn mul_adds_matching_zero_register(
        bits in prop_oneof![Just(32u32), Just(64)],
        square in any::<bool>(),
    ) {
        let mut regs = VRegInfo::new();
        let lhs = regs.create(bits, Some(RegBank::Gpr));
        let rhs = if square { lhs } else { regs.create(bits, Some(RegBank::Gpr)) };
        let dst = regs.create(bits, Some(RegBank::Gpr));
        let mut instr = MachineInstr::new(GenericOpcode::Mul)
            .with_type(LowLevelType::scalar(bits))
            .with_def(dst)
            .with_use(lhs)
            .with_use(rhs);

        let outcome = InstructionSelector::new().select(&mut instr, &mut regs);
        let (expected, zero) = if bits == 32 {
            (A64Opcode::MADDWrrr, "$wzr")
        } else {
            (A64Opcode::MADDXrrr, "$xzr")
        };
        prop_assert_eq!(outcome, Ok(Selected::Rewritten(expected)));
        prop_assert_eq!(instr.num_operands(), 4);
        let addend = instr.operand(3).map(ToString::to_string);
        prop_assert_eq!(addend.as_deref(), Some(zero));
    }

    #[test]
    fn frame_index_outside_address_space_zero_is_rejected(addr_space in 1u32..=255) {
        let mut regs = VRegInfo::new();
        let dst = regs.create(64, Some(RegBank::Gpr));
        let mut instr = MachineInstr::new(GenericOpcode::FrameIndex)
            .with_type(LowLevelType::pointer(addr_space))
            .with_def(dst)
            .with_operand(MachineOperand::FrameIndex(0));
        let before = instr.clone();

        let outcome = InstructionSelector::new().select(&mut instr, &mut regs);
        let is_pointer_error = matches!(outcome, Err(SelectError::PointerType { .. }));
        prop_assert!(is_pointer_error, "{outcome:?}");
        prop_assert_eq!(instr, before);
    }

    #[test]
    fn load_through_non_default_address_space_is_rejected(
        addr_space in 1u32..=255,
        bits in prop_oneof![Just(32u32), Just(64)],
    ) {
        let mut regs = VRegInfo::new();
        let ptr = regs.create(64, Some(RegBank::Gpr));
        let dst = regs.create(bits, Some(RegBank::Gpr));
        let mut instr = MachineInstr::new(GenericOpcode::Load)
            .with_type(LowLevelType::scalar(bits))
            .with_type(LowLevelType::pointer(addr_space))
            .with_def(dst)
            .with_use(ptr);
        let before = (instr.clone(), regs.clone());

        let outcome = InstructionSelector::new().select(&mut instr, &mut regs);
        let is_pointer_error = matches!(outcome, Err(SelectError::PointerType { .. }));
        prop_assert!(is_pointer_error, "{outcome:?}");
        prop_assert_eq!((instr, regs), before);
    }
}
