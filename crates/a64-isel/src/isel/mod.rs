// AArch64 instruction selection: rewrites generic machine instructions in
// place into target instructions.
//
// This module is organized into submodules:
// - `tables`: pure opcode lookups keyed by operation, bank and width
// - `validate`: structural checks shared by the binary-operation paths
// - `bank`: register bank lookup
// - `constrain`: register class finalization for selected instructions
// - `driver`: function-level selection and post-selection verification

mod bank;
mod constrain;
mod driver;
mod error;
mod tables;
mod validate;

pub use bank::{A64RegisterBankInfo, RegisterBankInfo};
pub use constrain::{ClassAssignments, ConstrainError, ConstrainRegOperands, DescConstrainer};
pub use driver::{SelectOptions, SelectionFailure, SelectionReport, select_function, verify_selected};
pub use error::SelectError;
pub use tables::{select_binary_op, select_load_store_ui_op};
pub use validate::{PointerOperand, check_binary_operands};

use crate::mir::{
    BinaryOp, GenericOpcode, LowLevelType, MachineInstr, MachineOperand, MemOp, VRegInfo,
};
use crate::target::{A64Opcode, PhysReg, RegBank};

use validate::reg_operand;

/// Outcome of a successful `select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selected {
    /// The instruction was already target-specific; nothing changed.
    AlreadySelected,
    /// The instruction was rewritten to the given opcode.
    Rewritten(A64Opcode),
}

/// Full replacement for a generic instruction, built before anything is
/// mutated.
#[derive(Debug)]
struct Rewrite {
    opcode: A64Opcode,
    extra_operands: Vec<MachineOperand>,
}

impl Rewrite {
    fn new(opcode: A64Opcode) -> Self {
        Self {
            opcode,
            extra_operands: Vec::new(),
        }
    }

    fn with_operand(mut self, operand: MachineOperand) -> Self {
        self.extra_operands.push(operand);
        self
    }
}

/// Selects AArch64 instructions for generic machine instructions, one at a
/// time.
#[derive(Debug, Clone, Default)]
pub struct InstructionSelector<B = A64RegisterBankInfo, C = DescConstrainer> {
    banks: B,
    constrainer: C,
}

impl InstructionSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: RegisterBankInfo, C: ConstrainRegOperands> InstructionSelector<B, C> {
    #[must_use]
    pub fn with_parts(banks: B, constrainer: C) -> Self {
        Self { banks, constrainer }
    }

    /// Select `instr` in place.
    ///
    /// On success the instruction carries a target opcode, no types, any
    /// extra operands the target form needs, and `regs` holds the finalized
    /// classes of its virtual registers. On failure neither `instr` nor
    /// `regs` is modified.
    pub fn select(
        &self,
        instr: &mut MachineInstr,
        regs: &mut VRegInfo,
    ) -> Result<Selected, SelectError> {
        let Some(opcode) = instr.opcode().as_generic() else {
            tracing::trace!(%instr, "already selected");
            return Ok(Selected::AlreadySelected);
        };

        let result = self
            .plan(opcode, instr, regs)
            .and_then(|rewrite| self.commit(instr, regs, rewrite));
        if let Err(reason) = &result {
            tracing::debug!(%instr, %reason, "cannot select instruction");
        }
        result
    }

    fn plan(
        &self,
        opcode: GenericOpcode,
        instr: &MachineInstr,
        regs: &VRegInfo,
    ) -> Result<Rewrite, SelectError> {
        if instr.num_operands() != instr.num_explicit_operands() {
            return Err(SelectError::ImplicitOperands);
        }
        if !opcode.is_untyped() && instr.ty(0).is_none() {
            return Err(SelectError::MissingType { opcode, index: 0 });
        }

        match opcode {
            GenericOpcode::Br => Ok(Rewrite::new(A64Opcode::B)),
            GenericOpcode::FrameIndex => Self::plan_frame_index(instr),
            GenericOpcode::Load => self.plan_load_store(MemOp::Load, instr, regs),
            GenericOpcode::Store => self.plan_load_store(MemOp::Store, instr, regs),
            GenericOpcode::Mul => self.plan_mul(instr, regs),
            GenericOpcode::Or => self.plan_binary(BinaryOp::Or, instr, regs),
            GenericOpcode::Xor => self.plan_binary(BinaryOp::Xor, instr, regs),
            GenericOpcode::And => self.plan_binary(BinaryOp::And, instr, regs),
            GenericOpcode::Add => self.plan_binary(BinaryOp::Add, instr, regs),
            GenericOpcode::Sub => self.plan_binary(BinaryOp::Sub, instr, regs),
            GenericOpcode::Shl => self.plan_binary(BinaryOp::Shl, instr, regs),
            GenericOpcode::LShr => self.plan_binary(BinaryOp::LShr, instr, regs),
            GenericOpcode::AShr => self.plan_binary(BinaryOp::AShr, instr, regs),
            GenericOpcode::SDiv => self.plan_binary(BinaryOp::SDiv, instr, regs),
            GenericOpcode::UDiv => self.plan_binary(BinaryOp::UDiv, instr, regs),
            GenericOpcode::BrCond
            | GenericOpcode::Phi
            | GenericOpcode::PtrAdd
            | GenericOpcode::SRem
            | GenericOpcode::URem
            | GenericOpcode::Constant
            | GenericOpcode::ImplicitDef
            | GenericOpcode::ZExt
            | GenericOpcode::SExt
            | GenericOpcode::AnyExt
            | GenericOpcode::Trunc
            | GenericOpcode::ICmp
            | GenericOpcode::Select => Err(SelectError::Unhandled(opcode)),
        }
    }

    fn plan_frame_index(instr: &MachineInstr) -> Result<Rewrite, SelectError> {
        let opcode = GenericOpcode::FrameIndex;
        let ty = instr.ty(0).ok_or(SelectError::MissingType { opcode, index: 0 })?;
        // Frame objects only live in address space 0.
        if ty != LowLevelType::pointer(0) {
            return Err(SelectError::PointerType { opcode, found: ty });
        }
        // address = frame base + #0, lsl #0
        Ok(Rewrite::new(A64Opcode::ADDXri)
            .with_operand(MachineOperand::Imm(0))
            .with_operand(MachineOperand::Imm(0)))
    }

    fn plan_load_store(
        &self,
        op: MemOp,
        instr: &MachineInstr,
        regs: &VRegInfo,
    ) -> Result<Rewrite, SelectError> {
        let opcode = op.generic();
        let mem_ty = instr.ty(0).ok_or(SelectError::MissingType { opcode, index: 0 })?;
        let ptr_ty = instr.ty(1).ok_or(SelectError::MissingType { opcode, index: 1 })?;
        if ptr_ty != LowLevelType::pointer(0) {
            return Err(SelectError::PointerType {
                opcode,
                found: ptr_ty,
            });
        }
        let ptr = PointerOperand::new(opcode, instr, 1, regs, &self.banks)?;

        let value = reg_operand(opcode, instr, 0)?;
        let bank = self
            .banks
            .reg_bank(value, regs)
            .ok_or(SelectError::NoBank(value))?;
        let bits = mem_ty.size_in_bits().ok_or(SelectError::UnsizedType(opcode))?;
        let new_opcode = select_load_store_ui_op(op, bank, bits)
            .ok_or(SelectError::NoMapping { opcode, bank, bits })?;

        tracing::trace!(ptr = %ptr.reg(), %value, bits, "load/store operands");
        Ok(Rewrite::new(new_opcode).with_operand(MachineOperand::Imm(0)))
    }

    fn plan_mul(&self, instr: &MachineInstr, regs: &VRegInfo) -> Result<Rewrite, SelectError> {
        let opcode = GenericOpcode::Mul;
        let bank = check_binary_operands(opcode, instr, regs, &self.banks)?;
        if bank != RegBank::Gpr {
            return Err(SelectError::WrongBank { opcode, bank });
        }

        let ty = instr.ty(0).ok_or(SelectError::MissingType { opcode, index: 0 })?;
        // dst = src1 * src2 + zr
        let (new_opcode, zero) = match ty {
            LowLevelType::Scalar(32) => (A64Opcode::MADDWrrr, PhysReg::Wzr),
            LowLevelType::Scalar(64) => (A64Opcode::MADDXrrr, PhysReg::Xzr),
            _ => return Err(SelectError::UnsupportedType { opcode, ty }),
        };
        Ok(Rewrite::new(new_opcode).with_operand(MachineOperand::use_reg(zero)))
    }

    fn plan_binary(
        &self,
        op: BinaryOp,
        instr: &MachineInstr,
        regs: &VRegInfo,
    ) -> Result<Rewrite, SelectError> {
        let opcode = op.generic();
        // All operands share the bank of the def.
        let bank = check_binary_operands(opcode, instr, regs, &self.banks)?;
        let bits = instr
            .ty(0)
            .and_then(LowLevelType::size_in_bits)
            .ok_or(SelectError::UnsizedType(opcode))?;
        let new_opcode =
            select_binary_op(op, bank, bits).ok_or(SelectError::NoMapping { opcode, bank, bits })?;
        Ok(Rewrite::new(new_opcode))
    }

    fn commit(
        &self,
        instr: &mut MachineInstr,
        regs: &mut VRegInfo,
        rewrite: Rewrite,
    ) -> Result<Selected, SelectError> {
        let mut selected = instr.clone();
        selected.set_opcode(rewrite.opcode);
        selected.remove_types();
        for operand in rewrite.extra_operands {
            selected.add_operand(operand);
        }

        let classes = self.constrainer.constrain(&selected, regs, &self.banks)?;
        for (vreg, class) in classes {
            // Every vreg in `classes` was looked up in `regs` by the constrainer.
            let known = regs.set_class(vreg, class);
            debug_assert!(known, "constrainer assigned a class to unknown {vreg}");
        }

        tracing::debug!(from = %instr, to = %selected, "selected");
        *instr = selected;
        Ok(Selected::Rewritten(rewrite.opcode))
    }
}
