// Register-operand constraint finalization.
//
// Once an opcode is chosen, every register operand must be narrowed to the
// register class the opcode's descriptor requires. Constraining computes the
// class assignments without mutating anything so the selector can commit
// them together with the rewritten instruction.

use crate::mir::{MachineInstr, Opcode, Register, VReg, VRegInfo};
use crate::target::{A64Opcode, OperandConstraint, PhysReg, RegBank, RegClass, operand_constraints};

use super::RegisterBankInfo;

/// Register class assignments produced by constraining one instruction.
pub type ClassAssignments = Vec<(VReg, RegClass)>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstrainError {
    #[error("cannot constrain operands of generic instruction {0}")]
    NotSelected(Opcode),

    #[error("{opcode} has no operand {index}")]
    NoOperandSlot { opcode: A64Opcode, index: usize },

    #[error("{opcode} operand {index} does not take a register")]
    NotARegisterSlot { opcode: A64Opcode, index: usize },

    #[error("unknown virtual register {0}")]
    UnknownVReg(VReg),

    #[error("{vreg} on bank {bank} cannot be constrained to {class}")]
    BankConflict {
        vreg: VReg,
        bank: RegBank,
        class: RegClass,
    },

    #[error("{vreg} is {bits} bits wide, {class} holds {} bits", .class.size_bits())]
    SizeMismatch {
        vreg: VReg,
        bits: u32,
        class: RegClass,
    },

    #[error("{vreg} is already {current}, which has no common subclass with {required}")]
    NoCommonSubclass {
        vreg: VReg,
        current: RegClass,
        required: RegClass,
    },

    #[error("{reg} is not in {class}")]
    PhysRegNotInClass { reg: PhysReg, class: RegClass },
}

/// Finalizes register classes for a selected instruction.
pub trait ConstrainRegOperands {
    fn constrain(
        &self,
        instr: &MachineInstr,
        regs: &VRegInfo,
        banks: &dyn RegisterBankInfo,
    ) -> Result<ClassAssignments, ConstrainError>;
}

/// Constrains operands from the AArch64 instruction descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescConstrainer;

impl ConstrainRegOperands for DescConstrainer {
    fn constrain(
        &self,
        instr: &MachineInstr,
        regs: &VRegInfo,
        banks: &dyn RegisterBankInfo,
    ) -> Result<ClassAssignments, ConstrainError> {
        let opcode = instr
            .opcode()
            .as_target()
            .ok_or(ConstrainError::NotSelected(instr.opcode()))?;
        let Some(constraints) = operand_constraints(opcode) else {
            return Ok(Vec::new());
        };

        let mut assigned: ClassAssignments = Vec::new();
        let explicit = instr.operands().iter().enumerate().filter(|(_, op)| !op.is_implicit());
        for (index, op) in explicit {
            // Frame indices and immediates are not register-constrained, even
            // in a register slot.
            let Some(reg) = op.reg() else {
                continue;
            };
            let required = match constraints.get(index) {
                Some(OperandConstraint::Reg(class)) => *class,
                Some(_) => return Err(ConstrainError::NotARegisterSlot { opcode, index }),
                None => return Err(ConstrainError::NoOperandSlot { opcode, index }),
            };

            match reg {
                Register::Physical(preg) => {
                    if !required.contains(preg) {
                        return Err(ConstrainError::PhysRegNotInClass {
                            reg: preg,
                            class: required,
                        });
                    }
                }
                Register::Virtual(vreg) => {
                    let class = constrain_vreg(vreg, required, regs, banks, &assigned)?;
                    match assigned.iter_mut().find(|(v, _)| *v == vreg) {
                        Some(entry) => entry.1 = class,
                        None => assigned.push((vreg, class)),
                    }
                }
            }
        }
        Ok(assigned)
    }
}

fn constrain_vreg(
    vreg: VReg,
    required: RegClass,
    regs: &VRegInfo,
    banks: &dyn RegisterBankInfo,
    assigned: &ClassAssignments,
) -> Result<RegClass, ConstrainError> {
    let data = regs.get(vreg).ok_or(ConstrainError::UnknownVReg(vreg))?;
    let current = assigned
        .iter()
        .find(|(v, _)| *v == vreg)
        .map(|(_, c)| *c)
        .or(data.class);

    if let Some(current) = current {
        return current
            .common_subclass(required)
            .ok_or(ConstrainError::NoCommonSubclass {
                vreg,
                current,
                required,
            });
    }

    if let Some(bank) = banks.reg_bank(Register::Virtual(vreg), regs)
        && bank != required.bank()
    {
        return Err(ConstrainError::BankConflict {
            vreg,
            bank,
            class: required,
        });
    }
    if data.size_bits != required.size_bits() {
        return Err(ConstrainError::SizeMismatch {
            vreg,
            bits: data.size_bits,
            class: required,
        });
    }
    Ok(required)
}
