// Structural checks run before opcode-specific selection.

use crate::mir::{GenericOpcode, MachineInstr, POINTER_BITS, Register, VRegInfo};
use crate::target::{PhysReg, RegBank};

use super::{RegisterBankInfo, SelectError};

/// Check that a generic binary operation has a shape the selector handles:
/// a sized type, only virtual register operands, all on the same bank.
///
/// Returns the common bank. These are mostly limitations of the AArch64
/// selector rather than properties of valid generic IR.
pub fn check_binary_operands(
    opcode: GenericOpcode,
    instr: &MachineInstr,
    regs: &VRegInfo,
    banks: &impl RegisterBankInfo,
) -> Result<RegBank, SelectError> {
    let ty = instr
        .ty(0)
        .ok_or(SelectError::MissingType { opcode, index: 0 })?;
    if !ty.is_sized() {
        return Err(SelectError::UnsizedType(opcode));
    }

    let mut common: Option<RegBank> = None;
    for (index, op) in instr.operands().iter().enumerate() {
        let reg = op
            .reg()
            .ok_or(SelectError::NonRegisterOperand { index })?;
        if let Register::Physical(reg) = reg {
            return Err(SelectError::PhysicalRegister { index, reg });
        }
        let bank = banks.reg_bank(reg, regs).ok_or(SelectError::NoBank(reg))?;
        match common {
            Some(first) if first != bank => {
                return Err(SelectError::BankMismatch { first, other: bank });
            }
            _ => common = Some(bank),
        }
    }

    common.ok_or(SelectError::MissingOperand { opcode, index: 0 })
}

/// Register operand `index` of `instr`.
pub fn reg_operand(
    opcode: GenericOpcode,
    instr: &MachineInstr,
    index: usize,
) -> Result<Register, SelectError> {
    instr
        .operand(index)
        .ok_or(SelectError::MissingOperand { opcode, index })?
        .reg()
        .ok_or(SelectError::NonRegisterOperand { index })
}

/// Pointer operand of a load or store, known to live in a 64-bit
/// general-purpose register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerOperand(Register);

impl PointerOperand {
    pub fn new(
        opcode: GenericOpcode,
        instr: &MachineInstr,
        index: usize,
        regs: &VRegInfo,
        banks: &impl RegisterBankInfo,
    ) -> Result<Self, SelectError> {
        let reg = reg_operand(opcode, instr, index)?;
        if banks.reg_bank(reg, regs) != Some(RegBank::Gpr) {
            return Err(SelectError::PointerNotGpr(reg));
        }
        let bits = match reg {
            Register::Virtual(vreg) => regs.size_bits(vreg),
            Register::Physical(preg) => Some(PhysReg::size_bits(preg)),
        };
        if bits != Some(POINTER_BITS) {
            return Err(SelectError::PointerNot64Bit(reg));
        }
        Ok(Self(reg))
    }

    #[must_use]
    pub const fn reg(self) -> Register {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isel::A64RegisterBankInfo;
    use crate::mir::{LowLevelType, MachineOperand, VReg};

    fn gpr_regs(n: u32, bits: u32) -> VRegInfo {
        let mut regs = VRegInfo::new();
        for _ in 0..n {
            regs.create(bits, Some(RegBank::Gpr));
        }
        regs
    }

    fn add(ty: LowLevelType) -> MachineInstr {
        MachineInstr::new(GenericOpcode::Add)
            .with_type(ty)
            .with_def(VReg(0))
            .with_use(VReg(1))
            .with_use(VReg(2))
    }

    #[test]
    fn accepts_same_bank_vregs() {
        let regs = gpr_regs(3, 32);
        let bank = check_binary_operands(
            GenericOpcode::Add,
            &add(LowLevelType::scalar(32)),
            &regs,
            &A64RegisterBankInfo,
        );
        assert_eq!(bank, Ok(RegBank::Gpr));
    }

    #[test]
    fn rejects_unsized_type() {
        let regs = gpr_regs(3, 32);
        let err = check_binary_operands(
            GenericOpcode::Add,
            &add(LowLevelType::Unsized),
            &regs,
            &A64RegisterBankInfo,
        );
        assert_eq!(err, Err(SelectError::UnsizedType(GenericOpcode::Add)));
    }

    #[test]
    fn rejects_immediate_operand() {
        let regs = gpr_regs(2, 32);
        let instr = MachineInstr::new(GenericOpcode::Add)
            .with_type(LowLevelType::scalar(32))
            .with_def(VReg(0))
            .with_use(VReg(1))
            .with_imm(4);
        let err = check_binary_operands(GenericOpcode::Add, &instr, &regs, &A64RegisterBankInfo);
        assert_eq!(err, Err(SelectError::NonRegisterOperand { index: 2 }));
    }

    #[test]
    fn rejects_physical_register() {
        let regs = gpr_regs(2, 32);
        let instr = MachineInstr::new(GenericOpcode::Add)
            .with_type(LowLevelType::scalar(32))
            .with_def(VReg(0))
            .with_use(PhysReg::W(3))
            .with_use(VReg(1));
        let err = check_binary_operands(GenericOpcode::Add, &instr, &regs, &A64RegisterBankInfo);
        assert_eq!(
            err,
            Err(SelectError::PhysicalRegister {
                index: 1,
                reg: PhysReg::W(3)
            })
        );
    }

    #[test]
    fn rejects_bankless_register() {
        let mut regs = gpr_regs(2, 32);
        let bankless = regs.create(32, None);
        let instr = MachineInstr::new(GenericOpcode::Add)
            .with_type(LowLevelType::scalar(32))
            .with_def(VReg(0))
            .with_use(VReg(1))
            .with_use(bankless);
        let err = check_binary_operands(GenericOpcode::Add, &instr, &regs, &A64RegisterBankInfo);
        assert_eq!(err, Err(SelectError::NoBank(bankless.into())));
    }

    #[test]
    fn rejects_mixed_banks() {
        let mut regs = gpr_regs(2, 64);
        let fpr = regs.create(64, Some(RegBank::Fpr));
        let instr = MachineInstr::new(GenericOpcode::Add)
            .with_type(LowLevelType::scalar(64))
            .with_def(VReg(0))
            .with_use(fpr)
            .with_use(VReg(1));
        let err = check_binary_operands(GenericOpcode::Add, &instr, &regs, &A64RegisterBankInfo);
        assert_eq!(
            err,
            Err(SelectError::BankMismatch {
                first: RegBank::Gpr,
                other: RegBank::Fpr
            })
        );
    }

    #[test]
    fn pointer_operand_requires_64_bit_gpr() {
        let mut regs = gpr_regs(1, 32);
        let narrow = regs.create(32, Some(RegBank::Gpr));
        let fpr = regs.create(64, Some(RegBank::Fpr));
        let wide = regs.create(64, Some(RegBank::Gpr));
        let load = |ptr: Register| {
            MachineInstr::new(GenericOpcode::Load)
                .with_type(LowLevelType::scalar(32))
                .with_type(LowLevelType::pointer(0))
                .with_def(VReg(0))
                .with_operand(MachineOperand::use_reg(ptr))
        };
        let check = |ptr: Register| {
            PointerOperand::new(GenericOpcode::Load, &load(ptr), 1, &regs, &A64RegisterBankInfo)
        };

        assert_eq!(
            check(narrow.into()),
            Err(SelectError::PointerNot64Bit(narrow.into()))
        );
        assert_eq!(check(fpr.into()), Err(SelectError::PointerNotGpr(fpr.into())));
        assert_eq!(check(wide.into()).map(PointerOperand::reg), Ok(wide.into()));
        assert_eq!(
            check(PhysReg::Sp.into()).map(PointerOperand::reg),
            Ok(PhysReg::Sp.into())
        );
    }
}
