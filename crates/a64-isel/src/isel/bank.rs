use crate::mir::{Register, VRegInfo};
use crate::target::RegBank;

/// Register bank lookup.
pub trait RegisterBankInfo {
    /// Bank of `reg`, or `None` if it has neither a bank nor a class.
    fn reg_bank(&self, reg: Register, regs: &VRegInfo) -> Option<RegBank>;
}

/// AArch64 bank lookup: a virtual register's assigned bank, falling back to
/// the bank of its class; a physical register's register file.
#[derive(Debug, Clone, Copy, Default)]
pub struct A64RegisterBankInfo;

impl RegisterBankInfo for A64RegisterBankInfo {
    fn reg_bank(&self, reg: Register, regs: &VRegInfo) -> Option<RegBank> {
        match reg {
            Register::Virtual(vreg) => {
                let data = regs.get(vreg)?;
                data.bank.or_else(|| data.class.map(|c| c.bank()))
            }
            Register::Physical(preg) => Some(preg.bank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mir::{VReg, VRegData};
    use crate::target::{PhysReg, RegClass};

    #[test]
    fn bank_falls_back_to_class() {
        let mut regs = VRegInfo::new();
        let banked = regs.create(64, Some(RegBank::Gpr));
        let bankless = regs.create(32, None);
        regs.declare(
            VReg(5),
            VRegData {
                size_bits: 64,
                bank: None,
                class: Some(RegClass::FPR64),
            },
        );

        let info = A64RegisterBankInfo;
        assert_eq!(info.reg_bank(banked.into(), &regs), Some(RegBank::Gpr));
        assert_eq!(info.reg_bank(bankless.into(), &regs), None);
        assert_eq!(info.reg_bank(VReg(5).into(), &regs), Some(RegBank::Fpr));
        assert_eq!(info.reg_bank(VReg(9).into(), &regs), None);
        assert_eq!(info.reg_bank(PhysReg::D(0).into(), &regs), Some(RegBank::Fpr));
        assert_eq!(info.reg_bank(PhysReg::Xzr.into(), &regs), Some(RegBank::Gpr));
    }
}
