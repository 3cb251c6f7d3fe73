use std::fmt;

use crate::target::PhysReg;

/// Virtual register number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VReg(pub u32);

impl fmt::Display for VReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Virtual(VReg),
    Physical(PhysReg),
}

impl Register {
    #[must_use]
    pub const fn as_virtual(self) -> Option<VReg> {
        match self {
            Self::Virtual(v) => Some(v),
            Self::Physical(_) => None,
        }
    }

    #[must_use]
    pub const fn is_virtual(self) -> bool {
        matches!(self, Self::Virtual(_))
    }
}

impl From<VReg> for Register {
    fn from(v: VReg) -> Self {
        Self::Virtual(v)
    }
}

impl From<PhysReg> for Register {
    fn from(p: PhysReg) -> Self {
        Self::Physical(p)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Virtual(v) => v.fmt(f),
            Self::Physical(p) => p.fmt(f),
        }
    }
}

/// Basic block number within a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb.{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineOperand {
    Reg {
        reg: Register,
        is_def: bool,
        is_implicit: bool,
    },
    Imm(i64),
    FrameIndex(u32),
    Block(BlockId),
}

impl MachineOperand {
    #[must_use]
    pub fn def(reg: impl Into<Register>) -> Self {
        Self::Reg {
            reg: reg.into(),
            is_def: true,
            is_implicit: false,
        }
    }

    #[must_use]
    pub fn use_reg(reg: impl Into<Register>) -> Self {
        Self::Reg {
            reg: reg.into(),
            is_def: false,
            is_implicit: false,
        }
    }

    #[must_use]
    pub fn implicit_use(reg: impl Into<Register>) -> Self {
        Self::Reg {
            reg: reg.into(),
            is_def: false,
            is_implicit: true,
        }
    }

    #[must_use]
    pub const fn reg(&self) -> Option<Register> {
        match self {
            Self::Reg { reg, .. } => Some(*reg),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_reg(&self) -> bool {
        matches!(self, Self::Reg { .. })
    }

    #[must_use]
    pub const fn is_def(&self) -> bool {
        matches!(self, Self::Reg { is_def: true, .. })
    }

    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        matches!(
            self,
            Self::Reg {
                is_implicit: true,
                ..
            }
        )
    }

    #[must_use]
    pub const fn imm(&self) -> Option<i64> {
        match self {
            Self::Imm(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for MachineOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reg {
                reg,
                is_def,
                is_implicit: true,
            } => {
                let kind = if *is_def { "implicit-def" } else { "implicit" };
                write!(f, "{kind} {reg}")
            }
            Self::Reg { reg, .. } => reg.fmt(f),
            Self::Imm(v) => write!(f, "{v}"),
            Self::FrameIndex(idx) => write!(f, "%stack.{idx}"),
            Self::Block(bb) => bb.fmt(f),
        }
    }
}
