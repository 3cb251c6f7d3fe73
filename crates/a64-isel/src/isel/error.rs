use crate::mir::{GenericOpcode, LowLevelType, Register};
use crate::target::{PhysReg, RegBank};

use super::ConstrainError;

/// Why an instruction could not be selected.
///
/// Variants split into malformed input (see [`SelectError::is_malformed`]),
/// which upstream passes guarantee never reaches the selector, and shapes the
/// AArch64 selector does not support yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("generic instruction has unexpected implicit operands")]
    ImplicitOperands,

    #[error("{opcode} is missing type {index}")]
    MissingType { opcode: GenericOpcode, index: usize },

    #[error("{opcode} is missing operand {index}")]
    MissingOperand { opcode: GenericOpcode, index: usize },

    #[error("{0} should be sized")]
    UnsizedType(GenericOpcode),

    #[error("operand {index} is not a register; non-register operands are unsupported")]
    NonRegisterOperand { index: usize },

    #[error("operand {index} is physical register {reg}; only virtual registers are supported")]
    PhysicalRegister { index: usize, reg: PhysReg },

    #[error("register {0} has no bank or class")]
    NoBank(Register),

    #[error("operands have different banks ({first} vs {other})")]
    BankMismatch { first: RegBank, other: RegBank },

    #[error("{opcode} pointer has type {found}, expected p0")]
    PointerType {
        opcode: GenericOpcode,
        found: LowLevelType,
    },

    #[error("load/store pointer operand {0} isn't a gpr")]
    PointerNotGpr(Register),

    #[error("load/store pointer operand {0} isn't 64-bit")]
    PointerNot64Bit(Register),

    #[error("{opcode} on bank {bank}, expected gpr")]
    WrongBank { opcode: GenericOpcode, bank: RegBank },

    #[error("{opcode} has type {ty}, expected s32 or s64")]
    UnsupportedType {
        opcode: GenericOpcode,
        ty: LowLevelType,
    },

    #[error("no {opcode} variant for bank {bank} at {bits} bits")]
    NoMapping {
        opcode: GenericOpcode,
        bank: RegBank,
        bits: u32,
    },

    #[error("{0} is not handled by the aarch64 selector")]
    Unhandled(GenericOpcode),

    #[error("cannot constrain operands: {0}")]
    Constrain(#[from] ConstrainError),
}

impl SelectError {
    /// Whether the instruction broke the input IR contract rather than
    /// using an unsupported shape.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::ImplicitOperands | Self::MissingType { .. } | Self::MissingOperand { .. }
        )
    }
}
