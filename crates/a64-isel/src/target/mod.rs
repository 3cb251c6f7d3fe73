//! AArch64 target description: opcodes, register files and per-opcode
//! operand constraints.

mod desc;
mod opcode;
mod registers;

pub use desc::{OperandConstraint, operand_constraints};
pub use opcode::A64Opcode;
pub use registers::{PhysReg, RegBank, RegClass};
