//! Generic machine IR: the representation the selector consumes and rewrites
//! in place.

mod display;
mod function;
mod generic;
mod instruction;
mod operand;
mod parser;
mod types;

pub use function::{MachineBasicBlock, MachineFunction, VRegData, VRegInfo};
pub use generic::{BinaryOp, GenericOpcode, MemOp};
pub use instruction::{MachineInstr, Opcode};
pub use operand::{BlockId, MachineOperand, Register, VReg};
pub use parser::{parse_function, parse_module};
pub use types::{LowLevelType, POINTER_BITS};
