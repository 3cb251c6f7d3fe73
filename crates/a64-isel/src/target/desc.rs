use super::{A64Opcode, RegClass};

/// What an operand slot of a target instruction accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandConstraint {
    Reg(RegClass),
    Imm,
    Block,
}

use OperandConstraint::{Block, Imm, Reg};

const GPR32_RRR: &[OperandConstraint] = &[
    Reg(RegClass::GPR32),
    Reg(RegClass::GPR32),
    Reg(RegClass::GPR32),
];
const GPR64_RRR: &[OperandConstraint] = &[
    Reg(RegClass::GPR64),
    Reg(RegClass::GPR64),
    Reg(RegClass::GPR64),
];
const GPR32_RRRR: &[OperandConstraint] = &[
    Reg(RegClass::GPR32),
    Reg(RegClass::GPR32),
    Reg(RegClass::GPR32),
    Reg(RegClass::GPR32),
];
const GPR64_RRRR: &[OperandConstraint] = &[
    Reg(RegClass::GPR64),
    Reg(RegClass::GPR64),
    Reg(RegClass::GPR64),
    Reg(RegClass::GPR64),
];
const MEM_W_UI: &[OperandConstraint] = &[Reg(RegClass::GPR32), Reg(RegClass::GPR64sp), Imm];
const MEM_X_UI: &[OperandConstraint] = &[Reg(RegClass::GPR64), Reg(RegClass::GPR64sp), Imm];
// dst, src, imm12, shift
const ADD_X_RI: &[OperandConstraint] = &[
    Reg(RegClass::GPR64sp),
    Reg(RegClass::GPR64sp),
    Imm,
    Imm,
];

/// Operand constraints for each explicit operand of `opcode`.
///
/// Returns `None` for opcodes whose operands are not fixed (`COPY`).
#[must_use]
pub fn operand_constraints(opcode: A64Opcode) -> Option<&'static [OperandConstraint]> {
    let constraints = match opcode {
        A64Opcode::Copy => return None,
        A64Opcode::B => &[Block][..],
        A64Opcode::ADDXri => ADD_X_RI,
        A64Opcode::LDRWui | A64Opcode::STRWui => MEM_W_UI,
        A64Opcode::LDRXui | A64Opcode::STRXui => MEM_X_UI,
        A64Opcode::MADDWrrr => GPR32_RRRR,
        A64Opcode::MADDXrrr => GPR64_RRRR,
        A64Opcode::ORRWrr
        | A64Opcode::EORWrr
        | A64Opcode::ANDWrr
        | A64Opcode::ADDWrr
        | A64Opcode::SUBWrr
        | A64Opcode::LSLVWr
        | A64Opcode::LSRVWr
        | A64Opcode::ASRVWr
        | A64Opcode::SDIVWr
        | A64Opcode::UDIVWr => GPR32_RRR,
        A64Opcode::ORRXrr
        | A64Opcode::EORXrr
        | A64Opcode::ANDXrr
        | A64Opcode::ADDXrr
        | A64Opcode::SUBXrr
        | A64Opcode::LSLVXr
        | A64Opcode::LSRVXr
        | A64Opcode::ASRVXr
        | A64Opcode::SDIVXr
        | A64Opcode::UDIVXr => GPR64_RRR,
    };
    Some(constraints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fixed_opcode_has_constraints() {
        for op in A64Opcode::ALL {
            let constraints = operand_constraints(op);
            assert_eq!(constraints.is_none(), op == A64Opcode::Copy, "{op}");
        }
    }

    #[test]
    fn register_widths_match_opcode_width() {
        for (op, bits) in [
            (A64Opcode::ADDWrr, 32),
            (A64Opcode::UDIVXr, 64),
            (A64Opcode::MADDWrrr, 32),
        ] {
            let constraints = operand_constraints(op).expect("fixed operands");
            for c in constraints {
                let Reg(class) = c else {
                    panic!("{op}: unexpected non-register slot");
                };
                assert_eq!(class.size_bits(), bits, "{op}");
            }
        }
    }
}
