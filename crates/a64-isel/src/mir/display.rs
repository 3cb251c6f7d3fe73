use std::fmt;

use super::{MachineFunction, MachineInstr, Opcode};

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for MachineInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_defs = self.num_defs();
        let (defs, rest) = self.operands().split_at(num_defs);

        for (i, def) in defs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{def}")?;
        }
        if num_defs > 0 {
            f.write_str(" = ")?;
        }

        write!(f, "{}", self.opcode())?;

        if !self.types().is_empty() {
            f.write_str(" {")?;
            for (i, ty) in self.types().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{ty}")?;
            }
            f.write_str("}")?;
        }

        for (i, op) in rest.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl fmt::Display for MachineFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "func @{}", self.name)?;
        for (vreg, data) in self.regs.iter() {
            write!(f, "  vreg {vreg} {}", data.size_bits)?;
            if let Some(bank) = data.bank {
                write!(f, " {bank}")?;
            }
            if let Some(class) = data.class {
                write!(f, " {class}")?;
            }
            writeln!(f)?;
        }
        for bb in &self.blocks {
            writeln!(f, "{}:", bb.id)?;
            for instr in &bb.instrs {
                writeln!(f, "  {instr}")?;
            }
        }
        Ok(())
    }
}
