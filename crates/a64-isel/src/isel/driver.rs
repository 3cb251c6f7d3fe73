// Function-level selection: walks every instruction in program order and
// fails the whole function on the first rejection (or, with
// `report_all_failures`, after collecting every rejection).

use std::fmt;

use crate::mir::{BlockId, MachineFunction, Register};
use crate::target::operand_constraints;
use crate::{Error, Result};

use super::{ConstrainRegOperands, InstructionSelector, RegisterBankInfo, SelectError, Selected};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOptions {
    /// Keep selecting after a rejection so every unselectable instruction
    /// is reported. The function still fails.
    pub report_all_failures: bool,
    /// Check the selected function with [`verify_selected`].
    pub verify: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            report_all_failures: false,
            verify: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionReport {
    /// Generic instructions rewritten to target instructions.
    pub selected: usize,
    /// Instructions that were target-specific on entry.
    pub already_selected: usize,
}

/// One instruction the selector rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFailure {
    pub block: BlockId,
    /// Position of the instruction within its block.
    pub index: usize,
    /// The instruction as printed before selection.
    pub instr: String,
    pub reason: SelectError,
}

impl fmt::Display for SelectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} `{}`: {}",
            self.block, self.index, self.instr, self.reason
        )
    }
}

impl<B: RegisterBankInfo, C: ConstrainRegOperands> InstructionSelector<B, C> {
    /// Select every instruction of `func` in program order.
    pub fn select_function(
        &self,
        func: &mut MachineFunction,
        options: &SelectOptions,
    ) -> Result<SelectionReport> {
        let mut report = SelectionReport::default();
        let mut failures = Vec::new();

        for bb in &mut func.blocks {
            for (index, instr) in bb.instrs.iter_mut().enumerate() {
                match self.select(instr, &mut func.regs) {
                    Ok(Selected::Rewritten(_)) => report.selected += 1,
                    Ok(Selected::AlreadySelected) => report.already_selected += 1,
                    Err(reason) => {
                        failures.push(SelectionFailure {
                            block: bb.id,
                            index,
                            instr: instr.to_string(),
                            reason,
                        });
                        if !options.report_all_failures {
                            return Err(Error::Unselectable {
                                function: func.name.clone(),
                                failures,
                            });
                        }
                    }
                }
            }
        }

        if !failures.is_empty() {
            return Err(Error::Unselectable {
                function: func.name.clone(),
                failures,
            });
        }

        if options.verify {
            verify_selected(func)?;
        }

        tracing::debug!(
            function = %func.name,
            selected = report.selected,
            already_selected = report.already_selected,
            "selected function"
        );
        Ok(report)
    }
}

/// Select `func` with the default AArch64 selector.
pub fn select_function(
    func: &mut MachineFunction,
    options: &SelectOptions,
) -> Result<SelectionReport> {
    InstructionSelector::new().select_function(func, options)
}

/// Check that no generic instruction survived selection: every instruction
/// is target-specific, carries no types, and every virtual register operand
/// of a fixed-operand instruction has a register class.
pub fn verify_selected(func: &MachineFunction) -> Result<()> {
    let fail = |message: String| Error::Verification {
        function: func.name.clone(),
        message,
    };

    for bb in &func.blocks {
        for (index, instr) in bb.instrs.iter().enumerate() {
            let Some(opcode) = instr.opcode().as_target() else {
                return Err(fail(format!(
                    "{} #{index}: generic instruction `{instr}` survived selection",
                    bb.id
                )));
            };
            if !instr.types().is_empty() {
                return Err(fail(format!(
                    "{} #{index}: selected instruction `{instr}` still has types",
                    bb.id
                )));
            }
            if operand_constraints(opcode).is_none() {
                continue;
            }
            let unconstrained = instr
                .operands()
                .iter()
                .filter_map(|op| op.reg().and_then(Register::as_virtual))
                .find(|&vreg| func.regs.class(vreg).is_none());
            if let Some(vreg) = unconstrained {
                return Err(fail(format!(
                    "{} #{index}: {vreg} in `{instr}` has no register class",
                    bb.id
                )));
            }
        }
    }
    Ok(())
}
