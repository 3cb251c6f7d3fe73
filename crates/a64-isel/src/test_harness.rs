//! Test harness for a64-isel unit and integration tests
//!
//! Functions are written in the textual machine IR format and selected
//! through the same entry points the CLI uses.
//!
//! # Example
//!
//! ```rust
//! use a64_isel::test_harness::*;
//!
//! let func = select_text(
//!     r#"
//!     func @add
//!       vreg %0 32 gpr
//!       vreg %1 32 gpr
//!       vreg %2 32 gpr
//!     bb.0:
//!       %2 = G_ADD {s32} %0, %1
//!     "#,
//! )
//! .expect("select");
//!
//! assert_instrs(&func, &["%2 = ADDWrr %0, %1"]);
//! ```

#![allow(
    clippy::must_use_candidate,
    clippy::missing_panics_doc,
    clippy::manual_assert
)]

use crate::isel::{InstructionSelector, SelectError, SelectOptions, Selected, select_function};
use crate::mir::{MachineFunction, MachineInstr, VReg, parse_function};
use crate::target::RegClass;
use crate::Result;

/// Parse and select a single function with default options.
pub fn select_text(text: &str) -> Result<MachineFunction> {
    let mut func = parse_function(text)?;
    select_function(&mut func, &SelectOptions::default())?;
    Ok(func)
}

/// Parse a function and select only its first instruction.
///
/// Returns the function after the attempt together with the outcome, so
/// tests can inspect both rewritten and rejected instructions.
pub fn select_first(text: &str) -> Result<(MachineFunction, std::result::Result<Selected, SelectError>)> {
    let mut func = parse_function(text)?;
    let selector = InstructionSelector::new();
    let outcome = match func.blocks.first_mut().and_then(|bb| bb.instrs.first_mut()) {
        Some(instr) => selector.select(instr, &mut func.regs),
        None => {
            return Err(crate::Error::Internal(
                "function has no instructions".to_string(),
            ));
        }
    };
    Ok((func, outcome))
}

/// Build a one-block function from vreg declarations (`"%0 64 gpr"`) and one
/// instruction line.
pub fn single_instr(vregs: &[&str], instr: &str) -> String {
    let mut text = String::from("func @test\n");
    for decl in vregs {
        text.push_str("  vreg ");
        text.push_str(decl);
        text.push('\n');
    }
    text.push_str("bb.0:\n  ");
    text.push_str(instr);
    text.push('\n');
    text
}

/// The first instruction of the first block.
pub fn first_instr(func: &MachineFunction) -> &MachineInstr {
    func.instrs().next().expect("function has no instructions")
}

/// Printed form of every instruction in program order.
pub fn instr_texts(func: &MachineFunction) -> Vec<String> {
    func.instrs().map(ToString::to_string).collect()
}

/// Assert the printed instructions of `func` match `expected` exactly.
pub fn assert_instrs(func: &MachineFunction, expected: &[&str]) {
    let actual = instr_texts(func);
    if actual != expected {
        panic!(
            "instruction mismatch\n  expected: {expected:#?}\n  actual: {actual:#?}\n\n{func}"
        );
    }
}

/// Assert that `vreg` ended up in `class`.
pub fn assert_class(func: &MachineFunction, vreg: u32, class: RegClass) {
    let actual = func.regs.class(VReg(vreg));
    if actual != Some(class) {
        panic!("%{vreg}: expected class {class}, found {actual:?}\n\n{func}");
    }
}
