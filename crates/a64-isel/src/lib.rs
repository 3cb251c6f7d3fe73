#![allow(
    clippy::missing_errors_doc // errors are the typed rejection reasons documented on each enum
)]

pub mod error;
pub mod isel;
pub mod mir;
pub mod target;

/// Test harness module for writing unit and integration tests.
///
/// This module is only available when running tests or when the
/// `test-harness` feature is enabled.
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use error::{Error, Result};
pub use isel::{
    InstructionSelector, SelectError, SelectOptions, Selected, SelectionReport, select_function,
};
pub use mir::{MachineFunction, MachineInstr, parse_function, parse_module};
