use crate::isel::SelectionFailure;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(
        "cannot select function '{function}': {} unselectable instruction(s), first: {}",
        .failures.len(),
        first_failure(.failures)
    )]
    Unselectable {
        function: String,
        failures: Vec<SelectionFailure>,
    },

    #[error("verification of '{function}' failed: {message}")]
    Verification { function: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

fn first_failure(failures: &[SelectionFailure]) -> String {
    failures
        .first()
        .map_or_else(|| "<none>".to_string(), ToString::to_string)
}

pub type Result<T> = std::result::Result<T, Error>;
