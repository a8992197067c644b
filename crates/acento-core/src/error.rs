use thiserror::Error;

/// Why a character was not inserted. Callers log these and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("no editable element has focus")]
    NoTarget,
    #[error("content-editable element has no selection range")]
    NoSelection,
    #[error("host rejected the edit: {0}")]
    Host(String),
}

/// Structural problems in a chord table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("chord group {group} has an empty gate")]
    EmptyGate { group: usize },
    #[error("chord group {group} has no branches")]
    NoBranches { group: usize },
    #[error("chord group {group}: {upper:?} is not the capital of {lower:?}")]
    CaseMismatch {
        group: usize,
        lower: char,
        upper: char,
    },
    #[error("chord group {group}: branch {branch} can never fire")]
    UnreachableBranch { group: usize, branch: usize },
}
