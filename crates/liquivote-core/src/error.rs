use thiserror::Error;

/// Errors that can occur in election operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElectionError {
    #[error("Voter name must not be empty")]
    EmptyVoterName,

    #[error("Invalid voter name: {0}")]
    InvalidVoterName(String),
}
