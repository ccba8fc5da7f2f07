use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input problems detected by `convert()` before any computation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("input is empty")]
    EmptyInput,
    #[error("input is not a finite number")]
    NotANumber,
}

impl ValidationError {
    /// Short notice suitable for a transient toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "Please enter a value to convert!",
            ValidationError::NotANumber => "Please enter a valid number!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown length unit '{0}'")]
pub struct UnknownUnit(pub String);
