//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{ConversionKind, MalformedExpression, Notation};

/// Application errors wrap domain errors and add request-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] MalformedExpression),

    #[error("input type {declared} does not match conversion {kind}")]
    NotationMismatch {
        declared: Notation,
        kind: ConversionKind,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
