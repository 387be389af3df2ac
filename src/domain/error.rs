//! Domain-level errors

use itertools::Itertools;
use thiserror::Error;

use crate::domain::token::{Notation, Operator};

/// The single failure kind of the converters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {notation} expression: {reason}")]
pub struct MalformedExpression {
    pub notation: Notation,
    pub reason: MalformedReason,
}

impl MalformedExpression {
    pub fn new(notation: Notation, reason: MalformedReason) -> Self {
        Self { notation, reason }
    }

    pub fn postfix(reason: MalformedReason) -> Self {
        Self::new(Notation::Postfix, reason)
    }

    pub fn infix(reason: MalformedReason) -> Self {
        Self::new(Notation::Infix, reason)
    }
}

/// What exactly was wrong with the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("expression is empty")]
    Empty,

    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("operator '{operator}' at position {position} has fewer than two operands")]
    MissingOperand { operator: Operator, position: usize },

    #[error("{} items left on the stack: {}", .remaining.len(), .remaining.iter().join(", "))]
    DanglingOperands { remaining: Vec<String> },

    #[error("operand '{operand}' has no operator applied")]
    BareOperand { operand: String },

    #[error("unmatched '(' at position {position}")]
    UnmatchedOpenParen { position: usize },

    #[error("unmatched ')' at position {position}")]
    UnmatchedCloseParen { position: usize },

    #[error("internal tree error: {0}")]
    Internal(String),
}

/// Result type for conversions.
pub type ConversionResult<T> = Result<T, MalformedExpression>;
