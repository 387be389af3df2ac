//! Domain layer: the conversion core
//!
//! Pure string transforms, no I/O. Every call allocates its own stack (and
//! tree for postfix input) and releases them on return, so converters can be
//! used from any number of threads at once.

pub mod arena;
pub mod error;
pub mod infix;
pub mod postfix;
pub mod stack;
pub mod token;

pub use arena::{ExprNode, ExpressionArena, ExpressionTree, NodeKind, MAX_DISPLAY_DEPTH};
pub use error::{ConversionResult, MalformedExpression, MalformedReason};
pub use infix::{infix_to_postfix, InfixConverter, ParenPolicy};
pub use postfix::{postfix_to_infix, PostfixConverter};
pub use stack::ConversionStack;
pub use token::{is_operator, precedence, ConversionKind, Notation, Operator, Token};
