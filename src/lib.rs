//! exprconv: convert arithmetic expressions between infix and postfix notation
//!
//! ```
//! use exprconv::domain::{infix_to_postfix, postfix_to_infix};
//!
//! assert_eq!(postfix_to_infix("ab+cd-*").unwrap(), "((a + b) * (c - d))");
//! assert_eq!(infix_to_postfix("(a+b)*c").unwrap(), "ab+c*");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{infix_to_postfix, postfix_to_infix, MalformedExpression};
