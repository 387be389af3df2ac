//! Infix to postfix conversion by operator-precedence stack reduction

use tracing::{debug, instrument};

use crate::domain::error::{ConversionResult, MalformedExpression, MalformedReason};
use crate::domain::stack::ConversionStack;
use crate::domain::token::{precedence, tokenize, Token};

/// How unbalanced parentheses are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParenPolicy {
    /// Unmatched `)` is ignored, unmatched `(` ends up in the output.
    #[default]
    Tolerant,
    /// Any unmatched parenthesis is an error.
    Strict,
}

/// Linearizes infix text into postfix order with a single operator stack.
///
/// Operators of equal precedence are popped on ties, which makes `+ -` and
/// `* /` left-associative: `a-b-c` becomes `ab-c-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfixConverter {
    policy: ParenPolicy,
}

impl InfixConverter {
    pub fn new(policy: ParenPolicy) -> Self {
        Self { policy }
    }

    pub fn strict() -> Self {
        Self::new(ParenPolicy::Strict)
    }

    pub fn policy(&self) -> ParenPolicy {
        self.policy
    }

    /// Convert infix text, e.g. `(a+b)*c`, to `ab+c*`.
    #[instrument(level = "debug", skip(self), fields(policy = ?self.policy))]
    pub fn convert(&self, infix: &str) -> ConversionResult<String> {
        let strict = self.policy == ParenPolicy::Strict;
        let mut output = String::with_capacity(infix.len());
        // operator characters and `(`, with their input positions
        let mut stack: ConversionStack<(char, usize)> = ConversionStack::new();

        for (position, token) in tokenize(infix) {
            match token {
                Token::Whitespace => continue,
                Token::Operand(c) => output.push(c),
                Token::OpenParen => stack.push(('(', position)),
                Token::CloseParen => {
                    let mut matched = false;
                    while let Some((top, _)) = stack.pop() {
                        if top == '(' {
                            matched = true;
                            break;
                        }
                        output.push(top);
                    }
                    if !matched && strict {
                        return Err(MalformedExpression::infix(
                            MalformedReason::UnmatchedCloseParen { position },
                        ));
                    }
                }
                Token::Operator(operator) => {
                    while let Some(&(top, _)) = stack.peek() {
                        if precedence(top) < operator.precedence() {
                            break;
                        }
                        output.push(top);
                        stack.pop();
                    }
                    stack.push((operator.symbol(), position));
                }
                Token::Invalid(character) => {
                    return Err(MalformedExpression::infix(
                        MalformedReason::InvalidCharacter {
                            character,
                            position,
                        },
                    ));
                }
            }
        }

        for (top, position) in stack.drain_top_down() {
            if top == '(' && strict {
                return Err(MalformedExpression::infix(
                    MalformedReason::UnmatchedOpenParen { position },
                ));
            }
            output.push(top);
        }

        debug!(%output, "converted to postfix");
        Ok(output)
    }
}

/// Convenience wrapper around [`InfixConverter::convert`] with the tolerant policy.
pub fn infix_to_postfix(expression: &str) -> ConversionResult<String> {
    InfixConverter::default().convert(expression)
}
