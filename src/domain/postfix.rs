//! Postfix to infix conversion via an expression tree

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{ExpressionArena, ExpressionTree};
use crate::domain::error::{ConversionResult, MalformedExpression, MalformedReason};
use crate::domain::stack::ConversionStack;
use crate::domain::token::{tokenize, Token};

/// Builds a binary expression tree from postfix tokens and renders it as
/// fully parenthesized infix.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostfixConverter;

impl PostfixConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert postfix text, e.g. `ab+cd-*`, to `((a + b) * (c - d))`.
    #[instrument(level = "debug", skip(self, postfix), fields(len = postfix.len()))]
    pub fn convert(&self, postfix: &str) -> ConversionResult<String> {
        let tree = self.parse(postfix)?;
        Ok(tree.into_label())
    }

    /// Build the expression tree.
    ///
    /// A lone operand is rejected: the final stack item must be an operator
    /// node with both children set.
    #[instrument(level = "debug", skip(self, postfix), fields(len = postfix.len()))]
    pub fn parse(&self, postfix: &str) -> ConversionResult<ExpressionTree> {
        let mut arena = ExpressionArena::new();
        let mut stack: ConversionStack<Index> = ConversionStack::new();

        for (position, token) in tokenize(postfix) {
            match token {
                Token::Whitespace => continue,
                Token::Operand(c) => stack.push(arena.leaf(c)),
                Token::Operator(operator) => {
                    let missing = || {
                        MalformedExpression::postfix(MalformedReason::MissingOperand {
                            operator,
                            position,
                        })
                    };
                    let right = stack.pop().ok_or_else(missing)?;
                    let left = stack.pop().ok_or_else(missing)?;
                    let node = arena.combine(operator, left, right)?;
                    trace!(position, %operator, "combined operands");
                    stack.push(node);
                }
                // grouping has no meaning in postfix
                Token::OpenParen => return Err(invalid_character('(', position)),
                Token::CloseParen => return Err(invalid_character(')', position)),
                Token::Invalid(c) => return Err(invalid_character(c, position)),
            }
        }

        let root = match stack.len() {
            0 => return Err(MalformedExpression::postfix(MalformedReason::Empty)),
            1 => stack.pop().ok_or_else(|| {
                MalformedExpression::postfix(MalformedReason::Empty)
            })?,
            _ => {
                let remaining = stack
                    .into_vec()
                    .into_iter()
                    .filter_map(|idx| arena.get(idx).map(|node| node.label.clone()))
                    .collect();
                return Err(MalformedExpression::postfix(
                    MalformedReason::DanglingOperands { remaining },
                ));
            }
        };

        if let Some(node) = arena.get(root).filter(|node| node.is_leaf()) {
            return Err(MalformedExpression::postfix(MalformedReason::BareOperand {
                operand: node.label.clone(),
            }));
        }

        let tree = arena.into_tree(root)?;
        debug!(nodes = tree.node_count(), depth = tree.depth(), "built expression tree");
        Ok(tree)
    }
}

fn invalid_character(character: char, position: usize) -> MalformedExpression {
    MalformedExpression::postfix(MalformedReason::InvalidCharacter {
        character,
        position,
    })
}

/// Convenience wrapper around [`PostfixConverter::convert`].
pub fn postfix_to_infix(expression: &str) -> ConversionResult<String> {
    PostfixConverter::new().convert(expression)
}
