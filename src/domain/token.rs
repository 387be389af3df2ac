//! Character classification, operators and precedence

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Binding strength: higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn is_operator(c: char) -> bool {
    Operator::from_char(c).is_some()
}

/// Precedence of an operator character, 0 for anything else (including `(`).
pub fn precedence(c: char) -> u8 {
    Operator::from_char(c).map_or(0, Operator::precedence)
}

/// Single input character, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Operand(char),
    Operator(Operator),
    OpenParen,
    CloseParen,
    Whitespace,
    Invalid(char),
}

impl Token {
    pub fn classify(c: char) -> Self {
        match c {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            // C-locale isspace set, vertical tab included
            ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r' => Token::Whitespace,
            c if c.is_ascii_alphanumeric() => Token::Operand(c),
            c => match Operator::from_char(c) {
                Some(op) => Token::Operator(op),
                None => Token::Invalid(c),
            },
        }
    }
}

/// Iterate `(position, token)` pairs over an expression, positions are char offsets.
pub fn tokenize(expression: &str) -> impl Iterator<Item = (usize, Token)> + '_ {
    expression
        .chars()
        .enumerate()
        .map(|(position, c)| (position, Token::classify(c)))
}

/// Notation of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notation {
    Infix,
    Postfix,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Infix => write!(f, "infix"),
            Notation::Postfix => write!(f, "postfix"),
        }
    }
}

/// Direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionKind {
    #[default]
    PostfixToInfix,
    InfixToPostfix,
}

impl ConversionKind {
    pub fn source(self) -> Notation {
        match self {
            ConversionKind::PostfixToInfix => Notation::Postfix,
            ConversionKind::InfixToPostfix => Notation::Infix,
        }
    }

    pub fn target(self) -> Notation {
        match self {
            ConversionKind::PostfixToInfix => Notation::Infix,
            ConversionKind::InfixToPostfix => Notation::Postfix,
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.source(), self.target())
    }
}
