//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{ConversionKind, Notation};

/// Convert arithmetic expressions between infix and postfix notation
#[derive(Parser, Debug)]
#[command(name = "exprconv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, layered over the global config
    #[arg(long, global = true, env = "EXPRCONV_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert one expression
    Convert {
        /// Expression text, e.g. "ab+c*" or "(a+b)*c"
        #[arg(allow_hyphen_values = true)]
        expression: String,
        /// Conversion to run (default: from --input-type, then config)
        #[arg(short, long, value_enum)]
        conversion: Option<ConversionArg>,
        /// Notation of the input; must agree with --conversion
        #[arg(short, long, value_enum)]
        input_type: Option<NotationArg>,
        /// Reject unmatched parentheses in infix input
        #[arg(long)]
        strict: bool,
    },

    /// Postfix to fully parenthesized infix
    ToInfix {
        /// Postfix expression, e.g. "ab+cd-*"
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Infix to postfix
    ToPostfix {
        /// Infix expression, e.g. "a+b*c"
        #[arg(allow_hyphen_values = true)]
        expression: String,
        /// Reject unmatched parentheses
        #[arg(long)]
        strict: bool,
    },

    /// Convert one expression per line
    Batch {
        /// Input file, "-" or omitted for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Conversion to run (default: config)
        #[arg(short, long, value_enum)]
        conversion: Option<ConversionArg>,
        /// Reject unmatched parentheses in infix input
        #[arg(long)]
        strict: bool,
    },

    /// Show the expression tree of a postfix expression
    Tree {
        /// Postfix expression
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
    /// Print a commented config template
    Template,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionArg {
    PostfixToInfix,
    InfixToPostfix,
}

impl From<ConversionArg> for ConversionKind {
    fn from(arg: ConversionArg) -> Self {
        match arg {
            ConversionArg::PostfixToInfix => ConversionKind::PostfixToInfix,
            ConversionArg::InfixToPostfix => ConversionKind::InfixToPostfix,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationArg {
    Postfix,
    Infix,
}

impl From<NotationArg> for Notation {
    fn from(arg: NotationArg) -> Self {
        match arg {
            NotationArg::Postfix => Notation::Postfix,
            NotationArg::Infix => Notation::Infix,
        }
    }
}

impl Commands {
    /// Whether the command asks for strict parenthesis checking.
    pub fn strict(&self) -> bool {
        match self {
            Commands::Convert { strict, .. }
            | Commands::ToPostfix { strict, .. }
            | Commands::Batch { strict, .. } => *strict,
            _ => false,
        }
    }
}
