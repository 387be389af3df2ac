//! Conversion service
//!
//! Runs single conversions on behalf of a caller (checking the declared input
//! type first), converts line-oriented batches in parallel, and exposes the
//! expression tree behind a postfix conversion.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    ConversionKind, ConversionResult, ExpressionTree, InfixConverter, Notation, PostfixConverter,
};

/// One conversion as requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub kind: ConversionKind,
    /// Input type chosen by the caller, if any; must match `kind.source()`
    pub declared_input: Option<Notation>,
    pub expression: String,
}

impl ConversionRequest {
    pub fn new(kind: ConversionKind, expression: impl Into<String>) -> Self {
        Self {
            kind,
            declared_input: None,
            expression: expression.into(),
        }
    }

    pub fn with_declared_input(mut self, notation: Notation) -> Self {
        self.declared_input = Some(notation);
        self
    }
}

/// A successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub kind: ConversionKind,
    pub input: String,
    pub output: String,
}

/// Outcome for one batch line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// 1-based line number in the batch input
    pub line: usize,
    pub input: String,
    pub result: ConversionResult<String>,
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub kind: ConversionKind,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_err()).count()
    }

    pub fn successes(&self) -> usize {
        self.entries.len() - self.failures()
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

/// Stateless conversion service; safe to share between threads.
#[derive(Debug, Clone)]
pub struct ConversionService {
    settings: Arc<Settings>,
}

impl ConversionService {
    /// Create a new conversion service.
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run a single conversion.
    #[instrument(level = "debug", skip(self))]
    pub fn convert(&self, request: &ConversionRequest) -> ApplicationResult<Conversion> {
        if let Some(declared) = request.declared_input {
            if declared != request.kind.source() {
                return Err(ApplicationError::NotationMismatch {
                    declared,
                    kind: request.kind,
                });
            }
        }

        let output = self.convert_expression(request.kind, &request.expression)?;
        Ok(Conversion {
            kind: request.kind,
            input: request.expression.clone(),
            output,
        })
    }

    /// Convert every line of `text`; lines are independent and run in parallel.
    #[instrument(level = "debug", skip(self, text))]
    pub fn convert_batch(&self, kind: ConversionKind, text: &str) -> BatchReport {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !(self.settings.skip_blank_lines && line.trim().is_empty()))
            .collect();
        debug!("convert_batch: {} lines", lines.len());

        let entries: Vec<BatchEntry> = lines
            .par_iter()
            .map(|&(line, input)| BatchEntry {
                line,
                input: input.to_string(),
                result: self.convert_expression(kind, input),
            })
            .collect();

        let report = BatchReport { kind, entries };
        debug!(
            "convert_batch: {} converted, {} failed",
            report.successes(),
            report.failures()
        );
        report
    }

    /// Build the expression tree for postfix input.
    #[instrument(level = "debug", skip(self, postfix), fields(len = postfix.len()))]
    pub fn inspect(&self, postfix: &str) -> ApplicationResult<ExpressionTree> {
        Ok(PostfixConverter::new().parse(postfix)?)
    }

    fn convert_expression(&self, kind: ConversionKind, expression: &str) -> ConversionResult<String> {
        match kind {
            ConversionKind::PostfixToInfix => PostfixConverter::new().convert(expression),
            ConversionKind::InfixToPostfix => {
                InfixConverter::new(self.settings.paren_policy()).convert(expression)
            }
        }
    }
}
