//! Command dispatch
//!
//! Results go to the supplied writer; errors are returned as [`CliError`] and
//! rendered by `main`.

use std::io::Write;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::ConversionRequest;
use crate::cli::args::{Cli, Commands, ConfigCommands, ConversionArg, NotationArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::domain::{ConversionKind, Notation};
use crate::infrastructure::{InfraError, ServiceContainer};

/// Parse settings, wire services and run the requested command.
pub fn execute_command(cli: &Cli, out: &mut dyn Write) -> CliResult<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| CliError::Usage("no command given, see --help".into()))?;

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "exprconv", out);
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    execute_with_settings(command, settings, out)
}

/// Run a command with already loaded settings; `--strict` is applied on top.
pub fn execute_with_settings(command: &Commands, mut settings: Settings, out: &mut dyn Write) -> CliResult<()> {
    if command.strict() {
        settings.strict_parentheses = true;
    }
    debug!("execute_with_settings: settings={:?}", settings);

    let container = ServiceContainer::new(settings);
    dispatch(&container, command, out)
}

/// Run a command against an already wired container.
pub fn dispatch(container: &ServiceContainer, command: &Commands, out: &mut dyn Write) -> CliResult<()> {
    match command {
        Commands::Convert {
            expression,
            conversion,
            input_type,
            ..
        } => cmd_convert(container, expression, *conversion, *input_type, out),
        Commands::ToInfix { expression } => cmd_convert(
            container,
            expression,
            Some(ConversionArg::PostfixToInfix),
            None,
            out,
        ),
        Commands::ToPostfix { expression, .. } => cmd_convert(
            container,
            expression,
            Some(ConversionArg::InfixToPostfix),
            None,
            out,
        ),
        Commands::Batch {
            file, conversion, ..
        } => cmd_batch(container, file.as_deref(), *conversion, out),
        Commands::Tree { expression } => cmd_tree(container, expression, out),
        Commands::Config { command } => cmd_config(container, command, out),
        Commands::Completion { .. } => Err(CliError::Usage(
            "completion is handled before services are wired".into(),
        )),
    }
}

/// Explicit conversion wins, then the one implied by the input type, then config.
fn resolve_kind(
    container: &ServiceContainer,
    conversion: Option<ConversionArg>,
    input_type: Option<Notation>,
) -> ConversionKind {
    conversion
        .map(ConversionKind::from)
        .or_else(|| {
            input_type.map(|notation| match notation {
                Notation::Postfix => ConversionKind::PostfixToInfix,
                Notation::Infix => ConversionKind::InfixToPostfix,
            })
        })
        .unwrap_or(container.settings.default_conversion)
}

#[instrument(skip(container, out))]
fn cmd_convert(
    container: &ServiceContainer,
    expression: &str,
    conversion: Option<ConversionArg>,
    input_type: Option<NotationArg>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let declared = input_type.map(Notation::from);
    let kind = resolve_kind(container, conversion, declared);

    let mut request = ConversionRequest::new(kind, expression);
    if let Some(notation) = declared {
        request = request.with_declared_input(notation);
    }

    let conversion = container.conversion.convert(&request)?;
    output::info(out, &conversion.output).map_err(write_err)
}

#[instrument(skip(container, out))]
fn cmd_batch(
    container: &ServiceContainer,
    file: Option<&Path>,
    conversion: Option<ConversionArg>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let text = match file {
        None => read_stdin(container)?,
        Some(path) if path == Path::new("-") => read_stdin(container)?,
        Some(path) => {
            let path = config::expand_path(path);
            container
                .input
                .read_file(&path)
                .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?
        }
    };

    let kind = resolve_kind(container, conversion, None);
    let report = container.conversion.convert_batch(kind, &text);

    for entry in &report.entries {
        let written = match &entry.result {
            Ok(converted) => output::success_line(out, entry.line, converted),
            Err(e) => output::failure_line(out, entry.line, e),
        };
        written.map_err(write_err)?;
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::BatchFailed {
            failed: report.failures(),
            total: report.entries.len(),
        })
    }
}

#[instrument(skip(container, expression, out), fields(len = expression.len()))]
fn cmd_tree(container: &ServiceContainer, expression: &str, out: &mut dyn Write) -> CliResult<()> {
    let tree = container.conversion.inspect(expression)?;

    write!(out, "{}", tree.to_termtree()).map_err(write_err)?;
    output::detail(out, &format!("infix:     {}", tree.label())).map_err(write_err)?;
    output::detail(out, &format!("postfix:   {}", tree.to_postfix())).map_err(write_err)?;
    output::detail(
        out,
        &format!(
            "depth: {}, operands: {}, operators: {}",
            tree.depth(),
            tree.operand_count(),
            tree.operator_count()
        ),
    )
    .map_err(write_err)
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands, out: &mut dyn Write) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header(out, "# effective settings").map_err(write_err)?;
            let toml = container.settings.to_toml()?;
            write!(out, "{}", toml).map_err(write_err)
        }
        ConfigCommands::Path => match config::global_config_path() {
            Some(path) => {
                if !path.exists() {
                    output::warning(&format!("{} does not exist", path.display()));
                }
                output::info(out, &path.display()).map_err(write_err)
            }
            None => Err(CliError::Usage("no config directory on this platform".into())),
        },
        ConfigCommands::Template => write!(out, "{}", Settings::template()).map_err(write_err),
    }
}

fn read_stdin(container: &ServiceContainer) -> CliResult<String> {
    Ok(container
        .input
        .read_stdin()
        .map_err(|e| InfraError::io("read stdin", e))?)
}

fn write_err(e: std::io::Error) -> CliError {
    CliError::Infra(InfraError::io("write output", e))
}
