//! End-to-end command tests: parse arguments, then dispatch.
//!
//! Commands run with explicit settings so a user's global config or
//! `EXPRCONV_*` variables cannot change the outcome.

use std::fs;
use std::path::Path;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use exprconv::cli::{execute_command, execute_with_settings, Cli, Commands};
use exprconv::config::Settings;
use exprconv::exitcode;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("exprconv").chain(args.iter().copied()))
        .expect("valid arguments")
}

fn run_with(settings: Settings, args: &[&str]) -> (Result<(), i32>, String) {
    let cli = parse(args);
    let mut out = Vec::new();
    let result = match &cli.command {
        Some(Commands::Completion { .. }) | None => execute_command(&cli, &mut out),
        Some(command) => execute_with_settings(command, settings, &mut out),
    };
    (result.map_err(|e| e.exit_code()), String::from_utf8(out).unwrap())
}

fn run(args: &[&str]) -> (Result<(), i32>, String) {
    run_with(Settings::default(), args)
}

fn settings_from(path: &Path) -> Settings {
    Settings::load_from(None, Some(path)).unwrap()
}

#[rstest]
#[case(&["to-infix", "ab+"], "(a + b)\n")]
#[case(&["to-infix", "ab+cd-*"], "((a + b) * (c - d))\n")]
#[case(&["to-postfix", "a+b*c"], "abc*+\n")]
#[case(&["convert", "-c", "infix-to-postfix", "(a+b)*c"], "ab+c*\n")]
#[case(&["convert", "-i", "infix", "a+b+c"], "ab+c+\n")]
#[case(&["convert", "--conversion", "postfix-to-infix", "--input-type", "postfix", "ab-"], "(a - b)\n")]
fn given_valid_expression_when_run_then_prints_result(#[case] args: &[&str], #[case] expected: &str) {
    let (result, out) = run(args);
    assert_eq!(result, Ok(()));
    assert_eq!(out, expected);
}

#[rstest]
#[case(&["to-infix", "a"], exitcode::DATAERR)]
#[case(&["to-infix", "ab+c"], exitcode::DATAERR)]
#[case(&["to-postfix", "a&b"], exitcode::DATAERR)]
#[case(&["to-postfix", "--strict", "(a+b"], exitcode::DATAERR)]
#[case(&["convert", "-c", "postfix-to-infix", "-i", "infix", "ab+"], exitcode::USAGE)]
#[case(&["batch", "/nonexistent/exprconv/input.txt"], exitcode::NOINPUT)]
fn given_bad_input_when_run_then_exit_code(#[case] args: &[&str], #[case] code: i32) {
    let (result, _) = run(args);
    assert_eq!(result, Err(code));
}

#[test]
fn given_no_command_when_run_then_usage_error() {
    let (result, _) = run(&[]);
    assert_eq!(result, Err(exitcode::USAGE));
}

#[test]
fn given_config_file_when_run_then_default_conversion_and_strictness_apply() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("exprconv.toml");
    fs::write(
        &config,
        "default_conversion = \"infix-to-postfix\"\nstrict_parentheses = true\n",
    )
    .unwrap();

    let (result, out) = run_with(settings_from(&config), &["convert", "a*b-c"]);
    assert_eq!(result, Ok(()));
    assert_eq!(out, "ab*c-\n");

    let (result, _) = run_with(settings_from(&config), &["convert", "a*b-c)"]);
    assert_eq!(result, Err(exitcode::DATAERR));
}

#[test]
fn given_batch_file_when_run_then_every_line_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "a+b\n(a+b)*c\n").unwrap();

    let (result, out) = run(&["batch", "-c", "infix-to-postfix", input.to_str().unwrap()]);

    assert_eq!(result, Ok(()));
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("   1") && lines[0].ends_with("ab+"));
    assert!(lines[1].starts_with("   2") && lines[1].ends_with("ab+c*"));
}

#[test]
fn given_config_template_when_run_then_prints_commented_keys() {
    let (result, out) = run(&["config", "template"]);
    assert_eq!(result, Ok(()));
    assert!(out.contains("# strict_parentheses = false"));
}

#[test]
fn given_completion_request_when_run_then_script_mentions_binary() {
    let (result, out) = run(&["completion", "bash"]);
    assert_eq!(result, Ok(()));
    assert!(out.contains("exprconv"));
}

#[test]
fn given_strict_flag_when_settings_are_tolerant_then_flag_wins() {
    let (result, out) = run(&["to-postfix", "(a+b"]);
    assert_eq!(result, Ok(()));
    assert_eq!(out, "ab+(\n");

    let (result, _) = run(&["to-postfix", "--strict", "(a+b"]);
    assert_eq!(result, Err(exitcode::DATAERR));
}
