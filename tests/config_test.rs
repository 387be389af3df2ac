//! Integration tests for Settings loading with layered precedence.
//!
//! Global and explicit files are passed in directly so the tests never read
//! the real XDG config.

use std::fs;

use tempfile::TempDir;

use exprconv::application::ApplicationError;
use exprconv::config::Settings;
use exprconv::domain::{ConversionKind, ParenPolicy};

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_files_when_load_then_uses_defaults() {
    let settings = Settings::load_from(None, None).expect("load defaults");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_missing_global_file_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let settings =
        Settings::load_from(Some(&dir.path().join("absent.toml")), None).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_explicit_file_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "exprconv.toml",
        r#"
default_conversion = "infix-to-postfix"
strict_parentheses = true
"#,
    );

    let settings = Settings::load_from(None, Some(&path)).expect("load settings");

    assert_eq!(settings.default_conversion, ConversionKind::InfixToPostfix);
    assert_eq!(settings.paren_policy(), ParenPolicy::Strict);
    assert!(settings.skip_blank_lines, "unspecified keys keep defaults");
}

#[test]
fn given_global_and_explicit_files_when_load_then_explicit_wins_per_key() {
    let dir = TempDir::new().unwrap();
    let global = write(
        &dir,
        "global.toml",
        r#"
default_conversion = "infix-to-postfix"
strict_parentheses = true
"#,
    );
    let explicit = write(&dir, "local.toml", "default_conversion = \"postfix-to-infix\"\n");

    let settings = Settings::load_from(Some(&global), Some(&explicit)).expect("load settings");

    assert_eq!(settings.default_conversion, ConversionKind::PostfixToInfix);
    assert!(settings.strict_parentheses, "global value survives");
}

#[test]
fn given_missing_explicit_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load_from(None, Some(&dir.path().join("nope.toml")));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_unknown_conversion_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.toml", "default_conversion = \"sideways\"\n");
    let result = Settings::load_from(None, Some(&path));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_loaded_settings_when_to_toml_then_reloads_identically() {
    let dir = TempDir::new().unwrap();
    let original = Settings {
        default_conversion: ConversionKind::InfixToPostfix,
        strict_parentheses: true,
        skip_blank_lines: false,
    };
    let path = write(&dir, "dump.toml", &original.to_toml().unwrap());

    let reloaded = Settings::load_from(None, Some(&path)).expect("reload");
    assert_eq!(reloaded, original);
}
