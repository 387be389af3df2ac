//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/exprconv/exprconv.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `EXPRCONV_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{ConversionKind, ParenPolicy};

/// Effective settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Conversion used when none is given on the command line
    pub default_conversion: ConversionKind,
    /// Reject unmatched parentheses in infix input instead of tolerating them
    pub strict_parentheses: bool,
    /// Ignore blank lines in batch input
    pub skip_blank_lines: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_conversion: ConversionKind::PostfixToInfix,
            strict_parentheses: false,
            skip_blank_lines: true,
        }
    }
}

/// Get the XDG config directory for exprconv.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "exprconv").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("exprconv.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    pub fn paren_policy(&self) -> ParenPolicy {
        if self.strict_parentheses {
            ParenPolicy::Strict
        } else {
            ParenPolicy::Tolerant
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit config file must exist; the global one is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Load from the given global and explicit files plus `EXPRCONV_*` variables.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .add_source(File::from_str(&defaults.to_toml()?, FileFormat::Toml));

        if let Some(global_path) = global {
            debug!("load: global={}", global_path.display());
            builder = builder.add_source(File::from(global_path).required(false));
        }

        if let Some(path) = explicit {
            let path = expand_path(path);
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("load: explicit={}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("EXPRCONV").try_parsing(true));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# exprconv configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/exprconv/exprconv.toml
#   Explicit: --config <FILE>
#   Env:      EXPRCONV_* environment variables

# Conversion used when --conversion is not given:
# "postfix-to-infix" or "infix-to-postfix"
# default_conversion = "postfix-to-infix"

# Reject unmatched parentheses in infix input.
# When false, an unmatched ")" is ignored and an unmatched "(" is copied
# to the postfix output.
# strict_parentheses = false

# Skip blank lines in batch input instead of reporting them as empty expressions
# skip_blank_lines = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
