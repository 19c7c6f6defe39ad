//! Configuration management for the FASTQ validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Environment override for the validator program
//! - Optional TOML config file
//!
//! Precedence: command line > environment > config file > built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::validation::ValidatorCommand;

/// Environment variable naming the validator program
pub const PROGRAM_ENV_VAR: &str = "FASTQ_VALIDATOR_PROGRAM";

/// Command-line arguments for the FASTQ validator
#[derive(Debug, Parser)]
#[command(name = "fastq-validate")]
#[command(about = "Validate a FASTQ file and print a JSON report")]
#[command(version)]
pub struct Args {
    /// FASTQ file to validate
    pub file: PathBuf,

    /// External validator program
    #[arg(long, help = "Validator executable (default: fastq_info)")]
    pub validator: Option<String>,

    /// Arguments passed to the validator before the file path
    #[arg(
        long = "validator-arg",
        allow_hyphen_values = true,
        help = "Validator argument placed before the file path; repeat for several (default: -r -s)"
    )]
    pub validator_args: Vec<String>,

    /// Deadline for the validator run
    #[arg(long, help = "Fail if the validator runs longer than this many seconds")]
    pub timeout: Option<u64>,

    /// Explicit config file
    #[arg(long, help = "TOML config file")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Contents of a TOML config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub validator: ValidatorSection,
}

/// `[validator]` table
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValidatorSection {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Per-user config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fastq-validator").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the explicit file, or the per-user file if one exists
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("Using config file {}", path.display());
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("Using config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// File to validate
    pub file: PathBuf,
    /// How to invoke the validator
    pub command: ValidatorCommand,
    /// Pretty-print the report
    pub pretty: bool,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from parsed arguments and the environment
    pub fn from_args_and_env(args: Args) -> Result<Self> {
        let env_program = std::env::var(PROGRAM_ENV_VAR).ok();
        Self::from_args(args, env_program)
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args, env_program: Option<String>) -> Result<Self> {
        let file = ConfigFile::discover(args.config.as_deref())?;
        Self::resolve(args, env_program, file)
    }

    /// Merge all sources into one configuration
    pub fn resolve(args: Args, env_program: Option<String>, file: ConfigFile) -> Result<Self> {
        let defaults = ValidatorCommand::fastq_info();
        let section = file.validator;

        let program = args
            .validator
            .or(env_program.filter(|p| !p.is_empty()))
            .or(section.program)
            .unwrap_or(defaults.program);
        if program.trim().is_empty() {
            bail!("Validator program must not be empty");
        }

        let validator_args = if !args.validator_args.is_empty() {
            args.validator_args
        } else {
            section.args.unwrap_or(defaults.args)
        };

        let timeout = match args.timeout.or(section.timeout_secs) {
            Some(0) => bail!("Timeout must be at least one second"),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Config {
            file: args.file,
            command: ValidatorCommand::new(program, validator_args).with_timeout(timeout),
            pretty: args.pretty,
            log_level: args.log_level,
        })
    }
}
