//! External validator process
//!
//! The only place that touches the operating system process API. Everything
//! above it sees a [`DiagnosticSource`].

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::error::ExecutionError;

/// Default validator executable
pub const DEFAULT_PROGRAM: &str = "fastq_info";

/// Flags passed ahead of the file path: read and strict modes, which give the
/// fullest set of diagnostics.
pub const DEFAULT_ARGS: [&str; 2] = ["-r", "-s"];

/// Raw result of one validator run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolOutput {
    /// Everything the tool wrote to its error channel
    pub diagnostics: Vec<u8>,
    /// `None` when the tool was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ToolOutput {
    pub fn from_text(diagnostics: &str) -> Self {
        Self {
            diagnostics: diagnostics.as_bytes().to_vec(),
            exit_code: Some(0),
        }
    }
}

/// Something that can run a validator against a file and hand back its
/// diagnostics.
#[allow(async_fn_in_trait)]
pub trait DiagnosticSource {
    async fn run(&self, path: &Path) -> Result<ToolOutput, ExecutionError>;
}

/// How to invoke the external validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorCommand {
    pub program: String,
    /// Arguments placed before the file path
    pub args: Vec<String>,
    /// Kill the tool and fail the run after this long
    pub timeout: Option<Duration>,
}

impl Default for ValidatorCommand {
    fn default() -> Self {
        Self::fastq_info()
    }
}

impl ValidatorCommand {
    /// `fastq_info -r -s <path>` with no deadline
    pub fn fastq_info() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
            timeout: None,
        }
    }

    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`DiagnosticSource`] backed by a real child process
#[derive(Debug, Clone, Default)]
pub struct ProcessSource {
    command: ValidatorCommand,
}

impl ProcessSource {
    pub fn new(command: ValidatorCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &ValidatorCommand {
        &self.command
    }
}

impl DiagnosticSource for ProcessSource {
    async fn run(&self, path: &Path) -> Result<ToolOutput, ExecutionError> {
        let program = self.command.program.as_str();
        log::debug!(
            "Running {} {} {}",
            program,
            self.command.args.join(" "),
            path.display()
        );

        // stdout is not read, so it must not be a pipe the tool could fill up
        let child = Command::new(program)
            .args(&self.command.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecutionError::launch(program, e))?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = match self.command.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| ExecutionError::Timeout {
                    program: program.to_string(),
                    timeout,
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| ExecutionError::io(program, e))?;

        Ok(ToolOutput {
            diagnostics: output.stderr,
            exit_code: output.status.code(),
        })
    }
}
